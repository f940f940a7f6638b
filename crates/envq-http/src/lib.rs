pub mod server;

pub use server::{listen_addr, HttpServer, DEFAULT_HTTP_ADDR};
