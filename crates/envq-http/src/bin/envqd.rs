use std::io;

use envq_http::{listen_addr, HttpServer};
use envq_service::{build_environmental_service, ServiceConfig};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> io::Result<()> {
    // Variables already set in the process win over the file.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }

    let cfg = ServiceConfig::from_env().map_err(|err| {
        error!(error = %err, "envqd configuration failed");
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    })?;
    let service = build_environmental_service(&cfg).map_err(|err| {
        error!(error = %err, "envqd provider initialization failed");
        io::Error::other(err.to_string())
    })?;

    let addr = listen_addr(
        std::env::var("ENVQ_HTTP_ADDR").ok(),
        std::env::var("PORT").ok(),
    );
    HttpServer::new(service)?.serve(&addr)
}
