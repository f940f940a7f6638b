pub mod config;
pub mod error;
pub mod factory;
pub mod providers;
pub mod scorer;
pub mod service;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::ProviderError;
pub use factory::*;
pub use scorer::*;
pub use service::AirQualityService;
pub use traits::*;
pub use types::*;
