pub mod config;
pub mod error;
pub mod factory;
pub mod fallback;
pub mod providers;
pub mod resolver;
pub mod scorer;
pub mod service;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::ProviderError;
pub use factory::*;
pub use fallback::{BoundingBoxFallback, StateBox, US_STATE_BOXES};
pub use resolver::LocationResolver;
pub use scorer::*;
pub use service::WaterQualityService;
pub use traits::*;
pub use types::*;
