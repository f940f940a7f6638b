pub mod aggregator;
pub mod config;

pub use aggregator::EnvironmentalQualityService;
pub use config::{build_environmental_service, ConfigError, ServiceConfig};
pub use envq_air::{
    build_air_quality_provider, AirQualityProvider, AirQualityProviderConfig, AirQualityService,
    GoogleAirQualityConfig, ProviderError as AirProviderError,
};
pub use envq_core::*;
pub use envq_water::{
    build_geocoder, build_water_directory, BoundingBoxFallback, EpaDirectoryConfig,
    GeocodingProviderConfig, GeocodingSource, GoogleGeocodingConfig, LocationFallback,
    LocationInfo, LocationResolver, ProviderError as WaterProviderError, WaterDirectoryConfig,
    WaterQualityService, WaterSystemDirectory,
};
