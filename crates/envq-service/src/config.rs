use std::sync::Arc;
use std::time::Duration;

use envq_air::{
    build_air_quality_provider, AirQualityProviderConfig, AirQualityService,
    GoogleAirQualityConfig,
};
use envq_water::{
    build_geocoder, build_water_directory, EpaDirectoryConfig, GeocodingProviderConfig,
    GoogleGeocodingConfig, WaterDirectoryConfig, WaterQualityService,
};
use thiserror::Error;

use crate::aggregator::EnvironmentalQualityService;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const MIN_TIMEOUT_MS: u64 = 500;
const MAX_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("air quality provider: {0}")]
    Air(#[from] envq_air::ProviderError),

    #[error("water provider: {0}")]
    Water(#[from] envq_water::ProviderError),
}

/// Process-wide settings for the upstream clients.
#[derive(Clone)]
pub struct ServiceConfig {
    pub google_api_key: String,
    pub air_base_url: Option<String>,
    pub geocoding_base_url: Option<String>,
    pub epa_base_url: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("google_api_key", &"[REDACTED]")
            .field("air_base_url", &self.air_base_url)
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field("epa_base_url", &self.epa_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ServiceConfig {
    pub fn new(google_api_key: impl Into<String>) -> Self {
        Self {
            google_api_key: google_api_key.into(),
            air_base_url: None,
            geocoding_base_url: None,
            epa_base_url: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServiceConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GOOGLE_API_KEY").ok_or(ConfigError::MissingVar("GOOGLE_API_KEY"))?;
        let timeout_ms = non_empty("ENVQ_HTTP_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS)
            .clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);

        Ok(Self {
            google_api_key: api_key,
            air_base_url: non_empty("ENVQ_AIR_BASE_URL"),
            geocoding_base_url: non_empty("ENVQ_GEOCODING_BASE_URL"),
            epa_base_url: non_empty("ENVQ_EPA_BASE_URL"),
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    fn air_config(&self) -> AirQualityProviderConfig {
        let mut cfg = GoogleAirQualityConfig::new(self.google_api_key.clone());
        cfg.timeout = self.timeout;
        if let Some(base) = &self.air_base_url {
            cfg.base_url.clone_from(base);
        }
        AirQualityProviderConfig::Google(cfg)
    }

    fn geocoding_config(&self) -> GeocodingProviderConfig {
        let mut cfg = GoogleGeocodingConfig::new(self.google_api_key.clone());
        cfg.timeout = self.timeout;
        if let Some(base) = &self.geocoding_base_url {
            cfg.base_url.clone_from(base);
        }
        GeocodingProviderConfig::Google(cfg)
    }

    fn directory_config(&self) -> WaterDirectoryConfig {
        let mut cfg = EpaDirectoryConfig::new();
        cfg.timeout = self.timeout;
        if let Some(base) = &self.epa_base_url {
            cfg.base_url.clone_from(base);
        }
        WaterDirectoryConfig::Epa(cfg)
    }
}

/// Wires the Google and EPA adapters into one aggregator.
pub fn build_environmental_service(
    cfg: &ServiceConfig,
) -> Result<EnvironmentalQualityService, ConfigError> {
    let air = AirQualityService::new(build_air_quality_provider(cfg.air_config())?);
    let water = WaterQualityService::with_defaults(
        build_geocoder(cfg.geocoding_config())?,
        build_water_directory(cfg.directory_config())?,
    );
    Ok(EnvironmentalQualityService::new(
        Arc::new(air),
        Arc::new(water),
    ))
}
