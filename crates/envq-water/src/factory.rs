use std::sync::Arc;

use crate::config::{GeocodingProviderConfig, WaterDirectoryConfig};
use crate::error::ProviderError;
use crate::providers::{EpaWaterDirectory, GoogleGeocodingProvider};
use crate::traits::{GeocodingSource, WaterSystemDirectory};

pub fn build_geocoder(
    cfg: GeocodingProviderConfig,
) -> Result<Arc<dyn GeocodingSource>, ProviderError> {
    match cfg {
        GeocodingProviderConfig::Google(c) => Ok(Arc::new(GoogleGeocodingProvider::new(c)?)),
    }
}

pub fn build_water_directory(
    cfg: WaterDirectoryConfig,
) -> Result<Arc<dyn WaterSystemDirectory>, ProviderError> {
    match cfg {
        WaterDirectoryConfig::Epa(c) => Ok(Arc::new(EpaWaterDirectory::new(c)?)),
    }
}
