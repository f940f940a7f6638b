use std::sync::Arc;

use crate::config::AirQualityProviderConfig;
use crate::error::ProviderError;
use crate::providers::GoogleAirQualityProvider;
use crate::traits::AirQualityProvider;

pub fn build_air_quality_provider(
    cfg: AirQualityProviderConfig,
) -> Result<Arc<dyn AirQualityProvider>, ProviderError> {
    match cfg {
        AirQualityProviderConfig::Google(c) => Ok(Arc::new(GoogleAirQualityProvider::new(c)?)),
    }
}
