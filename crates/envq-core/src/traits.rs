use async_trait::async_trait;

use crate::coordinates::Coordinates;
use crate::error::QualityError;
use crate::quality::{AirQuality, WaterQuality};

/// Produces a scored air-quality reading; failures surface as `AirQualityFetchFailed`.
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, coordinates: Coordinates) -> Result<AirQuality, QualityError>;
}

/// Produces a scored water-quality reading; failures surface as `WaterQualityFetchFailed`.
#[async_trait]
pub trait WaterQualitySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, coordinates: Coordinates) -> Result<WaterQuality, QualityError>;
}
