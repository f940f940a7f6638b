use async_trait::async_trait;
use envq_core::{Coordinates, QualityError};

use crate::error::ProviderError;
use crate::types::{LocationInfo, ViolationRecord, WaterSystem};

/// Reverse geocoding; failures are reported as `QualityError::GeocodingFailed`.
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<LocationInfo, QualityError>;
}

/// Offline resolver consulted when geocoding fails.
pub trait LocationFallback: Send + Sync {
    fn name(&self) -> &'static str;

    fn locate(&self, coordinates: Coordinates) -> LocationInfo;
}

/// Directory of public water systems and their violations.
#[async_trait]
pub trait WaterSystemDirectory: Send + Sync {
    fn name(&self) -> &'static str;

    async fn systems_by_zip(
        &self,
        zip_code: &str,
        limit: usize,
    ) -> Result<Vec<WaterSystem>, ProviderError>;

    async fn systems_by_state(
        &self,
        state_code: &str,
        limit: usize,
    ) -> Result<Vec<WaterSystem>, ProviderError>;

    async fn health_violations(
        &self,
        pwsid: &str,
        limit: usize,
    ) -> Result<Vec<ViolationRecord>, ProviderError>;
}
