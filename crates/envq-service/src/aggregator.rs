use std::sync::Arc;

use chrono::Utc;
use envq_core::{
    AirQualitySource, Coordinates, EnvironmentalQuality, QualityError, WaterQualitySource,
};
use tracing::{info, warn, Instrument};

/// Fans out to the air and water sources for one coordinate and combines
/// their scores. Holds no per-request state.
#[derive(Clone)]
pub struct EnvironmentalQualityService {
    air: Arc<dyn AirQualitySource>,
    water: Arc<dyn WaterQualitySource>,
}

impl EnvironmentalQualityService {
    pub fn new(air: Arc<dyn AirQualitySource>, water: Arc<dyn WaterQualitySource>) -> Self {
        Self { air, water }
    }

    /// Validates the coordinate before any upstream call is made.
    pub async fn assess(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<EnvironmentalQuality, QualityError> {
        let coordinates = Coordinates::new(latitude, longitude)?;
        self.assess_at(coordinates).await
    }

    /// Air and water run as two spawned tasks joined before aggregation. When
    /// both fail the air error is reported.
    #[tracing::instrument(skip_all, fields(%coordinates, air = self.air.name(), water = self.water.name()))]
    pub async fn assess_at(
        &self,
        coordinates: Coordinates,
    ) -> Result<EnvironmentalQuality, QualityError> {
        let air_source = Arc::clone(&self.air);
        let water_source = Arc::clone(&self.water);
        let air_task =
            tokio::spawn(async move { air_source.fetch(coordinates).await }.in_current_span());
        let water_task =
            tokio::spawn(async move { water_source.fetch(coordinates).await }.in_current_span());
        let (air, water) = tokio::join!(air_task, water_task);

        let air = air.unwrap_or_else(|err| {
            Err(QualityError::AirQualityFetchFailed(format!("air task aborted: {err}")))
        });
        let water = water.unwrap_or_else(|err| {
            Err(QualityError::WaterQualityFetchFailed(format!("water task aborted: {err}")))
        });

        if let Err(err) = &water {
            warn!(error = %err, "water quality fetch failed");
        }
        let air_quality = air.inspect_err(|err| warn!(error = %err, "air quality fetch failed"))?;
        let water_quality = water?;

        let report = EnvironmentalQuality {
            coordinates,
            air_quality,
            water_quality,
            timestamp: Utc::now(),
        };
        info!(
            air_score = report.air_quality.score.value(),
            water_score = report.water_quality.score.value(),
            overall = %report.overall_health(),
            "environmental quality assessed"
        );
        Ok(report)
    }
}
