use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use envq_core::{Coordinates, QualityError, WaterQuality, WaterQualitySource};
use tracing::{info, warn};

use crate::fallback::BoundingBoxFallback;
use crate::resolver::LocationResolver;
use crate::scorer::{map_contaminants, score_contaminants};
use crate::traits::{GeocodingSource, WaterSystemDirectory};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const UNKNOWN_CITY: &str = "Unknown";

/// Scores drinking water for the utility serving a coordinate.
#[derive(Clone)]
pub struct WaterQualityService {
    resolver: LocationResolver,
}

impl WaterQualityService {
    pub fn new(resolver: LocationResolver) -> Self {
        Self { resolver }
    }

    /// Geocoder plus directory, with the default US bounding-box fallback.
    pub fn with_defaults(
        geocoder: Arc<dyn GeocodingSource>,
        directory: Arc<dyn WaterSystemDirectory>,
    ) -> Self {
        Self::new(LocationResolver::new(
            geocoder,
            Arc::new(BoundingBoxFallback::default()),
            directory,
        ))
    }
}

#[async_trait]
impl WaterQualitySource for WaterQualityService {
    fn name(&self) -> &'static str {
        "water-utility"
    }

    #[tracing::instrument(skip_all, fields(%coordinates))]
    async fn fetch(&self, coordinates: Coordinates) -> Result<WaterQuality, QualityError> {
        let location = self.resolver.resolve_location(coordinates).await;
        if !location.has_lookup_key() {
            info!("no zip, county or state resolved; returning default water quality");
            return Ok(WaterQuality::unknown(UNKNOWN_LOCATION, Utc::now()));
        }

        let Some(system) = self.resolver.find_utility(&location).await else {
            info!(
                zip = location.zip(),
                state = location.state.as_deref(),
                state_code = location.state_code(),
                "no serving water utility found; returning default water quality"
            );
            let city = location.city.unwrap_or_else(|| UNKNOWN_CITY.to_string());
            return Ok(WaterQuality::unknown(city, Utc::now()));
        };

        let violations = self.resolver.health_violations(&system).await;
        let contaminants = map_contaminants(&violations);
        let score = score_contaminants(&contaminants).map_err(|e| {
            warn!(pwsid = %system.pwsid, error = %e, "water scoring failed");
            QualityError::WaterQualityFetchFailed(e.to_string())
        })?;

        info!(
            pwsid = %system.pwsid,
            utility = %system.name,
            primacy_agency = system.primacy_agency_code.as_deref(),
            population_served = system.population_served,
            state = location.state.as_deref(),
            contaminants = contaminants.len(),
            score = score.value(),
            "water quality scored"
        );
        Ok(WaterQuality {
            score,
            contaminants,
            location: location.city,
            utility_name: Some(system.name),
            timestamp: Utc::now(),
        })
    }
}
