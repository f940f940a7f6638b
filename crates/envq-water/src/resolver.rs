use std::sync::Arc;

use envq_core::Coordinates;
use tracing::{debug, info, warn};

use crate::traits::{GeocodingSource, LocationFallback, WaterSystemDirectory};
use crate::types::{LocationInfo, ViolationRecord, WaterSystem};

pub const ZIP_LOOKUP_LIMIT: usize = 10;
pub const STATE_LOOKUP_LIMIT: usize = 5;
pub const VIOLATION_LOOKUP_LIMIT: usize = 50;

/// Coordinate → location → utility → violations. Every stage degrades to an
/// empty answer instead of failing.
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingSource>,
    fallback: Arc<dyn LocationFallback>,
    directory: Arc<dyn WaterSystemDirectory>,
}

impl LocationResolver {
    pub fn new(
        geocoder: Arc<dyn GeocodingSource>,
        fallback: Arc<dyn LocationFallback>,
        directory: Arc<dyn WaterSystemDirectory>,
    ) -> Self {
        Self {
            geocoder,
            fallback,
            directory,
        }
    }

    pub async fn resolve_location(&self, coordinates: Coordinates) -> LocationInfo {
        match self.geocoder.reverse_geocode(coordinates).await {
            Ok(location) => {
                debug!(
                    city = location.city.as_deref(),
                    county = location.county.as_deref(),
                    state = location.state.as_deref(),
                    zip = location.zip(),
                    "location resolved"
                );
                location
            }
            Err(err) => {
                warn!(
                    geocoder = self.geocoder.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "reverse geocoding failed, using coarse fallback"
                );
                self.fallback.locate(coordinates)
            }
        }
    }

    /// Zip lookup first, then state; the first system of whichever answered wins.
    pub async fn find_utility(&self, location: &LocationInfo) -> Option<WaterSystem> {
        if let Some(zip) = location.zip() {
            match self.directory.systems_by_zip(zip, ZIP_LOOKUP_LIMIT).await {
                Ok(systems) if !systems.is_empty() => {
                    debug!(zip, found = systems.len(), "water systems by zip");
                    return systems.into_iter().next();
                }
                Ok(_) => debug!(zip, "no water systems by zip"),
                Err(err) => warn!(zip, error = %err.redacted(), "zip utility lookup failed"),
            }
        }

        let state_code = location.state_code()?;
        match self
            .directory
            .systems_by_state(state_code, STATE_LOOKUP_LIMIT)
            .await
        {
            Ok(systems) => {
                debug!(state_code, found = systems.len(), "water systems by state");
                systems.into_iter().next()
            }
            Err(err) => {
                warn!(state_code, error = %err.redacted(), "state utility lookup failed");
                None
            }
        }
    }

    pub async fn health_violations(&self, system: &WaterSystem) -> Vec<ViolationRecord> {
        match self
            .directory
            .health_violations(&system.pwsid, VIOLATION_LOOKUP_LIMIT)
            .await
        {
            Ok(violations) => {
                info!(
                    pwsid = %system.pwsid,
                    violations = violations.len(),
                    "health-based violations fetched"
                );
                violations
            }
            Err(err) => {
                warn!(
                    pwsid = %system.pwsid,
                    error = %err.redacted(),
                    "violation lookup failed, treating as none"
                );
                Vec::new()
            }
        }
    }
}
