use envq_core::{Coordinates, QualityError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GoogleGeocodingConfig;
use crate::error::ProviderError;
use crate::traits::GeocodingSource;
use crate::types::LocationInfo;

const RESULT_TYPES: &str = "postal_code|administrative_area_level_2|administrative_area_level_1";

#[derive(Clone)]
pub struct GoogleGeocodingProvider {
    config: GoogleGeocodingConfig,
    client: Client,
}

impl GoogleGeocodingProvider {
    pub fn new(config: GoogleGeocodingConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "google geocoding api key is empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/maps/api/geocode/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn lookup(&self, coordinates: Coordinates) -> Result<LocationInfo, ProviderError> {
        let latlng = coordinates.to_string();
        let res = self
            .client
            .get(self.endpoint())
            .query(&[
                ("latlng", latlng.as_str()),
                ("key", self.config.api_key.as_str()),
                ("result_type", RESULT_TYPES),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let body = res.text().await.map_err(|e| ProviderError::Http(e.without_url()))?;
        let parsed: GeocodeResponse = serde_json::from_str(&body)?;
        parsed.into_location()
    }
}

#[async_trait::async_trait]
impl GeocodingSource for GoogleGeocodingProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<LocationInfo, QualityError> {
        match self.lookup(coordinates).await {
            Ok(location) => {
                debug!(%coordinates, ?location, "reverse geocoded");
                Ok(location)
            }
            Err(err) => {
                let message = err.redacted();
                warn!(%coordinates, error = %message, "reverse geocoding failed");
                Err(QualityError::GeocodingFailed(message))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl AddressComponent {
    fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

impl GeocodeResponse {
    /// Later components overwrite earlier ones across all results.
    fn into_location(self) -> Result<LocationInfo, ProviderError> {
        if self.status != "OK" || self.results.is_empty() {
            return Err(ProviderError::Status {
                status: self.status,
                message: self
                    .error_message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let mut info = LocationInfo::default();
        for component in self.results.into_iter().flat_map(|r| r.address_components) {
            if component.has_type("postal_code") {
                info.zip_code = Some(component.long_name.clone());
            }
            if component.has_type("locality") {
                info.city = Some(component.long_name.clone());
            }
            if component.has_type("administrative_area_level_2") {
                info.county = Some(component.long_name.clone());
            }
            if component.has_type("administrative_area_level_1") {
                info.state = Some(component.long_name);
                info.state_code = Some(component.short_name);
            }
        }
        Ok(info)
    }
}
