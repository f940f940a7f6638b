use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GoogleAirQualityConfig;
use crate::error::ProviderError;
use crate::traits::AirQualityProvider;
use crate::types::{ConditionsRequest, ConditionsResponse, PollutantReading};

const UNIVERSAL_AQI_CODE: &str = "uaqi";

#[derive(Clone)]
pub struct GoogleAirQualityProvider {
    config: GoogleAirQualityConfig,
    client: Client,
}

impl GoogleAirQualityProvider {
    pub fn new(config: GoogleAirQualityConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "google air quality api key is empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn lookup_url(&self) -> String {
        format!(
            "{}/v1/currentConditions:lookup?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key
        )
    }
}

#[async_trait::async_trait]
impl AirQualityProvider for GoogleAirQualityProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn current_conditions(
        &self,
        request: ConditionsRequest,
    ) -> Result<ConditionsResponse, ProviderError> {
        let payload = LookupRequest {
            location: LatLng {
                latitude: request.latitude,
                longitude: request.longitude,
            },
            extra_computations: vec![
                "HEALTH_RECOMMENDATIONS",
                "DOMINANT_POLLUTANT_CONCENTRATION",
            ],
            language_code: request
                .language_code
                .unwrap_or_else(|| self.config.language_code.clone()),
        };

        let res = self
            .client
            .post(self.lookup_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let body = res.text().await.map_err(|e| ProviderError::Http(e.without_url()))?;
        let parsed: LookupResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_conditions(self.name()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest {
    location: LatLng,
    extra_computations: Vec<&'static str>,
    language_code: String,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    indexes: Vec<AqiIndex>,
    #[serde(default)]
    pollutants: Vec<GooglePollutant>,
}

#[derive(Debug, Deserialize)]
struct AqiIndex {
    code: String,
    #[serde(default)]
    aqi: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GooglePollutant {
    code: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    concentration: Concentration,
}

#[derive(Debug, Deserialize)]
struct Concentration {
    value: f64,
    units: String,
}

impl LookupResponse {
    fn into_conditions(self, provider: &str) -> ConditionsResponse {
        let aqi = self
            .indexes
            .iter()
            .find(|idx| idx.code == UNIVERSAL_AQI_CODE)
            .and_then(|idx| idx.aqi);
        let pollutants = self
            .pollutants
            .into_iter()
            .map(|p| PollutantReading {
                display_name: p.display_name.unwrap_or_else(|| p.code.clone()),
                code: p.code,
                full_name: p.full_name,
                value: p.concentration.value,
                unit: p.concentration.units,
            })
            .collect();
        ConditionsResponse {
            provider: provider.to_string(),
            aqi,
            pollutants,
        }
    }
}
