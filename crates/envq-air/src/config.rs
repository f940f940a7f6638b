use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GoogleAirQualityConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub language_code: String,
}

impl GoogleAirQualityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://airquality.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
            language_code: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AirQualityProviderConfig {
    Google(GoogleAirQualityConfig),
}
