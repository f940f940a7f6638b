use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GoogleGeocodingConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GoogleGeocodingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://maps.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EpaDirectoryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl EpaDirectoryConfig {
    pub fn new() -> Self {
        Self {
            base_url: "https://data.epa.gov/efservice".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for EpaDirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum GeocodingProviderConfig {
    Google(GoogleGeocodingConfig),
}

#[derive(Debug, Clone)]
pub enum WaterDirectoryConfig {
    Epa(EpaDirectoryConfig),
}
