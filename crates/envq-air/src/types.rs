use envq_core::Coordinates;

#[derive(Debug, Clone)]
pub struct ConditionsRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub language_code: Option<String>,
}

impl ConditionsRequest {
    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            language_code: None,
        }
    }
}

/// One pollutant as reported upstream, before limits are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantReading {
    pub code: String,
    pub display_name: String,
    pub full_name: Option<String>,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone)]
pub struct ConditionsResponse {
    pub provider: String,
    /// Universal AQI; `None` when the upstream omitted it.
    pub aqi: Option<u32>,
    pub pollutants: Vec<PollutantReading>,
}
