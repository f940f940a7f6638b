use chrono::{DateTime, Utc};
use envq_core::{AirQuality, Pollutant, QualityError, Score};

use crate::types::{ConditionsResponse, PollutantReading};

/// Maps an AQI to a 0..=100 score along a non-increasing piecewise-linear curve.
///
/// | AQI     | score   |
/// |---------|---------|
/// | 0-50    | 100-80  |
/// | 51-100  | 80-50   |
/// | 101-150 | 50-30   |
/// | 151-200 | 30-15   |
/// | 201-300 | 15-5    |
/// | 300+    | 5-0     |
pub fn score_from_aqi(aqi: u32) -> f64 {
    let aqi = f64::from(aqi);
    let raw = if aqi <= 50.0 {
        100.0 - aqi * 0.4
    } else if aqi <= 100.0 {
        80.0 - (aqi - 50.0) * 0.6
    } else if aqi <= 150.0 {
        50.0 - (aqi - 100.0) * 0.4
    } else if aqi <= 200.0 {
        30.0 - (aqi - 150.0) * 0.3
    } else if aqi <= 300.0 {
        15.0 - (aqi - 200.0) * 0.1
    } else {
        5.0 - (aqi - 300.0) * 0.01
    };
    raw.clamp(0.0, 100.0)
}

/// WHO guideline limit for a pollutant code (case-insensitive).
pub fn guideline_limit(code: &str) -> Option<f64> {
    match code.to_ascii_lowercase().as_str() {
        "pm25" => Some(25.0),
        "pm10" => Some(45.0),
        "no2" => Some(25.0),
        "o3" => Some(100.0),
        "so2" => Some(40.0),
        "co" => Some(4.0),
        _ => None,
    }
}

pub fn map_pollutants(readings: Vec<PollutantReading>) -> Vec<Pollutant> {
    readings
        .into_iter()
        .map(|r| Pollutant {
            limit: guideline_limit(&r.code),
            name: r.code,
            display_name: r.display_name,
            value: r.value,
            unit: r.unit,
            description: r.full_name,
        })
        .collect()
}

/// Scores upstream conditions; a missing AQI is scored and reported as 0.
pub fn score_air_quality(
    conditions: ConditionsResponse,
    timestamp: DateTime<Utc>,
) -> Result<AirQuality, QualityError> {
    let aqi = conditions.aqi.unwrap_or(0);
    let score = Score::saturating(score_from_aqi(aqi))?;
    Ok(AirQuality {
        score,
        aqi: Some(aqi),
        pollutants: map_pollutants(conditions.pollutants),
        location: None,
        timestamp,
    })
}
