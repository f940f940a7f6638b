//! Serialized view of an [`EnvironmentalQuality`] assessment.
//!
//! Optional scalars are omitted when absent; `exceedanceRatio` and
//! `exceedanceLabel` are always emitted and become `null` when undefined.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::quality::{AirQuality, EnvironmentalQuality, WaterQuality};
use crate::score::QualityRating;
use crate::substance::{Contaminant, Pollutant};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesReport {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantReport {
    pub name: String,
    pub display_name: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exceeds_limit: bool,
    pub exceedance_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReport {
    pub score: u8,
    pub rating: QualityRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<u32>,
    pub pollutants: Vec<PollutantReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContaminantReport {
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exceeds_limit: bool,
    pub exceedance_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterQualityReport {
    pub score: u8,
    pub rating: QualityRating,
    pub contaminants: Vec<ContaminantReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utility_name: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReport {
    pub coordinates: CoordinatesReport,
    pub air_quality: AirQualityReport,
    pub water_quality: WaterQualityReport,
    pub overall_health: QualityRating,
    pub timestamp: String,
}

pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Pollutant> for PollutantReport {
    fn from(p: &Pollutant) -> Self {
        Self {
            name: p.name.clone(),
            display_name: p.display_name.clone(),
            value: p.value,
            unit: p.unit.clone(),
            limit: p.limit,
            description: p.description.clone(),
            exceeds_limit: p.is_exceeding(),
            exceedance_ratio: p.exceedance_ratio(),
        }
    }
}

impl From<&Contaminant> for ContaminantReport {
    fn from(c: &Contaminant) -> Self {
        Self {
            name: c.name.clone(),
            value: c.value,
            unit: c.unit.clone(),
            legal_limit: c.legal_limit,
            health_limit: c.health_limit,
            description: c.description.clone(),
            exceeds_limit: c.is_exceeding(),
            exceedance_label: c.exceedance_label(),
        }
    }
}

impl AirQuality {
    pub fn to_report(&self) -> AirQualityReport {
        AirQualityReport {
            score: self.score.value(),
            rating: self.score.rating(),
            aqi: self.aqi,
            pollutants: self.pollutants.iter().map(PollutantReport::from).collect(),
            location: self.location.clone(),
            timestamp: iso_timestamp(&self.timestamp),
        }
    }
}

impl WaterQuality {
    pub fn to_report(&self) -> WaterQualityReport {
        WaterQualityReport {
            score: self.score.value(),
            rating: self.score.rating(),
            contaminants: self
                .contaminants
                .iter()
                .map(ContaminantReport::from)
                .collect(),
            location: self.location.clone(),
            utility_name: self.utility_name.clone(),
            timestamp: iso_timestamp(&self.timestamp),
        }
    }
}

impl EnvironmentalQuality {
    pub fn to_report(&self) -> EnvironmentalReport {
        EnvironmentalReport {
            coordinates: CoordinatesReport {
                latitude: self.coordinates.latitude(),
                longitude: self.coordinates.longitude(),
            },
            air_quality: self.air_quality.to_report(),
            water_quality: self.water_quality.to_report(),
            overall_health: self.overall_health(),
            timestamp: iso_timestamp(&self.timestamp),
        }
    }
}
