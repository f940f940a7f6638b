use chrono::{DateTime, Utc};

use crate::coordinates::Coordinates;
use crate::score::{QualityRating, Score};
use crate::substance::{Contaminant, Pollutant};

#[derive(Debug, Clone, PartialEq)]
pub struct AirQuality {
    pub score: Score,
    pub aqi: Option<u32>,
    /// Upstream response order.
    pub pollutants: Vec<Pollutant>,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AirQuality {
    pub fn pollutant_by_name(&self, name: &str) -> Option<&Pollutant> {
        self.pollutants.iter().find(|p| p.name == name)
    }

    pub fn exceeding_pollutants(&self) -> Vec<&Pollutant> {
        self.pollutants.iter().filter(|p| p.is_exceeding()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterQuality {
    pub score: Score,
    pub contaminants: Vec<Contaminant>,
    pub location: Option<String>,
    pub utility_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl WaterQuality {
    pub const DEFAULT_SCORE: u8 = 75;

    /// Degraded result used when no serving utility can be determined.
    pub fn unknown(location: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            score: Score::from_trusted(Self::DEFAULT_SCORE),
            contaminants: Vec::new(),
            location: Some(location.into()),
            utility_name: None,
            timestamp,
        }
    }

    pub fn contaminant_by_name(&self, name: &str) -> Option<&Contaminant> {
        self.contaminants.iter().find(|c| c.name == name)
    }

    pub fn exceeding_contaminants(&self) -> Vec<&Contaminant> {
        self.contaminants.iter().filter(|c| c.is_exceeding()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentalQuality {
    pub coordinates: Coordinates,
    pub air_quality: AirQuality,
    pub water_quality: WaterQuality,
    pub timestamp: DateTime<Utc>,
}

impl EnvironmentalQuality {
    pub fn overall_health(&self) -> QualityRating {
        Score::combined_rating(self.air_quality.score, self.water_quality.score)
    }
}
