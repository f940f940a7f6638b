/// Administrative location resolved for a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationInfo {
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
}

impl LocationInfo {
    /// Whether any field usable for a utility lookup is present.
    pub fn has_lookup_key(&self) -> bool {
        [&self.zip_code, &self.county, &self.state_code]
            .into_iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }

    pub fn zip(&self) -> Option<&str> {
        non_blank(self.zip_code.as_deref())
    }

    pub fn state_code(&self) -> Option<&str> {
        non_blank(self.state_code.as_deref())
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// A public water system (utility) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterSystem {
    pub pwsid: String,
    pub name: String,
    pub primacy_agency_code: Option<String>,
    pub population_served: Option<u64>,
}

/// A health-based violation, normalized at the directory boundary.
///
/// `measure` is 0 when the upstream value was missing or unparsable; `mcl` and
/// `mclg` are absent in the same case and also when zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationRecord {
    pub contaminant_code: String,
    pub analyte_name: Option<String>,
    pub measure: f64,
    pub unit: Option<String>,
    pub mcl: Option<f64>,
    pub mclg: Option<f64>,
}
