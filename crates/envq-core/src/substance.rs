/// An airborne pollutant reading with an optional guideline limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Pollutant {
    pub name: String,
    pub display_name: String,
    pub value: f64,
    pub unit: String,
    pub limit: Option<f64>,
    pub description: Option<String>,
}

impl Pollutant {
    pub fn exceedance_ratio(&self) -> Option<f64> {
        ratio(self.value, self.limit)
    }

    pub fn is_exceeding(&self) -> bool {
        self.exceedance_ratio().is_some_and(|r| r > 1.0)
    }
}

/// A drinking-water contaminant with legal (MCL) and health (MCLG) limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Contaminant {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub legal_limit: Option<f64>,
    pub health_limit: Option<f64>,
    pub description: Option<String>,
}

impl Contaminant {
    /// Health limit when present and nonzero, otherwise the legal limit.
    pub fn applicable_limit(&self) -> Option<f64> {
        self.health_limit
            .filter(|l| *l != 0.0)
            .or(self.legal_limit)
            .filter(|l| *l != 0.0)
    }

    pub fn exceedance_ratio(&self) -> Option<f64> {
        ratio(self.value, self.applicable_limit())
    }

    pub fn is_exceeding(&self) -> bool {
        self.exceedance_ratio().is_some_and(|r| r > 1.0)
    }

    /// `"{ratio:.1}x limit"`, only while exceeding.
    pub fn exceedance_label(&self) -> Option<String> {
        self.exceedance_ratio()
            .filter(|r| *r > 1.0)
            .map(|r| format!("{r:.1}x limit"))
    }
}

/// Defined only as a positive, finite quotient.
fn ratio(value: f64, limit: Option<f64>) -> Option<f64> {
    match limit {
        Some(l) if l != 0.0 && l.is_finite() => {
            Some(value / l).filter(|r| *r > 0.0 && r.is_finite())
        }
        _ => None,
    }
}
