use std::collections::HashMap;

use envq_core::{Contaminant, QualityError, Score};
use tracing::debug;

use crate::types::ViolationRecord;

pub const DEFAULT_UNIT: &str = "mg/L";
pub const GENERIC_DESCRIPTION: &str = "Water contaminant";
/// Upper bound on the penalty a single contaminant contributes.
pub const MAX_PENALTY_PER_CONTAMINANT: f64 = 50.0;

struct TrackedContaminant {
    code: &'static str,
    name: &'static str,
    description: &'static str,
}

const TRACKED: [TrackedContaminant; 5] = [
    TrackedContaminant {
        code: "HAA5",
        name: "Haloacetic acids (HAA5)",
        description: "Byproducts of water disinfection",
    },
    TrackedContaminant {
        code: "HAA9",
        name: "Haloacetic acids (HAA9)",
        description: "Byproducts of water disinfection",
    },
    TrackedContaminant {
        code: "TTHM",
        name: "Total Trihalomethanes",
        description: "Byproducts of water disinfection",
    },
    TrackedContaminant {
        code: "TCE",
        name: "Tetrachloroethylene",
        description: "Industrial solvent",
    },
    TrackedContaminant {
        code: "BROMATE",
        name: "Bromate",
        description: "Byproduct of water disinfection",
    },
];

fn tracked(code: &str) -> Option<&'static TrackedContaminant> {
    TRACKED.iter().find(|t| t.code == code)
}

fn to_contaminant(v: &ViolationRecord) -> Contaminant {
    let (name, description) = match tracked(&v.contaminant_code) {
        Some(t) => (t.name.to_string(), t.description.to_string()),
        None => (
            v.analyte_name
                .clone()
                .unwrap_or_else(|| v.contaminant_code.clone()),
            GENERIC_DESCRIPTION.to_string(),
        ),
    };
    Contaminant {
        name,
        value: v.measure,
        unit: v
            .unit
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        legal_limit: v.mcl,
        health_limit: v.mclg,
        description: Some(description),
    }
}

/// One contaminant per contaminant code.
///
/// A repeated code replaces the earlier entry in place: the last violation
/// wins, at the position where the code first appeared. This is not a
/// most-severe selection.
pub fn map_contaminants(violations: &[ViolationRecord]) -> Vec<Contaminant> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<Contaminant> = Vec::new();
    for v in violations {
        let contaminant = to_contaminant(v);
        match slots.get(v.contaminant_code.as_str()) {
            Some(&i) => {
                if let Some(slot) = out.get_mut(i) {
                    *slot = contaminant;
                }
            }
            None => {
                slots.insert(v.contaminant_code.as_str(), out.len());
                out.push(contaminant);
            }
        }
    }
    out
}

/// Penalty contributed by one contaminant: `min(50, ratio * 10)` while exceeding.
pub fn contaminant_penalty(c: &Contaminant) -> f64 {
    match c.exceedance_ratio() {
        Some(ratio) if ratio > 1.0 => (ratio * 10.0).min(MAX_PENALTY_PER_CONTAMINANT),
        _ => 0.0,
    }
}

/// `max(0, 100 - total penalty)`; an empty list scores 100.
pub fn score_contaminants(contaminants: &[Contaminant]) -> Result<Score, QualityError> {
    if contaminants.is_empty() {
        return Score::new(100.0);
    }
    let total: f64 = contaminants.iter().map(contaminant_penalty).sum();
    debug!(
        contaminants = contaminants.len(),
        penalty = total,
        "water penalty accumulated"
    );
    Score::new((100.0 - total).max(0.0))
}
