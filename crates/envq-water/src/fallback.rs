use envq_core::Coordinates;
use tracing::debug;

use crate::traits::LocationFallback;
use crate::types::LocationInfo;

/// Inclusive latitude/longitude rectangle mapped to a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateBox {
    pub state_code: &'static str,
    pub state: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl StateBox {
    pub fn contains(&self, coordinates: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinates.latitude())
            && (self.min_lon..=self.max_lon).contains(&coordinates.longitude())
    }
}

/// Checked in order; the first match wins where boxes overlap.
pub const US_STATE_BOXES: [StateBox; 4] = [
    StateBox {
        state_code: "NY",
        state: "New York",
        min_lat: 40.4,
        max_lat: 45.0,
        min_lon: -79.8,
        max_lon: -71.8,
    },
    StateBox {
        state_code: "CA",
        state: "California",
        min_lat: 32.5,
        max_lat: 42.0,
        min_lon: -124.4,
        max_lon: -114.1,
    },
    StateBox {
        state_code: "TX",
        state: "Texas",
        min_lat: 25.8,
        max_lat: 36.5,
        min_lon: -106.6,
        max_lon: -93.5,
    },
    StateBox {
        state_code: "FL",
        state: "Florida",
        min_lat: 24.5,
        max_lat: 31.0,
        min_lon: -87.6,
        max_lon: -80.0,
    },
];

/// Coarse state lookup from hard-coded boxes. Yields a state only, never a zip
/// or city; points outside every box resolve to `US`.
#[derive(Debug, Clone)]
pub struct BoundingBoxFallback {
    boxes: Vec<StateBox>,
    default_code: &'static str,
    default_name: &'static str,
}

impl BoundingBoxFallback {
    pub fn new(boxes: Vec<StateBox>) -> Self {
        Self {
            boxes,
            default_code: "US",
            default_name: "United States",
        }
    }
}

impl Default for BoundingBoxFallback {
    fn default() -> Self {
        Self::new(US_STATE_BOXES.to_vec())
    }
}

impl LocationFallback for BoundingBoxFallback {
    fn name(&self) -> &'static str {
        "bounding-box"
    }

    fn locate(&self, coordinates: Coordinates) -> LocationInfo {
        let (code, name) = self
            .boxes
            .iter()
            .find(|b| b.contains(coordinates))
            .map_or((self.default_code, self.default_name), |b| {
                (b.state_code, b.state)
            });
        debug!(%coordinates, state_code = code, "bounding-box location fallback");
        LocationInfo {
            state: Some(name.to_string()),
            state_code: Some(code.to_string()),
            ..LocationInfo::default()
        }
    }
}
