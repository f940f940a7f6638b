use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QualityError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid score {0}: score must be between 0 and 100")]
    InvalidScore(f64),

    #[error("Failed to fetch air quality data: {0}")]
    AirQualityFetchFailed(String),

    #[error("Failed to fetch water quality data: {0}")]
    WaterQualityFetchFailed(String),

    /// Recovered inside the water path; never returned from the aggregator.
    #[error("Failed to reverse geocode coordinates: {0}")]
    GeocodingFailed(String),
}

impl QualityError {
    /// True when the caller should fix its input rather than retry.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidCoordinate(_))
    }
}

/// Scrubs `key=<value>` query parameters so upstream errors can be logged.
pub fn redact_secrets(input: &str) -> String {
    const MARKER: &str = "key=";
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(MARKER) {
        let (head, tail) = rest.split_at(pos + MARKER.len());
        out.push_str(head);
        let end = tail
            .find(|c: char| matches!(c, '&' | ' ' | '"' | '\'' | ')' | '\n'))
            .unwrap_or(tail.len());
        if end > 0 {
            out.push_str("[REDACTED]");
        }
        rest = tail.get(end..).unwrap_or_default();
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_key_query_params() {
        let raw = "error sending request for url (https://x.test/v1/lookup?key=AIza123&lang=en)";
        assert_eq!(
            redact_secrets(raw),
            "error sending request for url (https://x.test/v1/lookup?key=[REDACTED]&lang=en)"
        );
        assert_eq!(redact_secrets("api_key=abc"), "api_key=[REDACTED]");
        assert_eq!(redact_secrets("no secrets here"), "no secrets here");
        assert_eq!(redact_secrets("key="), "key=");
    }

    #[test]
    fn only_coordinate_errors_are_client_errors() {
        assert!(QualityError::InvalidCoordinate("lat".to_string()).is_invalid_input());
        assert!(!QualityError::InvalidScore(101.0).is_invalid_input());
        assert!(!QualityError::AirQualityFetchFailed("down".to_string()).is_invalid_input());
        assert!(!QualityError::WaterQualityFetchFailed("down".to_string()).is_invalid_input());
        assert!(!QualityError::GeocodingFailed("denied".to_string()).is_invalid_input());
    }

    #[test]
    fn messages_carry_context() {
        let err = QualityError::InvalidCoordinate("Latitude must be between -90 and 90".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid coordinates: Latitude must be between -90 and 90"
        );
    }
}
