use std::fmt;

use serde::Serialize;

use crate::error::QualityError;

/// A validated WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QualityError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(QualityError::InvalidCoordinate(
                "Latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(QualityError::InvalidCoordinate(
                "Longitude must be between -180 and 180".to_string(),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_edges() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = Coordinates::new(91.0, 0.0).expect_err("latitude 91");
        assert_eq!(
            err,
            QualityError::InvalidCoordinate("Latitude must be between -90 and 90".to_string())
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err = Coordinates::new(0.0, 181.0).expect_err("longitude 181");
        assert_eq!(
            err,
            QualityError::InvalidCoordinate("Longitude must be between -180 and 180".to_string())
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn displays_as_latlng_pair() {
        let c = Coordinates::new(40.7128, -74.006).expect("valid");
        assert_eq!(c.to_string(), "40.7128,-74.006");
    }
}
