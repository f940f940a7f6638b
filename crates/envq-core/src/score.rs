use std::fmt;

use serde::Serialize;

use crate::error::QualityError;

/// Five-band rating derived from a 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QualityRating {
    Bad,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityRating {
    /// Bands are inclusive on the lower edge and checked top-down.
    pub fn from_value(value: u8) -> Self {
        if value >= 80 {
            Self::Excellent
        } else if value >= 60 {
            Self::Good
        } else if value >= 40 {
            Self::Fair
        } else if value >= 20 {
            Self::Poor
        } else {
            Self::Bad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Bad => "Bad",
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer quality score in `0..=100`.
///
/// The input is validated before rounding, so `100.4` is rejected rather than
/// rounded down. Rounding is half-away-from-zero (`75.5` stores `76`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: f64) -> Result<Self, QualityError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(QualityError::InvalidScore(value));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = value.round() as u8;
        Ok(Self(rounded))
    }

    /// Clamps before construction; for computed curves that may drift past the edges.
    pub fn saturating(value: f64) -> Result<Self, QualityError> {
        Self::new(value.clamp(0.0, 100.0))
    }

    pub(crate) const fn from_trusted(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn rating(&self) -> QualityRating {
        QualityRating::from_value(self.0)
    }

    /// Rating of the rounded mean of two scores.
    pub fn combined_rating(a: Self, b: Self) -> QualityRating {
        let mean = (f64::from(a.0) + f64::from(b.0)) / 2.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = mean.round() as u8;
        QualityRating::from_value(rounded)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f64) -> Score {
        Score::new(v).expect("valid score")
    }

    #[test]
    fn stores_rounded_value() {
        assert_eq!(score(75.0).value(), 75);
        assert_eq!(score(75.7).value(), 76);
        assert_eq!(score(75.5).value(), 76);
        assert_eq!(score(0.4).value(), 0);
        assert_eq!(score(99.5).value(), 100);
    }

    #[test]
    fn rejects_out_of_range_input_before_rounding() {
        assert_eq!(Score::new(-0.1), Err(QualityError::InvalidScore(-0.1)));
        assert_eq!(Score::new(100.1), Err(QualityError::InvalidScore(100.1)));
        assert!(Score::new(-1.0).is_err());
        assert!(Score::new(101.0).is_err());
        assert!(Score::new(f64::NAN).is_err());
    }

    #[test]
    fn saturating_clamps_instead_of_failing() {
        assert_eq!(Score::saturating(-12.0).expect("clamped").value(), 0);
        assert_eq!(Score::saturating(140.0).expect("clamped").value(), 100);
    }

    #[test]
    fn rating_boundaries() {
        let cases = [
            (0, QualityRating::Bad),
            (19, QualityRating::Bad),
            (20, QualityRating::Poor),
            (39, QualityRating::Poor),
            (40, QualityRating::Fair),
            (59, QualityRating::Fair),
            (60, QualityRating::Good),
            (79, QualityRating::Good),
            (80, QualityRating::Excellent),
            (100, QualityRating::Excellent),
        ];
        for (value, expected) in cases {
            assert_eq!(score(f64::from(value)).rating(), expected, "score {value}");
        }
    }

    #[test]
    fn rating_is_monotonic_over_domain() {
        let mut prev = QualityRating::Bad;
        for v in 0..=Score::MAX {
            let r = QualityRating::from_value(v);
            assert!(r >= prev, "rating dropped at {v}");
            prev = r;
        }
    }

    #[test]
    fn combined_rating_averages_scores_not_ratings() {
        assert_eq!(
            Score::combined_rating(score(75.0), score(25.0)),
            QualityRating::Fair
        );
        // 79.5 rounds up into the top band.
        assert_eq!(
            Score::combined_rating(score(80.0), score(79.0)),
            QualityRating::Excellent
        );
        assert_eq!(
            Score::combined_rating(score(100.0), score(0.0)),
            QualityRating::Fair
        );
    }

    #[test]
    fn rating_serializes_as_label() {
        let json = serde_json::to_string(&QualityRating::Excellent).expect("serialize");
        assert_eq!(json, "\"Excellent\"");
        assert_eq!(QualityRating::Poor.to_string(), "Poor");
    }
}
