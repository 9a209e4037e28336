//! Star rating shared by teachers and courses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Error raised when a rating is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be a finite number")]
pub struct RatingValidationError;

/// Rating clamped into `0..=5`.
///
/// Out-of-range values are clamped rather than rejected; only `NaN` and
/// infinities fail.
///
/// # Examples
/// ```
/// use coursehub::domain::Rating;
///
/// assert_eq!(Rating::new(7.5).unwrap().value(), 5.0);
/// assert_eq!(Rating::new(-1.0).unwrap().value(), 0.0);
/// assert!(Rating::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// The default rating of a new record.
    pub const ZERO: Self = Self(0.0);

    /// Clamp `value` into range, rejecting non-finite input.
    pub fn new(value: f64) -> Result<Self, RatingValidationError> {
        if !value.is_finite() {
            return Err(RatingValidationError);
        }
        Ok(Self(value.clamp(0.0, MAX_RATING)))
    }

    /// Resolve an optional input, defaulting to zero.
    pub fn from_optional(value: Option<f64>) -> Result<Self, RatingValidationError> {
        value.map_or(Ok(Self::ZERO), Self::new)
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Total order over ratings, highest first.
    #[must_use]
    pub fn cmp_desc(self, other: Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(4.8, 4.8)]
    #[case(5.0, 5.0)]
    #[case(12.0, 5.0)]
    #[case(-3.0, 0.0)]
    fn clamps_into_range(#[case] input: f64, #[case] expected: f64) {
        let rating = Rating::new(input).expect("finite rating");
        assert!((rating.value() - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_non_finite(#[case] input: f64) {
        assert_eq!(Rating::new(input), Err(RatingValidationError));
    }

    #[rstest]
    fn missing_rating_defaults_to_zero() {
        assert_eq!(Rating::from_optional(None), Ok(Rating::ZERO));
    }

    #[rstest]
    fn cmp_desc_puts_higher_first() {
        let mut ratings = [Rating(1.0), Rating(4.5), Rating(3.0)];
        ratings.sort_by(|a, b| a.cmp_desc(*b));
        assert_eq!(ratings, [Rating(4.5), Rating(3.0), Rating(1.0)]);
    }

    #[rstest]
    fn deserialising_clamps() {
        let rating: Rating = serde_json::from_str("9").expect("deserialise rating");
        assert_eq!(rating.value(), MAX_RATING);
    }
}
