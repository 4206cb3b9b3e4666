//! # Calibration
//!
//! Optional per-type multipliers applied to an already-rounded score vector.
//! Calibration is never applied implicitly: callers pass it explicitly to
//! [`crate::scoring::score_with_calibration`] or
//! [`crate::scoring::RecommendationResult::calibrated`].
//!
//! Weights must lie in `[0.5, 1.5]`. Out-of-range or non-finite weights are
//! rejected at construction and on deserialization, never clamped.
//!
//! ## JSON Example
//!
//! ```json
//! { "JPCP": 1.0, "JRCP": 1.1, "CRCP": 0.9, "PCP": 1.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PaveError, PaveResult};
use crate::pavement::{PavementType, PerType};

/// Smallest accepted weight
pub const MIN_WEIGHT: f64 = 0.5;

/// Largest accepted weight
pub const MAX_WEIGHT: f64 = 1.5;

/// Calibrated scores are capped here so they stay on the 0..100 scale
pub const MAX_SCORE: u32 = 100;

/// Validated per-type score multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PerType<f64>", into = "PerType<f64>")]
pub struct Calibration {
    weights: PerType<f64>,
}

impl Calibration {
    /// Validate and wrap a weight vector.
    ///
    /// # Example
    /// ```
    /// use pave_core::pavement::PerType;
    /// use pave_core::scoring::Calibration;
    ///
    /// assert!(Calibration::new(PerType::from_array([1.0, 1.2, 0.8, 1.0])).is_ok());
    /// let err = Calibration::new(PerType::from_array([1.0, 1.0, 2.0, 1.0])).unwrap_err();
    /// assert_eq!(err.error_code(), "CALIBRATION_OUT_OF_RANGE");
    /// ```
    pub fn new(weights: PerType<f64>) -> PaveResult<Self> {
        for (t, weight) in weights.iter() {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(weight) {
                return Err(PaveError::calibration_out_of_range(t.code(), *weight));
            }
        }
        Ok(Calibration { weights })
    }

    /// All weights 1.0
    pub fn identity() -> Self {
        Calibration {
            weights: PerType::splat(1.0),
        }
    }

    pub fn weights(&self) -> &PerType<f64> {
        &self.weights
    }

    pub fn weight(&self, pavement_type: PavementType) -> f64 {
        self.weights[pavement_type]
    }

    pub fn is_identity(&self) -> bool {
        self.weights == PerType::splat(1.0)
    }

    /// Multiply each non-zero score by its weight and round. Zero stays
    /// zero.
    pub fn apply(&self, scores: &PerType<u32>) -> PerType<u32> {
        scores.map(|t, score| {
            if *score == 0 {
                0
            } else {
                ((*score as f64 * self.weights[t]).round() as u32).min(MAX_SCORE)
            }
        })
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::identity()
    }
}

impl TryFrom<PerType<f64>> for Calibration {
    type Error = PaveError;

    fn try_from(weights: PerType<f64>) -> PaveResult<Self> {
        Calibration::new(weights)
    }
}

impl From<Calibration> for PerType<f64> {
    fn from(calibration: Calibration) -> Self {
        calibration.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Calibration::new(PerType::from_array([0.5, 1.5, 1.0, 1.0])).is_ok());
        assert!(Calibration::new(PerType::from_array([0.49, 1.0, 1.0, 1.0])).is_err());
        assert!(Calibration::new(PerType::from_array([1.0, 1.0, 1.0, f64::NAN])).is_err());
    }

    #[test]
    fn test_error_names_offending_type() {
        let err = Calibration::new(PerType::from_array([1.0, 1.0, 1.6, 1.0])).unwrap_err();
        assert_eq!(
            err,
            PaveError::CalibrationOutOfRange {
                pavement_type: "CRCP".to_string(),
                weight: 1.6
            }
        );
    }

    #[test]
    fn test_apply_rounds_and_caps() {
        let calibration = Calibration::new(PerType::from_array([0.5, 1.1, 1.5, 1.0])).unwrap();
        let scores = PerType::from_array([100, 67, 80, 0]);
        assert_eq!(calibration.apply(&scores), PerType::from_array([50, 74, 100, 0]));
    }

    #[test]
    fn test_identity_is_a_no_op() {
        let scores = PerType::from_array([59, 66, 99, 50]);
        assert_eq!(Calibration::identity().apply(&scores), scores);
        assert!(Calibration::default().is_identity());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Calibration = serde_json::from_str(r#"{"JPCP":1.0,"JRCP":1.1,"CRCP":0.9,"PCP":1.0}"#).unwrap();
        assert_eq!(ok.weight(PavementType::Jrcp), 1.1);

        let bad: Result<Calibration, _> = serde_json::from_str(r#"{"JPCP":3.0,"JRCP":1.0,"CRCP":1.0,"PCP":1.0}"#);
        assert!(bad.is_err());
    }
}
