//! # Error Types
//!
//! Structured error types for pave_core. Every variant carries enough
//! context for a caller (human or program) to see which input was rejected
//! and why, and serializes to JSON with a stable `type` tag.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::errors::{PaveError, PaveResult};
//!
//! fn check_samples(sample_size: usize) -> PaveResult<()> {
//!     if sample_size == 0 {
//!         return Err(PaveError::ZeroSampleSize);
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check_samples(0).unwrap_err().error_code(), "ZERO_SAMPLE_SIZE");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pave_core operations
pub type PaveResult<T> = Result<T, PaveError>;

/// Structured error type for advisory operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PaveError {
    /// A parameter value lies outside its enumerated domain, or the
    /// parameter name itself is unknown
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidParameterValue {
        field: String,
        value: String,
        reason: String,
    },

    /// None of the four primary fields was supplied
    #[error("Insufficient input: at least one of {required} must be provided")]
    InsufficientInput { required: String },

    /// Monte Carlo estimate requested with no samples
    #[error("Sample size must be at least 1")]
    ZeroSampleSize,

    /// Monte Carlo estimate requested above the iteration cap
    #[error("Sample size {requested} exceeds the maximum of {max}")]
    SampleSizeTooLarge { requested: usize, max: usize },

    /// A calibration weight lies outside [0.5, 1.5]
    #[error("Calibration weight {weight} for {pavement_type} is outside [0.5, 1.5]")]
    CalibrationOutOfRange { pavement_type: String, weight: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl PaveError {
    /// Create an InvalidParameterValue error
    pub fn invalid_parameter(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PaveError::InvalidParameterValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InsufficientInput error listing the accepted fields
    pub fn insufficient_input(required: &[&str]) -> Self {
        PaveError::InsufficientInput {
            required: required.join(", "),
        }
    }

    /// Create a CalibrationOutOfRange error
    pub fn calibration_out_of_range(pavement_type: impl Into<String>, weight: f64) -> Self {
        PaveError::CalibrationOutOfRange {
            pavement_type: pavement_type.into(),
            weight,
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PaveError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        PaveError::SerializationError { reason: reason.into() }
    }

    /// True when the error was caused by caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PaveError::InvalidParameterValue { .. }
                | PaveError::InsufficientInput { .. }
                | PaveError::ZeroSampleSize
                | PaveError::SampleSizeTooLarge { .. }
                | PaveError::CalibrationOutOfRange { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PaveError::InvalidParameterValue { .. } => "INVALID_PARAMETER_VALUE",
            PaveError::InsufficientInput { .. } => "INSUFFICIENT_INPUT",
            PaveError::ZeroSampleSize => "ZERO_SAMPLE_SIZE",
            PaveError::SampleSizeTooLarge { .. } => "SAMPLE_SIZE_TOO_LARGE",
            PaveError::CalibrationOutOfRange { .. } => "CALIBRATION_OUT_OF_RANGE",
            PaveError::FileError { .. } => "FILE_ERROR",
            PaveError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PaveError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PaveError::invalid_parameter("trafficVolume", "5", "expected one of: 1, 2, 3, 4");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidParameterValue\""));
        let roundtrip: PaveError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serializes_with_tag() {
        let json = serde_json::to_string(&PaveError::ZeroSampleSize).unwrap();
        assert_eq!(json, "{\"type\":\"ZeroSampleSize\"}");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PaveError::ZeroSampleSize.error_code(), "ZERO_SAMPLE_SIZE");
        assert_eq!(
            PaveError::calibration_out_of_range("CRCP", 2.0).error_code(),
            "CALIBRATION_OUT_OF_RANGE"
        );
        assert_eq!(
            PaveError::insufficient_input(&["trafficVolume"]).error_code(),
            "INSUFFICIENT_INPUT"
        );
    }

    #[test]
    fn test_input_errors_are_distinguished() {
        assert!(PaveError::ZeroSampleSize.is_input_error());
        assert!(!PaveError::serialization("bad json").is_input_error());
        assert!(!PaveError::file_error("open", "/tmp/x", "missing").is_input_error());
    }

    #[test]
    fn test_insufficient_input_message_lists_fields() {
        let error = PaveError::insufficient_input(&["trafficVolume", "designLife"]);
        assert_eq!(
            error.to_string(),
            "Insufficient input: at least one of trafficVolume, designLife must be provided"
        );
    }
}
