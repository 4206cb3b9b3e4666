//! # Advisor Settings
//!
//! `AdvisorSettings` is the root document of a settings file: optional
//! calibration weights and the Monte Carlo defaults used by the CLI.
//! Settings serialize as human-readable JSON; see [`crate::file_io`] for
//! atomic saves and version checks.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "modified": "2025-01-15T09:30:00Z",
//!   "calibration": { "JPCP": 1.0, "JRCP": 1.1, "CRCP": 0.9, "PCP": 1.0 },
//!   "monteCarlo": { "sampleSize": 1000, "seed": null, "parallel": false }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pave_core::pavement::PerType;
//! use pave_core::scoring::Calibration;
//! use pave_core::settings::AdvisorSettings;
//!
//! let mut settings = AdvisorSettings::new();
//! assert!(settings.calibration()?.is_none());
//!
//! settings.set_calibration(Calibration::new(PerType::from_array([1.0, 1.1, 0.9, 1.0]))?);
//! assert_eq!(settings.calibration()?.map(|c| c.weight(pave_core::pavement::PavementType::Jrcp)), Some(1.1));
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PaveResult;
use crate::pavement::PerType;
use crate::probability::Estimator;
use crate::scoring::Calibration;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default Monte Carlo sample size
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Root settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Last modification time
    pub modified: DateTime<Utc>,

    /// Raw calibration weights. Validated on load and by
    /// [`AdvisorSettings::calibration`].
    #[serde(default)]
    calibration: Option<PerType<f64>>,

    #[serde(default)]
    pub monte_carlo: MonteCarloDefaults,
}

impl AdvisorSettings {
    /// Fresh settings with no calibration and default Monte Carlo options
    pub fn new() -> Self {
        AdvisorSettings {
            version: SCHEMA_VERSION.to_string(),
            modified: Utc::now(),
            calibration: None,
            monte_carlo: MonteCarloDefaults::default(),
        }
    }

    /// Stored calibration, validated.
    ///
    /// Fails with `CalibrationOutOfRange` if the stored weights were edited
    /// out of range by hand.
    pub fn calibration(&self) -> PaveResult<Option<Calibration>> {
        self.calibration.map(Calibration::new).transpose()
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = Some(calibration.into());
        self.touch();
    }

    pub fn clear_calibration(&mut self) {
        self.calibration = None;
        self.touch();
    }

    /// Check every stored value that has a constrained domain
    pub fn validate(&self) -> PaveResult<()> {
        self.calibration().map(|_| ())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        AdvisorSettings::new()
    }
}

/// Defaults for `pave estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloDefaults {
    pub sample_size: usize,
    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for MonteCarloDefaults {
    fn default() -> Self {
        MonteCarloDefaults {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            parallel: false,
        }
    }
}

impl MonteCarloDefaults {
    /// Estimator configured from these defaults, uncalibrated
    pub fn estimator(&self) -> Estimator {
        let estimator = Estimator::new(self.sample_size).parallel(self.parallel);
        match self.seed {
            Some(seed) => estimator.seed(seed),
            None => estimator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::PavementType;

    #[test]
    fn test_new_settings() {
        let settings = AdvisorSettings::new();
        assert_eq!(settings.version, SCHEMA_VERSION);
        assert_eq!(settings.monte_carlo.sample_size, 1000);
        assert!(settings.calibration().unwrap().is_none());
    }

    #[test]
    fn test_set_calibration_touches() {
        let mut settings = AdvisorSettings::new();
        let before = settings.modified;
        let calibration = Calibration::new(PerType::from_array([1.0, 1.0, 1.2, 0.8])).unwrap();
        settings.set_calibration(calibration);
        assert!(settings.modified >= before);
        assert_eq!(settings.calibration().unwrap(), Some(calibration));

        settings.clear_calibration();
        assert!(settings.calibration().unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_weights_fail_validation() {
        let json = r#"{
            "version": "0.1.0",
            "modified": "2025-01-15T09:30:00Z",
            "calibration": { "JPCP": 1.0, "JRCP": 1.0, "CRCP": 3.0, "PCP": 1.0 }
        }"#;
        let settings: AdvisorSettings = serde_json::from_str(json).unwrap();
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "CALIBRATION_OUT_OF_RANGE");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let json = r#"{ "version": "0.1.0", "modified": "2025-01-15T09:30:00Z" }"#;
        let settings: AdvisorSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.monte_carlo, MonteCarloDefaults::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_estimator_from_defaults() {
        let defaults = MonteCarloDefaults {
            sample_size: 200,
            seed: Some(17),
            parallel: true,
        };
        let first = defaults.estimator().run().unwrap();
        let second = defaults.estimator().run().unwrap();
        assert_eq!(first.sample_size, 200);
        assert_eq!(first.seed, 17);
        assert_eq!(first.counts, second.counts);
        assert!(first.counts[PavementType::Pcp] <= 200);
    }
}
