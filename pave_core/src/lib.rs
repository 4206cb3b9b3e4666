//! # pave_core - Concrete Pavement Advisory Engine
//!
//! `pave_core` recommends one of four rigid pavement types (JPCP, JRCP,
//! CRCP, PCP) for a road project described by a set of categorical
//! parameters, and derives design specifications for the chosen type. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Strict Input**: Unknown fields and out-of-domain values are errors
//! - **Explicit Calibration**: Never global, always passed in
//!
//! ## Quick Start
//!
//! ```rust
//! use pave_core::params::ParameterSet;
//! use pave_core::pavement::PavementType;
//!
//! let params = ParameterSet::from_json(
//!     r#"{ "trafficVolume": "4", "designLife": "40", "subgradeCBR": "4",
//!          "utilityLines": "No", "marineEnvironment": "No" }"#,
//! )?;
//! let result = pave_core::score_pavement_types(&params)?;
//! assert_eq!(result.recommended_type, PavementType::Crcp);
//!
//! let spec = pave_core::derive_design_spec(result.recommended_type, &params);
//! assert_eq!(spec.joint_spacing, "None (except at structures)");
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Typed parameter set and enumerated domains
//! - [`pavement`] - Pavement types and the per-type value container
//! - [`standards`] - Per-type design-code requirement records
//! - [`scoring`] - Weighted scoring engine, calibration, explanation
//! - [`design`] - Thickness, joints, design life, lifecycle cost, guidelines
//! - [`compatibility`] - Requirement-matching model and its self-test
//! - [`probability`] - Monte Carlo recommendation frequencies
//! - [`ensemble`] - Agreement between the two scoring strategies
//! - [`settings`] / [`file_io`] - Persisted calibration and defaults
//! - [`errors`] - Structured error types

pub mod compatibility;
pub mod design;
pub mod ensemble;
pub mod errors;
pub mod file_io;
pub mod params;
pub mod pavement;
pub mod probability;
pub mod scoring;
pub mod settings;
pub mod standards;

use std::path::Path;

// Re-export commonly used types at crate root for convenience
pub use compatibility::{CompatibilityPrediction, ValidationReport};
pub use design::{DesignSpec, GuidelineCategory, LifecycleCost};
pub use ensemble::StrategyComparison;
pub use errors::{PaveError, PaveResult};
pub use params::ParameterSet;
pub use pavement::{PavementType, PerType};
pub use probability::{Estimator, ProbabilityReport};
pub use scoring::{Calibration, ConfidenceLevel, Explanation, RecommendationResult};
pub use settings::AdvisorSettings;

/// Score all four types with the weighted engine and recommend one
pub fn score_pavement_types(params: &ParameterSet) -> PaveResult<RecommendationResult> {
    scoring::score(params)
}

/// Weighted scoring followed by an optional calibration step
pub fn score_with_calibration(
    params: &ParameterSet,
    calibration: Option<&Calibration>,
) -> PaveResult<RecommendationResult> {
    scoring::score_with_calibration(params, calibration)
}

/// Design recommendations for a chosen type
pub fn derive_design_spec(pavement_type: PavementType, params: &ParameterSet) -> DesignSpec {
    design::derive_specs(pavement_type, params)
}

/// Recommend a type with the requirement-matching model
pub fn predict_via_compatibility_model(params: &ParameterSet) -> CompatibilityPrediction {
    compatibility::predict(params)
}

/// Recommendation frequencies over `sample_size` random inputs
pub fn run_monte_carlo_estimate(sample_size: usize) -> PaveResult<ProbabilityReport> {
    probability::estimate(sample_size)
}

/// Plain-language explanation of a scored result
pub fn explain(result: &RecommendationResult, params: &ParameterSet) -> Explanation {
    scoring::explain(result, params)
}

/// Run both strategies and report whether they agree
pub fn compare_strategies(params: &ParameterSet) -> PaveResult<StrategyComparison> {
    ensemble::compare_strategies(params)
}

/// Run the compatibility model against its reference cases
pub fn validate_model() -> ValidationReport {
    compatibility::validate_model()
}

/// Whole-life cost estimate for a type
pub fn lifecycle_cost(pavement_type: PavementType, params: &ParameterSet) -> LifecycleCost {
    design::lifecycle_cost(pavement_type, params)
}

/// Categorized construction guidelines for a type
pub fn construction_guidelines(pavement_type: PavementType, params: &ParameterSet) -> Vec<GuidelineCategory> {
    design::construction_guidelines(pavement_type, params)
}

/// Load a settings file
pub fn load_settings(path: &Path) -> PaveResult<AdvisorSettings> {
    file_io::load_settings(path)
}

/// Save a settings file atomically
pub fn save_settings(settings: &AdvisorSettings, path: &Path) -> PaveResult<()> {
    file_io::save_settings(settings, path)
}
