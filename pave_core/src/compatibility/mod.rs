//! # Compatibility Model
//!
//! An alternative scoring strategy that grades each supplied field against
//! the typed requirement record of every pavement type (see
//! [`crate::standards`]). It is kept separate from the weighted scoring
//! engine on purpose: the two weigh evidence differently and can disagree,
//! and [`crate::ensemble`] reports when they do.
//!
//! ## Scoring
//!
//! Each present field contributes `weight * credit`, where the credit comes
//! from a graded match rule (full, partial, zero, or negative). The type score
//! is `accumulated / total_weight * 100`, or 50 when no field was supplied.
//!
//! ## Hazard swap
//!
//! CRCP is unsuitable for marine sites, dense utility lines and manual
//! construction. When CRCP wins while any of those is `Yes` and the runner-up
//! reaches 80% of its score, the two swap. One swap at most.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::compatibility::predict;
//! use pave_core::params::ParameterSet;
//! use pave_core::pavement::PavementType;
//!
//! let params = ParameterSet::from_pairs([
//!     ("trafficVolume", "2"),
//!     ("designLife", "20"),
//!     ("subgradeCBR", "3"),
//!     ("slabThickness", "200"),
//! ])?;
//! let prediction = predict(&params);
//! assert_eq!(prediction.top_type, PavementType::Jpcp);
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

pub mod matching;
pub mod performance;
pub mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;
use crate::pavement::{PavementType, PerType};
use crate::standards;

pub use matching::{compatibility_score, MatchDetail, TypeCompatibility};
pub use performance::{assess, PerformanceReport};
pub use validation::{validate_model, ValidationCase, ValidationReport};

/// Fraction of the CRCP score the runner-up needs for the hazard swap
pub const HAZARD_SWAP_RATIO: f64 = 0.8;

/// Score reported when no field contributed
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Requirement attributes graded by the compatibility model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    TrafficVolume,
    DesignLife,
    #[serde(rename = "subgradeCBR")]
    SubgradeCbr,
    SlabThickness,
    SteelReinforcement,
    TransverseJoints,
    LongitudinalJoints,
    Shoulders,
    AntiFrictionLayer,
    EdgeSupport,
    TerminalSlabs,
    SpecialJoints,
    SurfaceTexture,
    Maintenance,
    InitialCost,
    NotForLightTraffic,
    MarineEnvironment,
    UtilityLines,
    ManualConstruction,
}

impl Feature {
    pub const ALL: [Feature; 19] = [
        Feature::TrafficVolume,
        Feature::DesignLife,
        Feature::SubgradeCbr,
        Feature::SlabThickness,
        Feature::SteelReinforcement,
        Feature::TransverseJoints,
        Feature::LongitudinalJoints,
        Feature::Shoulders,
        Feature::AntiFrictionLayer,
        Feature::EdgeSupport,
        Feature::TerminalSlabs,
        Feature::SpecialJoints,
        Feature::SurfaceTexture,
        Feature::Maintenance,
        Feature::InitialCost,
        Feature::NotForLightTraffic,
        Feature::MarineEnvironment,
        Feature::UtilityLines,
        Feature::ManualConstruction,
    ];

    /// Relative importance. Weights are only compared with each other, so
    /// they do not sum to any fixed total.
    pub fn weight(&self) -> f64 {
        match self {
            Feature::TrafficVolume => 15.0,
            Feature::DesignLife => 12.0,
            Feature::SubgradeCbr => 10.0,
            Feature::SlabThickness => 10.0,
            Feature::SteelReinforcement => 8.0,
            Feature::TransverseJoints => 8.0,
            Feature::LongitudinalJoints => 8.0,
            Feature::Shoulders => 6.0,
            Feature::AntiFrictionLayer => 5.0,
            Feature::EdgeSupport => 7.0,
            Feature::TerminalSlabs => 5.0,
            Feature::SpecialJoints => 5.0,
            Feature::SurfaceTexture => 4.0,
            Feature::Maintenance => 7.0,
            Feature::InitialCost => 9.0,
            Feature::NotForLightTraffic => 8.0,
            Feature::MarineEnvironment => 9.0,
            Feature::UtilityLines => 8.0,
            Feature::ManualConstruction => 8.0,
        }
    }

    /// Parameter name this feature reads
    pub fn field_name(&self) -> &'static str {
        match self {
            Feature::TrafficVolume => "trafficVolume",
            Feature::DesignLife => "designLife",
            Feature::SubgradeCbr => "subgradeCBR",
            Feature::SlabThickness => "slabThickness",
            Feature::SteelReinforcement => "steelReinforcement",
            Feature::TransverseJoints => "transverseJoints",
            Feature::LongitudinalJoints => "longitudinalJoints",
            Feature::Shoulders => "shoulders",
            Feature::AntiFrictionLayer => "antiFrictionLayer",
            Feature::EdgeSupport => "edgeSupport",
            Feature::TerminalSlabs => "terminalSlabs",
            Feature::SpecialJoints => "specialJoints",
            Feature::SurfaceTexture => "surfaceTexture",
            Feature::Maintenance => "maintenance",
            Feature::InitialCost => "initialCost",
            Feature::NotForLightTraffic => "notForLightTraffic",
            Feature::MarineEnvironment => "marineEnvironment",
            Feature::UtilityLines => "utilityLines",
            Feature::ManualConstruction => "manualConstruction",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Output of the compatibility model.
///
/// ## JSON Example
///
/// ```json
/// {
///   "topType": "JPCP",
///   "confidenceScore": 1.0,
///   "alternativeType": "JRCP",
///   "alternativeScore": 0.816,
///   "perTypeScores": { "JPCP": 100.0, "JRCP": 81.6, "CRCP": 5.9, "PCP": 63.0 },
///   "ranking": ["JPCP", "JRCP", "PCP", "CRCP"],
///   "swapped": false,
///   "matchDetails": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityPrediction {
    pub top_type: PavementType,
    /// Top score / 100, clamped to [0, 1]
    pub confidence_score: f64,
    pub alternative_type: PavementType,
    /// Alternative score / 100, clamped to [0, 1]
    pub alternative_score: f64,
    /// Raw compatibility scores (may be negative)
    pub per_type_scores: PerType<f64>,
    /// Types by descending raw score, before any hazard swap
    pub ranking: [PavementType; 4],
    /// Whether the CRCP hazard swap fired
    pub swapped: bool,
    /// Graded rules for the top type
    pub match_details: Vec<MatchDetail>,
}

impl CompatibilityPrediction {
    /// Raw score of the top type
    pub fn top_score(&self) -> f64 {
        self.per_type_scores[self.top_type]
    }

    /// Whether `t` is among the three best raw scores
    pub fn in_top_three(&self, t: PavementType) -> bool {
        self.ranking[..3].contains(&t)
    }
}

fn hazard_present(params: &ParameterSet) -> bool {
    params.is_marine() || params.has_utility_lines() || params.is_manual_construction()
}

/// Score every type against its requirement record and pick the best,
/// applying the CRCP hazard swap.
pub fn predict(params: &ParameterSet) -> CompatibilityPrediction {
    let mut compat = PerType::from_fn(|t| compatibility_score(standards::profile(t), params));
    let scores = compat.map(|_, c| c.score);

    let ranking = scores.ranked();
    let (mut top, mut alternative) = (ranking[0], ranking[1]);

    let swapped = top == PavementType::Crcp
        && scores[top] > 0.0
        && hazard_present(params)
        && scores[alternative] >= HAZARD_SWAP_RATIO * scores[top];
    if swapped {
        tracing::debug!(
            crcp = scores[top],
            alternative = %alternative,
            alternative_score = scores[alternative],
            "CRCP hazard present, swapping recommendation"
        );
        std::mem::swap(&mut top, &mut alternative);
    }

    CompatibilityPrediction {
        top_type: top,
        confidence_score: (scores[top] / 100.0).clamp(0.0, 1.0),
        alternative_type: alternative,
        alternative_score: (scores[alternative] / 100.0).clamp(0.0, 1.0),
        per_type_scores: scores,
        ranking,
        swapped,
        match_details: std::mem::take(&mut compat[top].details),
    }
}
