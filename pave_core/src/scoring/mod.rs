//! # Weighted Scoring Engine
//!
//! Scores the four pavement types from a (possibly partial) parameter set
//! and recommends one.
//!
//! ## Method
//!
//! 1. Sum the factor tables of the primary fields present, weighted
//!    traffic 0.30, design life 0.20, subgrade 0.15, slab 0.10
//!    ([`tables`]).
//! 2. Add the environment (0.10) and construction (0.15) vectors, which
//!    always apply.
//! 3. Run the adjustment pipeline: scenarios, favorable conditions,
//!    balance, floor, normalize ([`pipeline`]).
//! 4. Scale to 0..100, round, and pick the highest (ties go to JPCP, JRCP,
//!    CRCP, PCP in that order).
//!
//! Confidence comes from the winning score and its margin; reliability is a
//! separate heuristic over the completeness and consistency of the input.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::params::ParameterSet;
//! use pave_core::pavement::PavementType;
//! use pave_core::scoring::{score, ConfidenceLevel};
//!
//! let params = ParameterSet::from_pairs([
//!     ("trafficVolume", "2"),
//!     ("designLife", "20"),
//!     ("subgradeCBR", "3"),
//!     ("slabThickness", "200"),
//! ])?;
//! let result = score(&params)?;
//! assert_eq!(result.recommended_type, PavementType::Jpcp);
//! assert_eq!(result.confidence_level, ConfidenceLevel::VeryHigh);
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

pub mod calibration;
pub mod explanation;
pub mod pipeline;
pub mod tables;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PaveError, PaveResult};
use crate::params::{
    DesignLife, ParameterSet, SlabThickness, SubgradeCbr, TrafficVolume, YesNo, PRIMARY_FIELDS,
};
use crate::pavement::{PavementType, PerType};

pub use calibration::Calibration;
pub use explanation::{explain, Explanation};

/// Qualitative confidence in a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 5] = [
        ConfidenceLevel::VeryLow,
        ConfidenceLevel::Low,
        ConfidenceLevel::Moderate,
        ConfidenceLevel::High,
        ConfidenceLevel::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "Very Low",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::VeryHigh => "Very High",
        }
    }

    fn from_highest_score(highest: u32) -> Self {
        if highest >= 90 {
            ConfidenceLevel::VeryHigh
        } else if highest >= 80 {
            ConfidenceLevel::High
        } else if highest >= 70 {
            ConfidenceLevel::Moderate
        } else if highest >= 60 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    /// Level for a winning score and its margin over the runner-up.
    ///
    /// A margin below 5 drops Moderate and above by one level. A margin of
    /// 15 or more lifts Low and Moderate by one level.
    pub fn assess(highest: u32, difference: u32) -> Self {
        let level = Self::from_highest_score(highest);
        if difference < 5 {
            match level {
                ConfidenceLevel::VeryHigh => ConfidenceLevel::High,
                ConfidenceLevel::High => ConfidenceLevel::Moderate,
                ConfidenceLevel::Moderate => ConfidenceLevel::Low,
                other => other,
            }
        } else if difference >= 15 {
            match level {
                ConfidenceLevel::Low => ConfidenceLevel::Moderate,
                ConfidenceLevel::Moderate => ConfidenceLevel::High,
                other => other,
            }
        } else {
            level
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scored recommendation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "scores": { "JPCP": 100, "JRCP": 67, "CRCP": 55, "PCP": 63 },
///   "recommendedType": "JPCP",
///   "highestScore": 100,
///   "confidenceLevel": "Very High",
///   "reliability": 95,
///   "scoreDifference": 33,
///   "calibrated": false,
///   "adjustments": ["medium traffic with medium design life favors JPCP"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    /// Integer score per type, 0..=100
    pub scores: PerType<u32>,
    pub recommended_type: PavementType,
    pub highest_score: u32,
    pub confidence_level: ConfidenceLevel,
    /// Input completeness and consistency, 50..=95
    pub reliability: u32,
    /// Highest score minus the runner-up's
    pub score_difference: u32,
    /// Whether a calibration step has been applied
    pub calibrated: bool,
    /// Names of the adjustment rules that fired
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<String>,
}

impl RecommendationResult {
    fn from_scores(scores: PerType<u32>, reliability: u32, adjustments: Vec<String>, calibrated: bool) -> Self {
        let recommended_type = scores.argmax();
        let highest_score = scores[recommended_type];
        let second = scores[scores.runner_up(recommended_type)];
        let score_difference = highest_score.saturating_sub(second);
        RecommendationResult {
            scores,
            recommended_type,
            highest_score,
            confidence_level: ConfidenceLevel::assess(highest_score, score_difference),
            reliability,
            score_difference,
            calibrated,
            adjustments,
        }
    }

    /// Type with the second-highest score
    pub fn runner_up(&self) -> PavementType {
        self.scores.runner_up(self.recommended_type)
    }

    /// Apply calibration weights and recompute the recommendation.
    /// Reliability is a property of the input and does not change.
    pub fn calibrated(&self, calibration: &Calibration) -> RecommendationResult {
        RecommendationResult::from_scores(
            calibration.apply(&self.scores),
            self.reliability,
            self.adjustments.clone(),
            true,
        )
    }
}

pub const BASE_RELIABILITY: u32 = 75;
pub const MIN_RELIABILITY: u32 = 50;
pub const MAX_RELIABILITY: u32 = 95;

fn is_optimal_match(params: &ParameterSet) -> [bool; 4] {
    let primaries = (params.traffic_volume, params.design_life, params.subgrade_cbr, params.slab_thickness);
    use DesignLife as L;
    use SlabThickness as S;
    use SubgradeCbr as C;
    use TrafficVolume as T;
    [
        primaries == (Some(T::Medium), Some(L::Years20), Some(C::Good), Some(S::Mm200)),
        primaries == (Some(T::High), Some(L::Years30), Some(C::Good), Some(S::Mm250)),
        primaries == (Some(T::VeryHigh), Some(L::Years40), Some(C::Strong), Some(S::Mm300))
            && params.marine_environment == Some(YesNo::No)
            && params.utility_lines == Some(YesNo::No),
        primaries == (Some(T::Low), Some(L::Years10), Some(C::VeryWeak), Some(S::Mm150)),
    ]
}

/// Heuristic reliability of the input, 50..=95.
///
/// Starts at 75, adds 10 when all four primaries are present and 15 for an
/// exact optimal input, and subtracts for contradictory combinations (very
/// high traffic or 40-year life on a 150 mm slab, 40-year life on a rural
/// road).
pub fn reliability(params: &ParameterSet) -> u32 {
    let mut value = BASE_RELIABILITY as i32;
    if params.has_all_primaries() {
        value += 10;
    }
    value += 15 * is_optimal_match(params).iter().filter(|m| **m).count() as i32;

    let thin_slab = params.slab_thickness == Some(SlabThickness::Mm150);
    if params.traffic_volume == Some(TrafficVolume::VeryHigh) && thin_slab {
        value -= 20;
    }
    if params.design_life == Some(DesignLife::Years40) && thin_slab {
        value -= 15;
    }
    if params.traffic_volume == Some(TrafficVolume::Low) && params.design_life == Some(DesignLife::Years40) {
        value -= 10;
    }
    value.clamp(MIN_RELIABILITY as i32, MAX_RELIABILITY as i32) as u32
}

/// Score all four types and recommend one.
///
/// Fails with [`PaveError::InsufficientInput`] when no primary field is
/// present.
pub fn score(params: &ParameterSet) -> PaveResult<RecommendationResult> {
    if params.primary_count() == 0 {
        return Err(PaveError::insufficient_input(&PRIMARY_FIELDS));
    }

    let base = tables::base_scores(params);
    let adjusted = pipeline::run(base, params);
    let adjustments = pipeline::fired_rules(params)
        .into_iter()
        .map(str::to_string)
        .collect();

    let result =
        RecommendationResult::from_scores(pipeline::to_percent(&adjusted), reliability(params), adjustments, false);
    tracing::trace!(
        recommended = %result.recommended_type,
        highest = result.highest_score,
        difference = result.score_difference,
        "scored parameter set"
    );
    Ok(result)
}

/// Score, then apply calibration when one is given
pub fn score_with_calibration(
    params: &ParameterSet,
    calibration: Option<&Calibration>,
) -> PaveResult<RecommendationResult> {
    let result = score(params)?;
    Ok(match calibration {
        Some(calibration) => result.calibrated(calibration),
        None => result,
    })
}
