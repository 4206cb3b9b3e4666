//! # Model Self-Test
//!
//! Runs the compatibility model over six reference inputs: one ideal input
//! per type plus two boundary inputs whose expected answer is debatable. The
//! report is informational only; a miss is not an error.
//!
//! - **Accuracy**: correct top picks over total cases.
//! - **Precision**: a wrong top pick scoring above 80 is a false positive.
//! - **Recall**: an expected type missing from the top three is a false
//!   negative.

use serde::{Deserialize, Serialize};

use super::{predict, CompatibilityPrediction};
use crate::params::{
    DesignLife, InitialCost, LongitudinalJoints, Maintenance, ParameterSet, SlabThickness, SteelReinforcement,
    SubgradeCbr, TrafficVolume, TransverseJoints, YesNo,
};
use crate::pavement::PavementType;

/// Wrong picks above this score count as false positives
pub const FALSE_POSITIVE_SCORE: f64 = 80.0;

/// One reference input and the type it should produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationCase {
    pub name: String,
    pub params: ParameterSet,
    pub expected: PavementType,
}

/// Outcome of one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub name: String,
    pub expected: PavementType,
    pub predicted: PavementType,
    /// Raw score of the predicted type
    pub score: f64,
    pub correct: bool,
    pub false_positive: bool,
    pub false_negative: bool,
}

/// Summary over all cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total: usize,
    pub correct: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub cases: Vec<CaseResult>,
}

fn case(name: &str, expected: PavementType, params: ParameterSet) -> ValidationCase {
    ValidationCase {
        name: name.to_string(),
        params,
        expected,
    }
}

fn primaries(traffic: TrafficVolume, life: DesignLife, cbr: SubgradeCbr, slab: SlabThickness) -> ParameterSet {
    ParameterSet {
        traffic_volume: Some(traffic),
        design_life: Some(life),
        subgrade_cbr: Some(cbr),
        slab_thickness: Some(slab),
        ..ParameterSet::default()
    }
}

/// The six built-in reference cases
pub fn reference_cases() -> Vec<ValidationCase> {
    vec![
        case(
            "Ideal JPCP",
            PavementType::Jpcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::Unreinforced),
                transverse_joints: Some(TransverseJoints::Regular),
                longitudinal_joints: Some(LongitudinalJoints::Width7),
                maintenance: Some(Maintenance::Low),
                initial_cost: Some(InitialCost::High),
                ..primaries(TrafficVolume::Medium, DesignLife::Years20, SubgradeCbr::Good, SlabThickness::Mm200)
            },
        ),
        case(
            "Ideal JRCP",
            PavementType::Jrcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::AtJoints),
                transverse_joints: Some(TransverseJoints::Longer),
                longitudinal_joints: Some(LongitudinalJoints::Width7),
                maintenance: Some(Maintenance::Low),
                initial_cost: Some(InitialCost::High),
                ..primaries(TrafficVolume::High, DesignLife::Years20, SubgradeCbr::Good, SlabThickness::Mm200)
            },
        ),
        case(
            "Ideal CRCP",
            PavementType::Crcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::Longitudinal),
                transverse_joints: Some(TransverseJoints::Jointless),
                longitudinal_joints: Some(LongitudinalJoints::Width4_5),
                not_for_light_traffic: Some(YesNo::Yes),
                maintenance: Some(Maintenance::Minimal),
                ..primaries(TrafficVolume::VeryHigh, DesignLife::Years30, SubgradeCbr::Strong, SlabThickness::Mm250)
            },
        ),
        case(
            "Ideal PCP",
            PavementType::Pcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::Unreinforced),
                maintenance: Some(Maintenance::Moderate),
                initial_cost: Some(InitialCost::Moderate),
                ..primaries(TrafficVolume::Low, DesignLife::Years10, SubgradeCbr::Weak, SlabThickness::Mm150)
            },
        ),
        case(
            "Boundary: thin slab on highway traffic",
            PavementType::Pcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::Unreinforced),
                transverse_joints: Some(TransverseJoints::Regular),
                ..primaries(TrafficVolume::Medium, DesignLife::Years20, SubgradeCbr::Weak, SlabThickness::Mm150)
            },
        ),
        case(
            "Boundary: heavy traffic without steel",
            PavementType::Jrcp,
            ParameterSet {
                steel_reinforcement: Some(SteelReinforcement::Unreinforced),
                transverse_joints: Some(TransverseJoints::Jointless),
                ..primaries(TrafficVolume::VeryHigh, DesignLife::Years30, SubgradeCbr::Strong, SlabThickness::Mm300)
            },
        ),
    ]
}

fn evaluate(case: &ValidationCase, prediction: &CompatibilityPrediction) -> CaseResult {
    let correct = prediction.top_type == case.expected;
    CaseResult {
        name: case.name.clone(),
        expected: case.expected,
        predicted: prediction.top_type,
        score: prediction.top_score(),
        correct,
        false_positive: !correct && prediction.top_score() > FALSE_POSITIVE_SCORE,
        false_negative: !prediction.in_top_three(case.expected),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Run the model over a set of cases
pub fn validate_cases(cases: &[ValidationCase]) -> ValidationReport {
    let results: Vec<CaseResult> = cases
        .iter()
        .map(|c| {
            let result = evaluate(c, &predict(&c.params));
            tracing::debug!(
                case = %result.name,
                expected = %result.expected,
                predicted = %result.predicted,
                score = result.score,
                "validation case"
            );
            result
        })
        .collect();

    let correct = results.iter().filter(|r| r.correct).count();
    let false_positives = results.iter().filter(|r| r.false_positive).count();
    let false_negatives = results.iter().filter(|r| r.false_negative).count();

    ValidationReport {
        total: results.len(),
        correct,
        false_positives,
        false_negatives,
        accuracy: ratio(correct, results.len()),
        precision: ratio(correct, correct + false_positives),
        recall: ratio(correct, correct + false_negatives),
        cases: results,
    }
}

/// Run the model over the built-in reference cases
pub fn validate_model() -> ValidationReport {
    validate_cases(&reference_cases())
}
