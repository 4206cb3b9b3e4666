//! # Post-hoc Adjustment Pipeline
//!
//! The weighted base scores pass through five pure stages, in order:
//!
//! 1. [`apply_scenarios`] - compound-condition multipliers
//! 2. [`apply_favorable`] - boosts for the ideal input of each type
//! 3. [`balance`] - cap the leader at 1.5x the runner-up
//! 4. [`floor`] - raise every score to at least half the maximum
//! 5. [`normalize`] - divide by the maximum when it exceeds 1.0
//!
//! Balancing leaves the runner-up at no less than 2/3 of the leader, so on
//! the f64 scores the floor only lifts the bottom two entries. Rounding to
//! whole percentages can still push a score across either limit by a
//! fraction of a point, so [`to_percent`] re-applies both rules to the
//! integers: leader at most `⌊1.5 × runner-up⌋`, every score at least
//! `⌈max / 2⌉`.
//!
//! Adjustment rules are data: a named condition and a per-type multiplier
//! vector. A missing field never satisfies a condition.

use crate::params::{
    ConstructionTime, DesignLife, InitialCost, LongitudinalJoints, ParameterSet, SlabThickness, SubgradeCbr,
    TrafficVolume, YesNo,
};
use crate::pavement::{PavementType, PerType};

/// Score per type before rounding
pub type ScoreVector = PerType<f64>;

/// Ceiling on leader / runner-up
pub const MAX_LEAD_RATIO: f64 = 1.5;

/// Minimum score as a fraction of the maximum
pub const FLOOR_FRACTION: f64 = 0.5;

/// A named multiplier applied when its condition holds
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentRule {
    pub name: &'static str,
    condition: fn(&ParameterSet) -> bool,
    multipliers: PerType<f64>,
}

impl AdjustmentRule {
    pub fn applies(&self, params: &ParameterSet) -> bool {
        (self.condition)(params)
    }

    pub fn multipliers(&self) -> &PerType<f64> {
        &self.multipliers
    }
}

const fn boost(t: PavementType, factor: f64) -> PerType<f64> {
    let mut multipliers = PerType::splat(1.0);
    match t {
        PavementType::Jpcp => multipliers.jpcp = factor,
        PavementType::Jrcp => multipliers.jrcp = factor,
        PavementType::Crcp => multipliers.crcp = factor,
        PavementType::Pcp => multipliers.pcp = factor,
    }
    multipliers
}

fn is(value: Option<YesNo>, expected: YesNo) -> bool {
    value == Some(expected)
}

fn primaries_match(
    params: &ParameterSet,
    traffic: TrafficVolume,
    life: DesignLife,
    cbr: SubgradeCbr,
    slab: SlabThickness,
) -> bool {
    params.traffic_volume == Some(traffic)
        && params.design_life == Some(life)
        && params.subgrade_cbr == Some(cbr)
        && params.slab_thickness == Some(slab)
}

fn very_high_traffic_long_life(p: &ParameterSet) -> bool {
    p.traffic_volume == Some(TrafficVolume::VeryHigh)
        && matches!(p.design_life, Some(DesignLife::Years30 | DesignLife::Years40))
}

fn low_traffic_short_life(p: &ParameterSet) -> bool {
    p.traffic_volume == Some(TrafficVolume::Low) && p.design_life == Some(DesignLife::Years10)
}

fn medium_traffic_medium_life(p: &ParameterSet) -> bool {
    p.traffic_volume == Some(TrafficVolume::Medium) && p.design_life == Some(DesignLife::Years20)
}

fn strong_subgrade_heavy_traffic_flexible_schedule(p: &ParameterSet) -> bool {
    p.subgrade_cbr == Some(SubgradeCbr::Strong)
        && p.traffic_volume == Some(TrafficVolume::VeryHigh)
        && p.construction_time == Some(ConstructionTime::Flexible)
}

fn good_subgrade_wide_carriageway_long_life(p: &ParameterSet) -> bool {
    p.subgrade_cbr == Some(SubgradeCbr::Good)
        && p.longitudinal_joints == Some(LongitudinalJoints::Width7)
        && p.design_life == Some(DesignLife::Years30)
}

fn marine_with_utilities(p: &ParameterSet) -> bool {
    is(p.marine_environment, YesNo::Yes) && is(p.utility_lines, YesNo::Yes)
}

fn ideal_jpcp(p: &ParameterSet) -> bool {
    primaries_match(p, TrafficVolume::Medium, DesignLife::Years20, SubgradeCbr::Good, SlabThickness::Mm200)
}

fn ideal_jrcp(p: &ParameterSet) -> bool {
    primaries_match(p, TrafficVolume::High, DesignLife::Years30, SubgradeCbr::Good, SlabThickness::Mm250)
}

fn ideal_crcp(p: &ParameterSet) -> bool {
    p.traffic_volume == Some(TrafficVolume::VeryHigh)
        && p.design_life == Some(DesignLife::Years40)
        && p.subgrade_cbr == Some(SubgradeCbr::Strong)
        && is(p.utility_lines, YesNo::No)
        && is(p.marine_environment, YesNo::No)
}

fn ideal_pcp(p: &ParameterSet) -> bool {
    low_traffic_short_life(p)
        || (p.construction_time == Some(ConstructionTime::Limited) && p.initial_cost == Some(InitialCost::High))
}

/// Compound-condition adjustments. Several may fire on one input.
pub const SCENARIO_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        name: "very high traffic with long design life favors CRCP",
        condition: very_high_traffic_long_life,
        multipliers: boost(PavementType::Crcp, 1.10),
    },
    AdjustmentRule {
        name: "low traffic with short design life favors PCP",
        condition: low_traffic_short_life,
        multipliers: boost(PavementType::Pcp, 1.15),
    },
    AdjustmentRule {
        name: "medium traffic with medium design life favors JPCP",
        condition: medium_traffic_medium_life,
        multipliers: boost(PavementType::Jpcp, 1.10),
    },
    AdjustmentRule {
        name: "strong subgrade, very high traffic and flexible schedule favor CRCP",
        condition: strong_subgrade_heavy_traffic_flexible_schedule,
        multipliers: boost(PavementType::Crcp, 1.20),
    },
    AdjustmentRule {
        name: "good subgrade, wide carriageway and long design life favor JRCP",
        condition: good_subgrade_wide_carriageway_long_life,
        multipliers: boost(PavementType::Jrcp, 1.15),
    },
    AdjustmentRule {
        name: "marine site with utility lines penalizes CRCP and favors PCP",
        condition: marine_with_utilities,
        multipliers: PerType::from_array([1.0, 1.0, 0.70, 1.10]),
    },
];

/// Boosts for the ideal conditions of each type under the IRC codes
pub const FAVORABLE_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        name: "ideal JPCP conditions (IRC:58-2015)",
        condition: ideal_jpcp,
        multipliers: boost(PavementType::Jpcp, 1.15),
    },
    AdjustmentRule {
        name: "ideal JRCP conditions (IRC:58-2015)",
        condition: ideal_jrcp,
        multipliers: boost(PavementType::Jrcp, 1.15),
    },
    AdjustmentRule {
        name: "ideal CRCP conditions (IRC:118-2015)",
        condition: ideal_crcp,
        multipliers: boost(PavementType::Crcp, 1.20),
    },
    AdjustmentRule {
        name: "ideal PCP conditions (IRC:SP:62-2014)",
        condition: ideal_pcp,
        multipliers: boost(PavementType::Pcp, 1.15),
    },
];

fn apply_rules(scores: ScoreVector, rules: &[AdjustmentRule], params: &ParameterSet) -> ScoreVector {
    rules
        .iter()
        .filter(|rule| rule.applies(params))
        .fold(scores, |acc, rule| acc.map(|t, v| v * rule.multipliers[t]))
}

pub fn apply_scenarios(scores: ScoreVector, params: &ParameterSet) -> ScoreVector {
    apply_rules(scores, SCENARIO_RULES, params)
}

pub fn apply_favorable(scores: ScoreVector, params: &ParameterSet) -> ScoreVector {
    apply_rules(scores, FAVORABLE_RULES, params)
}

/// Largest value among the types other than `excluded`
fn max_excluding(scores: &ScoreVector, excluded: PavementType) -> f64 {
    scores
        .iter()
        .filter(|(t, _)| *t != excluded)
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Cap the leader at [`MAX_LEAD_RATIO`] times the runner-up. Only applies
/// when both are positive.
pub fn balance(scores: ScoreVector) -> ScoreVector {
    let leader = scores.argmax();
    let highest = scores[leader];
    let second = max_excluding(&scores, leader);
    let mut balanced = scores;
    if highest > 0.0 && second > 0.0 && highest / second > MAX_LEAD_RATIO {
        balanced[leader] = second * MAX_LEAD_RATIO;
    }
    balanced
}

/// Raise every score to at least [`FLOOR_FRACTION`] of the maximum
pub fn floor(scores: ScoreVector) -> ScoreVector {
    let min_score = scores.max_value() * FLOOR_FRACTION;
    scores.map(|_, v| v.max(min_score))
}

/// Divide by the maximum when it exceeds 1.0, preserving ratios
pub fn normalize(scores: ScoreVector) -> ScoreVector {
    let max = scores.max_value();
    if max > 1.0 {
        scores.map(|_, v| v / max)
    } else {
        scores
    }
}

/// All five stages in order
pub fn run(base: ScoreVector, params: &ParameterSet) -> ScoreVector {
    let scores = apply_scenarios(base, params);
    let scores = apply_favorable(scores, params);
    normalize(floor(balance(scores)))
}

/// Scale to 0..100, round to the nearest integer, then hold the balance
/// and floor rules on the rounded values
pub fn to_percent(scores: &ScoreVector) -> PerType<u32> {
    enforce_shape(scores.map(|_, v| (v * 100.0).round().clamp(0.0, 100.0) as u32))
}

/// Integer form of [`balance`] and [`floor`], repeated until both hold.
///
/// Capping only lowers the maximum and flooring never lifts a value past
/// `⌈max / 2⌉`, so every entry moves one way and the loop terminates.
pub fn enforce_shape(mut scores: PerType<u32>) -> PerType<u32> {
    loop {
        let before = scores;

        let leader = scores.argmax();
        let second = scores[scores.runner_up(leader)];
        let cap = second * 3 / 2;
        if second > 0 && scores[leader] > cap {
            scores[leader] = cap;
        }

        let min_score = scores.max_value().div_ceil(2);
        scores = scores.map(|_, v| (*v).max(min_score));

        if scores == before {
            return scores;
        }
    }
}

/// Names of the scenario and favorable rules that fire for `params`
pub fn fired_rules(params: &ParameterSet) -> Vec<&'static str> {
    SCENARIO_RULES
        .iter()
        .chain(FAVORABLE_RULES)
        .filter(|rule| rule.applies(params))
        .map(|rule| rule.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_scenarios_compound() {
        let input = params(&[
            ("trafficVolume", "4"),
            ("designLife", "40"),
            ("subgradeCBR", "4"),
            ("constructionTime", "Flexible"),
        ]);
        let adjusted = apply_scenarios(PerType::splat(1.0), &input);
        assert!((adjusted[PavementType::Crcp] - 1.10 * 1.20).abs() < 1e-12);
        assert_eq!(adjusted[PavementType::Jpcp], 1.0);
    }

    #[test]
    fn test_missing_fields_never_satisfy_conditions() {
        assert!(fired_rules(&ParameterSet::new()).is_empty());
        // CRCP ideal needs explicit "No" for both hazards
        let input = params(&[("trafficVolume", "4"), ("designLife", "40"), ("subgradeCBR", "4")]);
        assert!(!ideal_crcp(&input));
    }

    #[test]
    fn test_partial_input_gets_no_default_scenarios() {
        // Life 20 alone would meet "medium traffic with medium design life"
        // only if traffic were assumed to be 2
        let life_only = params(&[("designLife", "20")]);
        assert_eq!(apply_scenarios(PerType::splat(1.0), &life_only), PerType::splat(1.0));
        assert!(fired_rules(&life_only).is_empty());

        let traffic_and_cbr = params(&[("trafficVolume", "4"), ("subgradeCBR", "4"), ("constructionTime", "Flexible")]);
        assert_eq!(apply_scenarios(PerType::splat(1.0), &traffic_and_cbr), boost(PavementType::Crcp, 1.20));
    }

    #[test]
    fn test_marine_and_utilities_shift_crcp_to_pcp() {
        let input = params(&[("marineEnvironment", "Yes"), ("utilityLines", "Yes")]);
        let adjusted = apply_scenarios(PerType::splat(1.0), &input);
        assert_eq!(adjusted, PerType::from_array([1.0, 1.0, 0.70, 1.10]));
    }

    #[test]
    fn test_pcp_favorable_alternative_condition() {
        let input = params(&[("constructionTime", "Limited"), ("initialCost", "High")]);
        let adjusted = apply_favorable(PerType::splat(0.5), &input);
        assert!((adjusted[PavementType::Pcp] - 0.575).abs() < 1e-12);
        assert_eq!(fired_rules(&input), vec!["ideal PCP conditions (IRC:SP:62-2014)"]);
    }

    #[test]
    fn test_balance_caps_leader() {
        let balanced = balance(PerType::from_array([0.9, 0.4, 0.3, 0.2]));
        assert!((balanced[PavementType::Jpcp] - 0.6).abs() < 1e-12);
        assert_eq!(balanced[PavementType::Jrcp], 0.4);

        let untouched = PerType::from_array([0.6, 0.5, 0.1, 0.1]);
        assert_eq!(balance(untouched), untouched);
    }

    #[test]
    fn test_balance_ignores_non_positive_runner_up() {
        let scores = PerType::from_array([0.9, 0.0, 0.0, 0.0]);
        assert_eq!(balance(scores), scores);
    }

    #[test]
    fn test_floor_raises_low_scores() {
        let floored = floor(PerType::from_array([0.8, 0.6, 0.2, 0.5]));
        assert_eq!(floored, PerType::from_array([0.8, 0.6, 0.4, 0.5]));
    }

    #[test]
    fn test_normalize_only_above_one() {
        let normalized = normalize(PerType::from_array([1.25, 1.0, 0.5, 0.625]));
        assert_eq!(normalized, PerType::from_array([1.0, 0.8, 0.4, 0.5]));

        let small = PerType::from_array([0.9, 0.5, 0.5, 0.5]);
        assert_eq!(normalize(small), small);
    }

    #[test]
    fn test_to_percent_holds_shape_after_rounding() {
        // Rounds to [60, 48, 45, 91]: 91 > 1.5 * 60 and 45 < 91 / 2
        let percent = to_percent(&PerType::from_array([0.6049, 0.48, 0.4537, 0.9074]));
        assert_eq!(percent, PerType::from_array([60, 48, 45, 90]));
        assert!(2 * percent.max_value() <= 3 * 60);
        assert!(percent.iter().all(|(_, s)| 2 * s >= percent.max_value()));
    }

    #[test]
    fn test_enforce_shape_floors_rounded_scores() {
        let shaped = enforce_shape(PerType::from_array([100, 67, 49, 63]));
        assert_eq!(shaped, PerType::from_array([100, 67, 50, 63]));
    }

    #[test]
    fn test_enforce_shape_with_zero_runner_up() {
        // Floor lifts the zeros to 50, then the cap brings the leader to 75
        let shaped = enforce_shape(PerType::from_array([100, 0, 0, 0]));
        assert_eq!(shaped, PerType::from_array([75, 50, 50, 50]));
    }

    #[test]
    fn test_enforce_shape_leaves_valid_scores() {
        let valid = PerType::from_array([59, 66, 99, 50]);
        assert_eq!(enforce_shape(valid), valid);
    }

    #[test]
    fn test_to_percent_rounds_half_up() {
        let percent = to_percent(&PerType::from_array([1.0, 0.665, 0.554, 0.0]));
        assert_eq!(percent, PerType::from_array([100, 67, 55, 0]));
    }
}
