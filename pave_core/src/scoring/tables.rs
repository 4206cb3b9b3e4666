//! Factor tables for the weighted scoring engine.
//!
//! Every table row is a suitability fraction per type in canonical order
//! (JPCP, JRCP, CRCP, PCP).

use crate::params::{
    ConstructionTime, DesignLife, InitialCost, LongitudinalJoints, ParameterSet, SlabThickness, SubgradeCbr,
    TrafficVolume,
};
use crate::pavement::PerType;

pub const TRAFFIC_WEIGHT: f64 = 0.30;
pub const DESIGN_LIFE_WEIGHT: f64 = 0.20;
pub const SUBGRADE_WEIGHT: f64 = 0.15;
pub const SLAB_WEIGHT: f64 = 0.10;
pub const ENVIRONMENT_WEIGHT: f64 = 0.10;
pub const CONSTRUCTION_WEIGHT: f64 = 0.15;

pub fn traffic_factor(traffic: TrafficVolume) -> PerType<f64> {
    PerType::from_array(match traffic {
        TrafficVolume::Low => [0.65, 0.55, 0.30, 0.95],
        TrafficVolume::Medium => [0.95, 0.80, 0.60, 0.70],
        TrafficVolume::High => [0.70, 0.95, 0.85, 0.55],
        TrafficVolume::VeryHigh => [0.60, 0.75, 0.98, 0.40],
    })
}

pub fn design_life_factor(life: DesignLife) -> PerType<f64> {
    PerType::from_array(match life {
        DesignLife::Years10 => [0.65, 0.50, 0.30, 0.95],
        DesignLife::Years20 => [0.95, 0.75, 0.60, 0.70],
        DesignLife::Years30 => [0.65, 0.95, 0.80, 0.50],
        DesignLife::Years40 => [0.50, 0.65, 0.98, 0.30],
    })
}

pub fn subgrade_factor(cbr: SubgradeCbr) -> PerType<f64> {
    PerType::from_array(match cbr {
        SubgradeCbr::VeryWeak => [0.40, 0.45, 0.35, 0.95],
        SubgradeCbr::Weak => [0.70, 0.95, 0.60, 0.75],
        SubgradeCbr::Good => [0.95, 0.80, 0.70, 0.65],
        SubgradeCbr::Strong => [0.70, 0.80, 0.95, 0.60],
    })
}

pub fn slab_factor(slab: SlabThickness) -> PerType<f64> {
    PerType::from_array(match slab {
        SlabThickness::Mm150 => [0.50, 0.40, 0.30, 0.95],
        SlabThickness::Mm200 => [0.95, 0.75, 0.60, 0.75],
        SlabThickness::Mm250 => [0.75, 0.95, 0.80, 0.60],
        SlabThickness::Mm300 => [0.65, 0.80, 0.95, 0.50],
    })
}

fn scaled(base: PerType<f64>, multipliers: [f64; 4]) -> PerType<f64> {
    let multipliers = PerType::from_array(multipliers);
    base.map(|t, v| v * multipliers[t])
}

/// Environmental suitability. Marine exposure penalizes steel.
pub fn environment_factor(params: &ParameterSet) -> PerType<f64> {
    let mut factor = PerType::from_array([0.85, 0.75, 0.70, 0.80]);
    if params.is_marine() {
        factor = scaled(factor, [0.95, 0.75, 0.55, 0.90]);
    }
    factor
}

/// Constructability under site and budget constraints
pub fn construction_factor(params: &ParameterSet) -> PerType<f64> {
    let mut factor = PerType::from_array([0.80, 0.75, 0.70, 0.85]);
    if params.has_utility_lines() {
        factor = scaled(factor, [0.90, 0.85, 0.55, 0.95]);
    }
    if params.is_manual_construction() {
        factor = scaled(factor, [0.95, 0.75, 0.55, 1.15]);
    }
    if params.longitudinal_joints == Some(LongitudinalJoints::Width7) {
        factor = scaled(factor, [0.90, 0.85, 0.95, 0.75]);
    }
    match params.initial_cost {
        Some(InitialCost::Low) => factor = scaled(factor, [0.95, 0.80, 0.55, 0.75]),
        Some(InitialCost::High) => factor = scaled(factor, [0.85, 0.90, 1.20, 0.95]),
        Some(InitialCost::Moderate) | None => {}
    }
    match params.construction_time {
        Some(ConstructionTime::Limited) => factor = scaled(factor, [0.70, 0.65, 0.55, 1.35]),
        Some(ConstructionTime::Flexible) => factor = scaled(factor, [0.90, 0.95, 1.15, 0.80]),
        Some(ConstructionTime::Normal) | None => {}
    }
    factor
}

fn accumulate(scores: &mut PerType<f64>, factor: PerType<f64>, weight: f64) {
    for (t, v) in factor.iter() {
        scores[t] += v * weight;
    }
}

/// Weighted sum of the primary factors present, plus the environment and
/// construction vectors, which always apply.
pub fn base_scores(params: &ParameterSet) -> PerType<f64> {
    let mut scores = PerType::splat(0.0);
    if let Some(traffic) = params.traffic_volume {
        accumulate(&mut scores, traffic_factor(traffic), TRAFFIC_WEIGHT);
    }
    if let Some(life) = params.design_life {
        accumulate(&mut scores, design_life_factor(life), DESIGN_LIFE_WEIGHT);
    }
    if let Some(cbr) = params.subgrade_cbr {
        accumulate(&mut scores, subgrade_factor(cbr), SUBGRADE_WEIGHT);
    }
    if let Some(slab) = params.slab_thickness {
        accumulate(&mut scores, slab_factor(slab), SLAB_WEIGHT);
    }
    accumulate(&mut scores, environment_factor(params), ENVIRONMENT_WEIGHT);
    accumulate(&mut scores, construction_factor(params), CONSTRUCTION_WEIGHT);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::PavementType;

    #[test]
    fn test_primary_weights_sum_with_ambient_to_one() {
        let total = TRAFFIC_WEIGHT + DESIGN_LIFE_WEIGHT + SUBGRADE_WEIGHT + SLAB_WEIGHT + ENVIRONMENT_WEIGHT
            + CONSTRUCTION_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ambient_factors_always_apply() {
        let scores = base_scores(&ParameterSet::new());
        assert!((scores[PavementType::Jpcp] - (0.85 * 0.10 + 0.80 * 0.15)).abs() < 1e-12);
        assert!((scores[PavementType::Pcp] - (0.80 * 0.10 + 0.85 * 0.15)).abs() < 1e-12);
    }

    #[test]
    fn test_marine_penalizes_crcp_most() {
        let marine = ParameterSet {
            marine_environment: Some(crate::params::YesNo::Yes),
            ..Default::default()
        };
        let factor = environment_factor(&marine);
        assert!((factor[PavementType::Crcp] - 0.70 * 0.55).abs() < 1e-12);
        assert_eq!(factor.argmax(), PavementType::Jpcp);
    }

    #[test]
    fn test_construction_multipliers_compound() {
        let params = ParameterSet {
            manual_construction: Some(crate::params::YesNo::Yes),
            construction_time: Some(ConstructionTime::Limited),
            ..Default::default()
        };
        let factor = construction_factor(&params);
        assert!((factor[PavementType::Pcp] - 0.85 * 1.15 * 1.35).abs() < 1e-12);
        assert!((factor[PavementType::Crcp] - 0.70 * 0.55 * 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_moderate_cost_and_normal_time_are_neutral() {
        let neutral = ParameterSet {
            initial_cost: Some(InitialCost::Moderate),
            construction_time: Some(ConstructionTime::Normal),
            ..Default::default()
        };
        assert_eq!(construction_factor(&neutral), construction_factor(&ParameterSet::new()));
    }
}
