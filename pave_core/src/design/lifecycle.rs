//! # Lifecycle Cost Estimate
//!
//! Approximate whole-life cost of one kilometre of 7 m wide pavement, in
//! lakh INR.
//!
//! ## Method
//!
//! - Initial cost: base cost scaled by traffic (0.85 / 1.0 / 1.15 / 1.25 for
//!   buckets 1-4) and by 1.15 on marine sites.
//! - Routine maintenance accrues every year at `base * (1 + life / 100)`.
//! - A major repair falls every 8 years (12 for CRCP), except in the final
//!   year of the design life.
//! - Money values are rounded to one decimal.

use serde::{Deserialize, Serialize};

use crate::params::{ParameterSet, TrafficVolume};
use crate::pavement::{PavementType, PerType};

pub const COST_UNIT: &str = "lakh INR/km (7m wide pavement)";

pub const COST_NOTE: &str = "Cost estimates are approximate and based on typical IRC standards. Actual costs may vary based on local conditions, material availability, and specific project requirements.";

/// Marine exposure multiplier on initial cost
pub const MARINE_COST_FACTOR: f64 = 1.15;

/// Per-type base costs in lakh INR/km
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseCost {
    pub initial: f64,
    pub annual_maintenance: f64,
    pub major_repair: f64,
}

const BASE_COSTS: PerType<BaseCost> = PerType {
    jpcp: BaseCost {
        initial: 125.0,
        annual_maintenance: 0.5,
        major_repair: 12.0,
    },
    jrcp: BaseCost {
        initial: 135.0,
        annual_maintenance: 0.6,
        major_repair: 15.0,
    },
    crcp: BaseCost {
        initial: 145.0,
        annual_maintenance: 0.3,
        major_repair: 8.0,
    },
    pcp: BaseCost {
        initial: 110.0,
        annual_maintenance: 0.8,
        major_repair: 18.0,
    },
};

/// Whole-life cost summary.
///
/// ## JSON Example
///
/// ```json
/// {
///   "initialCost": 208.4,
///   "maintenanceCost": 27.7,
///   "totalLifecycleCost": 236.1,
///   "annualCost": 7.9,
///   "designLife": 30,
///   "unit": "lakh INR/km (7m wide pavement)",
///   "note": "Cost estimates are approximate ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleCost {
    pub initial_cost: f64,
    pub maintenance_cost: f64,
    pub total_lifecycle_cost: f64,
    pub annual_cost: f64,
    /// Years the estimate covers
    pub design_life: u32,
    pub unit: String,
    pub note: String,
}

pub fn base_cost(pavement_type: PavementType) -> BaseCost {
    BASE_COSTS[pavement_type]
}

fn traffic_multiplier(traffic: Option<TrafficVolume>) -> f64 {
    match traffic {
        Some(TrafficVolume::Low) => 0.85,
        Some(TrafficVolume::High) => 1.15,
        Some(TrafficVolume::VeryHigh) => 1.25,
        Some(TrafficVolume::Medium) | None => 1.0,
    }
}

/// Years between major repairs
pub fn major_repair_interval(pavement_type: PavementType) -> u32 {
    match pavement_type {
        PavementType::Crcp => 12,
        _ => 8,
    }
}

/// Years covered: the selected design life, else a per-type default
pub fn costing_life(pavement_type: PavementType, params: &ParameterSet) -> u32 {
    match (params.design_life, pavement_type) {
        (Some(life), _) => life.years(),
        (None, PavementType::Crcp) => 30,
        (None, PavementType::Pcp) if params.traffic_volume == Some(TrafficVolume::Low) => 15,
        (None, _) => 20,
    }
}

fn round_money(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate the whole-life cost of a pavement type.
///
/// # Example
/// ```
/// use pave_core::design::lifecycle_cost;
/// use pave_core::params::ParameterSet;
/// use pave_core::pavement::PavementType;
///
/// let params = ParameterSet::from_pairs([("trafficVolume", "2"), ("designLife", "20")])?;
/// let cost = lifecycle_cost(PavementType::Jpcp, &params);
/// assert_eq!(cost.initial_cost, 125.0);
/// assert_eq!(cost.design_life, 20);
/// # Ok::<(), pave_core::errors::PaveError>(())
/// ```
pub fn lifecycle_cost(pavement_type: PavementType, params: &ParameterSet) -> LifecycleCost {
    let base = base_cost(pavement_type);
    let life = costing_life(pavement_type, params);
    let environment = if params.is_marine() { MARINE_COST_FACTOR } else { 1.0 };

    let initial = base.initial * traffic_multiplier(params.traffic_volume) * environment;
    let annual_maintenance = base.annual_maintenance * (1.0 + life as f64 / 100.0);
    let interval = major_repair_interval(pavement_type);

    let mut maintenance = 0.0;
    for year in 1..=life {
        maintenance += annual_maintenance;
        if year % interval == 0 && year < life {
            maintenance += base.major_repair;
        }
    }

    let total = initial + maintenance;
    LifecycleCost {
        initial_cost: round_money(initial),
        maintenance_cost: round_money(maintenance),
        total_lifecycle_cost: round_money(total),
        annual_cost: round_money(total / life as f64),
        design_life: life,
        unit: COST_UNIT.to_string(),
        note: COST_NOTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_crcp_marine_heavy_traffic() {
        let cost = lifecycle_cost(
            PavementType::Crcp,
            &params(&[("trafficVolume", "4"), ("marineEnvironment", "Yes"), ("designLife", "30")]),
        );
        assert_eq!(cost.initial_cost, 208.4);
        assert_eq!(cost.maintenance_cost, 27.7);
        assert_eq!(cost.total_lifecycle_cost, 236.1);
        assert_eq!(cost.annual_cost, 7.9);
        assert_eq!(cost.design_life, 30);
        assert_eq!(cost.unit, COST_UNIT);
    }

    #[test]
    fn test_no_major_repair_in_final_year() {
        // Repairs at years 8 and 16
        let cost = lifecycle_cost(PavementType::Jpcp, &ParameterSet::new());
        assert_eq!(cost.design_life, 20);
        // 0.5 * 1.2 * 20 + 12 * 2
        assert_eq!(cost.maintenance_cost, 36.0);

        // Year 40 is the last year, so four repairs rather than five
        let long = lifecycle_cost(PavementType::Jpcp, &params(&[("designLife", "40")]));
        assert_eq!(long.maintenance_cost, 76.0);

        let crcp = lifecycle_cost(PavementType::Crcp, &params(&[("designLife", "20")]));
        // 0.3 * 1.2 * 20 + 8 at year 12
        assert_eq!(crcp.maintenance_cost, 15.2);
    }

    #[test]
    fn test_default_life() {
        assert_eq!(costing_life(PavementType::Crcp, &ParameterSet::new()), 30);
        assert_eq!(costing_life(PavementType::Pcp, &params(&[("trafficVolume", "1")])), 15);
        assert_eq!(costing_life(PavementType::Pcp, &ParameterSet::new()), 20);
        assert_eq!(costing_life(PavementType::Crcp, &params(&[("designLife", "10")])), 10);
    }

    #[test]
    fn test_low_traffic_discount() {
        let cost = lifecycle_cost(PavementType::Pcp, &params(&[("trafficVolume", "1"), ("designLife", "10")]));
        assert_eq!(cost.initial_cost, 93.5);
        // 0.8 * 1.1 * 10 + 18 at year 8
        assert_eq!(cost.maintenance_cost, 26.8);
    }
}
