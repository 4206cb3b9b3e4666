//! # Design Recommendations
//!
//! Concrete specifications for a chosen pavement type: slab thickness,
//! reinforcement, joint spacing, design life, site-specific considerations
//! and a lifecycle cost estimate.
//!
//! These are screening values read off tables, not a structural design.
//!
//! ## Thickness
//!
//! Base thickness by type and traffic bucket (bucket 2 when traffic is not
//! given), +20 mm on a very weak subgrade, -10 mm on a strong one, and never
//! more than the selected slab thickness when one is given.
//!
//! | Traffic | JPCP | JRCP | CRCP | PCP |
//! |---------|------|------|------|-----|
//! | 1       | 180  | 180  | 180  | 150 |
//! | 2       | 220  | 220  | 200  | 180 |
//! | 3       | 250  | 240  | 230  | 200 |
//! | 4       | 280  | 260  | 250  | 220 |
//!
//! ## Example
//!
//! ```rust
//! use pave_core::design::derive_specs;
//! use pave_core::params::ParameterSet;
//! use pave_core::pavement::PavementType;
//!
//! let params = ParameterSet::from_pairs([("slabThickness", "200")])?;
//! let spec = derive_specs(PavementType::Jpcp, &params);
//! assert_eq!(spec.thickness_mm, 200);
//! assert_eq!(spec.joint_spacing, "4.5 m");
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

pub mod guidelines;
pub mod lifecycle;

use serde::{Deserialize, Serialize};

use crate::params::{InitialCost, ParameterSet, SubgradeCbr, TrafficVolume};
use crate::pavement::{PavementType, PerType};
use crate::standards::{self, JointSpacingRule};

pub use guidelines::{construction_guidelines, GuidelineCategory};
pub use lifecycle::{lifecycle_cost, LifecycleCost};

/// Design recommendations for one pavement type.
///
/// ## JSON Example
///
/// ```json
/// {
///   "pavementType": "JPCP",
///   "thicknessMm": 220,
///   "reinforcement": "None (except dowels at joints)",
///   "jointSpacing": "4.5 m",
///   "designLifeYears": 20,
///   "specialConsiderations": [],
///   "lifecycleCost": { "initialCost": 125.0, "...": "..." },
///   "ircReference": "IRC:58-2015, Section 7.2, Page 32-34"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSpec {
    pub pavement_type: PavementType,
    pub thickness_mm: u32,
    pub reinforcement: String,
    pub joint_spacing: String,
    pub design_life_years: u32,
    pub special_considerations: Vec<String>,
    pub lifecycle_cost: LifecycleCost,
    pub irc_reference: String,
}

const BASE_THICKNESS_MM: PerType<[u32; 4]> = PerType {
    jpcp: [180, 220, 250, 280],
    jrcp: [180, 220, 240, 260],
    crcp: [180, 200, 230, 250],
    pcp: [150, 180, 200, 220],
};

const BASE_DESIGN_LIFE: PerType<u32> = PerType {
    jpcp: 20,
    jrcp: 25,
    crcp: 30,
    pcp: 15,
};

/// Recommended slab thickness in mm
pub fn suggested_thickness(pavement_type: PavementType, params: &ParameterSet) -> u32 {
    let traffic = params.traffic_volume.unwrap_or(TrafficVolume::Medium);
    let base = BASE_THICKNESS_MM[pavement_type][usize::from(traffic.level() - 1)];
    let thickness = match params.subgrade_cbr {
        Some(SubgradeCbr::VeryWeak) => base + 20,
        Some(SubgradeCbr::Strong) => base - 10,
        _ => base,
    };
    match params.slab_thickness {
        Some(selected) => thickness.min(selected.mm()),
        None => thickness,
    }
}

/// Contraction joint spacing as display text
pub fn joint_spacing(pavement_type: PavementType, params: &ParameterSet) -> String {
    match standards::profile(pavement_type).joint_spacing {
        JointSpacingRule::Jointless => "None (except at structures)".to_string(),
        JointSpacingRule::PanelLength => "Panel length (typically 3-5m)".to_string(),
        JointSpacingRule::Formula { cap_m } => {
            let thickness = suggested_thickness(pavement_type, params) as f64;
            let spacing = (25.0 * thickness / 1000.0).min(cap_m);
            format!("{} m", (spacing * 2.0).round() / 2.0)
        }
    }
}

/// Recommended design life in years. Very high traffic shortens it by 10%.
pub fn design_life(pavement_type: PavementType, params: &ParameterSet) -> u32 {
    let base = BASE_DESIGN_LIFE[pavement_type];
    let years = params.design_life.map_or(base, |selected| selected.years().max(base));
    if params.traffic_volume == Some(TrafficVolume::VeryHigh) {
        (years as f64 * 0.9).round() as u32
    } else {
        years
    }
}

/// Site-specific advice, in a fixed order: subgrade, marine, utilities,
/// manual construction, budget
pub fn special_considerations(pavement_type: PavementType, params: &ParameterSet) -> Vec<String> {
    let mut notes: Vec<&str> = Vec::new();

    if params.subgrade_cbr == Some(SubgradeCbr::VeryWeak) {
        notes.push("Additional subbase treatment recommended due to low subgrade strength");
    }

    if params.is_marine() {
        if pavement_type.is_reinforced() {
            notes.push("Use epoxy-coated or galvanized reinforcement to prevent corrosion in marine environment");
        }
        notes.push("Increase concrete cover over reinforcement by 10mm");
        notes.push("Use sulfate-resistant cement (IRC:15-2017)");
    }

    if params.has_utility_lines() {
        if pavement_type == PavementType::Crcp {
            notes.push("Not recommended for areas with many utility lines. Consider JPCP as alternative");
        } else {
            notes.push("Design access chambers aligned with joint patterns");
        }
    }

    if params.is_manual_construction() {
        match pavement_type {
            PavementType::Crcp => notes.push("Not suitable for manual construction. Requires specialized equipment"),
            PavementType::Jpcp | PavementType::Pcp => {
                notes.push("Well-suited for manual construction with proper quality control")
            }
            PavementType::Jrcp => {}
        }
    }

    if params.initial_cost == Some(InitialCost::Low) {
        match pavement_type {
            PavementType::Crcp => {
                notes.push("Higher initial cost but lower life-cycle cost. Consider staged construction")
            }
            PavementType::Jpcp => notes.push("Most economical rigid pavement option for initial construction"),
            _ => {}
        }
    }

    notes.into_iter().map(str::to_string).collect()
}

/// Derive the full set of design recommendations for a type
pub fn derive_specs(pavement_type: PavementType, params: &ParameterSet) -> DesignSpec {
    let details = &standards::profile(pavement_type).details;
    DesignSpec {
        pavement_type,
        thickness_mm: suggested_thickness(pavement_type, params),
        reinforcement: details.reinforcement.to_string(),
        joint_spacing: joint_spacing(pavement_type, params),
        design_life_years: design_life(pavement_type, params),
        special_considerations: special_considerations(pavement_type, params),
        lifecycle_cost: lifecycle_cost(pavement_type, params),
        irc_reference: details.irc_reference.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_thickness_table_and_subgrade_adjustment() {
        assert_eq!(suggested_thickness(PavementType::Jpcp, &ParameterSet::new()), 220);
        assert_eq!(suggested_thickness(PavementType::Crcp, &params(&[("trafficVolume", "4")])), 250);
        assert_eq!(
            suggested_thickness(PavementType::Pcp, &params(&[("trafficVolume", "1"), ("subgradeCBR", "1")])),
            170
        );
        assert_eq!(
            suggested_thickness(PavementType::Jrcp, &params(&[("trafficVolume", "3"), ("subgradeCBR", "4")])),
            230
        );
    }

    #[test]
    fn test_thickness_never_exceeds_selected_slab() {
        let input = params(&[("trafficVolume", "4"), ("slabThickness", "250")]);
        assert_eq!(suggested_thickness(PavementType::Jpcp, &input), 250);
        let thin = params(&[("trafficVolume", "1"), ("slabThickness", "300")]);
        assert_eq!(suggested_thickness(PavementType::Jpcp, &thin), 180);
    }

    #[test]
    fn test_joint_spacing() {
        assert_eq!(joint_spacing(PavementType::Jpcp, &params(&[("slabThickness", "200")])), "4.5 m");
        assert_eq!(joint_spacing(PavementType::Jrcp, &ParameterSet::new()), "5.5 m");
        assert_eq!(joint_spacing(PavementType::Jrcp, &params(&[("trafficVolume", "4")])), "6.5 m");
        assert_eq!(joint_spacing(PavementType::Crcp, &ParameterSet::new()), "None (except at structures)");
        assert_eq!(joint_spacing(PavementType::Pcp, &ParameterSet::new()), "Panel length (typically 3-5m)");
    }

    #[test]
    fn test_design_life() {
        assert_eq!(design_life(PavementType::Jrcp, &ParameterSet::new()), 25);
        assert_eq!(design_life(PavementType::Jpcp, &params(&[("designLife", "40")])), 40);
        assert_eq!(design_life(PavementType::Crcp, &params(&[("designLife", "10")])), 30);
        assert_eq!(design_life(PavementType::Crcp, &params(&[("trafficVolume", "4"), ("designLife", "40")])), 36);
        assert_eq!(design_life(PavementType::Jrcp, &params(&[("trafficVolume", "4")])), 23);
    }

    #[test]
    fn test_special_considerations_order() {
        let input = params(&[
            ("subgradeCBR", "1"),
            ("marineEnvironment", "Yes"),
            ("utilityLines", "Yes"),
            ("manualConstruction", "Yes"),
            ("initialCost", "Low"),
        ]);
        let crcp = special_considerations(PavementType::Crcp, &input);
        assert_eq!(crcp.len(), 7);
        assert!(crcp[0].starts_with("Additional subbase"));
        assert!(crcp[1].starts_with("Use epoxy-coated"));
        assert!(crcp[4].starts_with("Not recommended for areas with many utility lines"));
        assert!(crcp[6].starts_with("Higher initial cost"));

        let jrcp = special_considerations(PavementType::Jrcp, &input);
        assert_eq!(jrcp.len(), 5);
        let pcp = special_considerations(PavementType::Pcp, &input);
        assert_eq!(pcp.len(), 5);
        assert!(!pcp.iter().any(|n| n.starts_with("Use epoxy-coated")));
    }

    #[test]
    fn test_derive_specs_assembles_parts() {
        let input = params(&[("trafficVolume", "2"), ("designLife", "20"), ("subgradeCBR", "3"), ("slabThickness", "200")]);
        let spec = derive_specs(PavementType::Jpcp, &input);
        assert_eq!(spec.thickness_mm, 200);
        assert_eq!(spec.reinforcement, "None (except dowels at joints)");
        assert_eq!(spec.design_life_years, 20);
        assert!(spec.special_considerations.is_empty());
        assert_eq!(spec.lifecycle_cost.initial_cost, 125.0);
        assert_eq!(derive_specs(PavementType::Jpcp, &input), spec);
    }
}
