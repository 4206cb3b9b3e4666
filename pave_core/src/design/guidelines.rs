//! Construction guidelines per pavement type, grouped by category with
//! the governing IRC clause on each item.

use serde::{Deserialize, Serialize};

use crate::params::{ParameterSet, RoadClass};
use crate::pavement::PavementType;

/// A titled group of guideline items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineCategory {
    pub category: String,
    pub items: Vec<String>,
}

impl GuidelineCategory {
    fn new(category: &str, items: &[&str]) -> Self {
        GuidelineCategory {
            category: category.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }

    fn owned(category: &str, items: Vec<String>) -> Self {
        GuidelineCategory {
            category: category.to_string(),
            items,
        }
    }
}

const JPCP_MATERIALS: &[&str] = &[
    "Cement: Use 43/53 grade OPC conforming to IS:8112/IS:12269 (IRC:58-2015 5.1/p.20)",
    "Aggregates: Use crushed material with Los Angeles Abrasion value < 35% (IRC:58-2015 5.2/p.20)",
    "Water: Potable water with pH 6-8, free from harmful materials (IRC:58-2015 5.3/p.21)",
    "Reinforcement: Dowel bars to be 25-40mm diameter, 450-500mm length (IRC:58-2015 7.4/p.33)",
];

const JPCP_SEQUENCE: &[&str] = &[
    "Prepare subgrade with proper compaction to achieve minimum specified CBR (IRC:58-2015 6.2/p.25)",
    "Place separation membrane/anti-friction layer if specified (IRC:58-2015 6.1/p.25)",
    "Arrange dowel assemblies and tie bars at designed spacing (IRC:58-2015 8.2/p.34)",
    "Place concrete with slump 25±15mm and ensure proper compaction (IRC:58-2015 8.7/p.35)",
    "Apply specified surface texturing using tine brush (IRC:58-2015 8.9/p.36)",
    "Begin curing immediately after texturing for minimum 14 days (IRC:58-2015 8.10/p.37)",
];

const JPCP_JOINTS: &[&str] = &[
    "Transverse contraction joints: Cut to depth D/3 to D/4 within 6-12 hours (IRC:58-2015 8.2/p.34)",
    "Longitudinal joints: Place tie bars at 500-1000mm spacing if width > 7m (IRC:58-2015 8.5/p.36)",
    "Construction joints: Install at end of day's work with proper dowel alignment (IRC:58-2015 8.4/p.35)",
    "Seal joints with appropriate sealant after 28-day concrete curing (IRC:58-2015 8.3/p.34)",
];

const JRCP_MATERIALS: &[&str] = &[
    "Cement: Use 43/53 grade OPC conforming to IS:8112/IS:12269 (IRC:58-2015 5.1/p.20)",
    "Aggregates: Use crushed material with Los Angeles Abrasion value < 35% (IRC:58-2015 5.2/p.20)",
    "Water: Potable water with pH 6-8, free from harmful materials (IRC:58-2015 5.3/p.21)",
    "Reinforcement: Longitudinal steel 0.15-0.25% of cross-section (IRC:58-2015 7.2/p.32)",
    "Dowel bars: 32-40mm diameter, 450-500mm length (IRC:58-2015 7.4/p.33)",
];

const JRCP_SEQUENCE: &[&str] = &[
    "Prepare subgrade with proper compaction to achieve minimum specified CBR (IRC:58-2015 6.2/p.25)",
    "Place separation membrane/anti-friction layer if specified (IRC:58-2015 6.1/p.25)",
    "Place and secure reinforcement with proper cover (IRC:58-2015 7.2/p.32)",
    "Arrange dowel assemblies at designed joint spacing (IRC:58-2015 8.2/p.34)",
    "Place concrete with slump 25±15mm and ensure proper compaction (IRC:58-2015 8.7/p.35)",
    "Apply specified surface texturing using tine brush (IRC:58-2015 8.9/p.36)",
    "Begin curing immediately after texturing for minimum 14 days (IRC:58-2015 8.10/p.37)",
];

const JRCP_JOINTS: &[&str] = &[
    "Transverse contraction joints: Place at 9-10m spacing (IRC:58-2015 8.2/p.33)",
    "Longitudinal joints: Place tie bars at 500-1000mm spacing if width > 7m (IRC:58-2015 8.5/p.36)",
    "Construction joints: Install at end of day's work with proper dowel alignment (IRC:58-2015 8.4/p.35)",
    "Seal joints with appropriate sealant after 28-day concrete curing (IRC:58-2015 8.3/p.34)",
];

const CRCP_MATERIALS: &[&str] = &[
    "Cement: Use 43/53 grade OPC conforming to IS:8112/IS:12269 (IRC:118-2015 5.1/p.7)",
    "Aggregates: Use crushed material with Los Angeles Abrasion value < 30% (IRC:118-2015 5.2/p.7)",
    "Water: Potable water with pH 6-8, free from harmful materials (IRC:118-2015 5.3/p.8)",
    "Longitudinal Steel: 0.65-0.80% of cross-section area (IRC:118-2015 2.2(vii)/p.4)",
    "Transverse Steel: 0.08-0.10% of cross-section area (IRC:118-2015 6.2/p.9)",
];

const CRCP_SEQUENCE: &[&str] = &[
    "Prepare subgrade with proper compaction to achieve CBR ≥ 6% (IRC:118-2015 6.3/p.10)",
    "Do not provide anti-friction layer (IRC:118-2015 2.2(iv)/p.3)",
    "Place and secure reinforcement with proper cover and splicing (IRC:118-2015 7.1/p.11)",
    "Place concrete with mechanized equipment (IRC:118-2015 3.2(iv)/p.5)",
    "Apply specified surface texturing using tine brush (IRC:118-2015 2.2(viii)/p.4)",
    "Begin curing immediately after texturing for minimum 14 days (IRC:118-2015 8.4/p.14)",
];

const CRCP_SPECIAL: &[&str] = &[
    "Terminal joints: Provide at bridges and structures (IRC:118-2015 2.2(vi)/p.4)",
    "Longitudinal joints: Provide if width > 4.5m (IRC:118-2015 2.2(ii)/p.3)",
    "Cracks: Should develop at 0.5-2.0m spacing with width ≤ 0.6mm (IRC:118-2015 2.2(i)/p.3)",
    "Shoulders: Use tied concrete shoulders with no longitudinal joint (IRC:118-2015 2.2(vii)/p.4)",
    "Epoxy-coated rebars: Use in marine/corrosive environments (IRC:118-2015 3.2(i)/p.5)",
];

const MARINE_REQUIREMENTS: &[&str] = &[
    "Use sulphate-resistant cement or appropriate cement with mineral admixtures in marine environment (IRC standards)",
    "Consider lower water-cement ratio (≤ 0.45) to reduce permeability (IRC standards)",
    "Provide additional concrete cover (min. 50mm) to reinforcement in marine areas (IRC standards)",
    "Use corrosion inhibitors or surface treatments to protect reinforcement (IRC standards)",
];

/// PCP text varies between rural roads and expressways
struct PrecastVariant {
    standard: &'static str,
    cement_grade: &'static str,
    abrasion_limit: &'static str,
    base_course: &'static str,
    min_cbr: &'static str,
    anti_friction_verb: &'static str,
    slump: &'static str,
    curing_days: &'static str,
    joint_spacing: &'static str,
}

const RURAL_PCP: PrecastVariant = PrecastVariant {
    standard: "IRC:SP:62-2014",
    cement_grade: "33/43",
    abrasion_limit: "40",
    base_course: "Optional GSB layer",
    min_cbr: "3",
    anti_friction_verb: "Consider",
    slump: "25±15mm",
    curing_days: "7",
    joint_spacing: "3.0-3.6m",
};

const EXPRESSWAY_PCP: PrecastVariant = PrecastVariant {
    standard: "IRC:SP:140-2024",
    cement_grade: "43/53",
    abrasion_limit: "35",
    base_course: "Required DLC/GSB layer",
    min_cbr: "5",
    anti_friction_verb: "Provide",
    slump: "25±10mm",
    curing_days: "14",
    joint_spacing: "4.5m",
};

fn precast_guidelines(v: &PrecastVariant) -> Vec<GuidelineCategory> {
    let code = v.standard;
    vec![
        GuidelineCategory::owned(
            "Materials",
            vec![
                format!("Cement: Use {} grade OPC conforming to IS standards ({code})", v.cement_grade),
                format!(
                    "Aggregates: Use crushed material with Los Angeles Abrasion value < {}% ({code})",
                    v.abrasion_limit
                ),
                format!("Water: Potable water free from harmful materials ({code})"),
                format!("Base/Subbase: {} ({code})", v.base_course),
            ],
        ),
        GuidelineCategory::owned(
            "Construction Sequence",
            vec![
                format!("Prepare subgrade with proper compaction to achieve CBR ≥ {}% ({code})", v.min_cbr),
                format!("{} anti-friction layer if no base course ({code})", v.anti_friction_verb),
                format!("Place concrete with slump {} ({code})", v.slump),
                format!("Apply specified surface texturing ({code})"),
                format!(
                    "Begin curing immediately after texturing for minimum {} days ({code})",
                    v.curing_days
                ),
            ],
        ),
        GuidelineCategory::owned(
            "Joint Construction",
            vec![
                format!(
                    "Transverse contraction joints: Cut to depth D/3 to D/4 at {} spacing ({code})",
                    v.joint_spacing
                ),
                format!("Longitudinal joints: Place if width exceeds recommended values ({code})"),
                format!("Construction joints: Install at end of day's work ({code})"),
                format!("Seal joints with appropriate sealant after curing ({code})"),
            ],
        ),
    ]
}

/// Construction guidelines for a type. Marine sites add a block of
/// durability requirements.
pub fn construction_guidelines(pavement_type: PavementType, params: &ParameterSet) -> Vec<GuidelineCategory> {
    let mut guidelines = match pavement_type {
        PavementType::Jpcp => vec![
            GuidelineCategory::new("Materials", JPCP_MATERIALS),
            GuidelineCategory::new("Construction Sequence", JPCP_SEQUENCE),
            GuidelineCategory::new("Joint Construction", JPCP_JOINTS),
        ],
        PavementType::Jrcp => vec![
            GuidelineCategory::new("Materials", JRCP_MATERIALS),
            GuidelineCategory::new("Construction Sequence", JRCP_SEQUENCE),
            GuidelineCategory::new("Joint Construction", JRCP_JOINTS),
        ],
        PavementType::Crcp => vec![
            GuidelineCategory::new("Materials", CRCP_MATERIALS),
            GuidelineCategory::new("Construction Sequence", CRCP_SEQUENCE),
            GuidelineCategory::new("Special Requirements", CRCP_SPECIAL),
        ],
        PavementType::Pcp => match params.road_class() {
            RoadClass::Rural => precast_guidelines(&RURAL_PCP),
            RoadClass::Expressway => precast_guidelines(&EXPRESSWAY_PCP),
        },
    };

    if params.is_marine() {
        guidelines.push(GuidelineCategory::new("Marine Environment Requirements", MARINE_REQUIREMENTS));
    }
    guidelines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(guidelines: &[GuidelineCategory]) -> Vec<&str> {
        guidelines.iter().map(|g| g.category.as_str()).collect()
    }

    #[test]
    fn test_crcp_has_special_requirements() {
        let guidelines = construction_guidelines(PavementType::Crcp, &ParameterSet::new());
        assert_eq!(
            categories(&guidelines),
            vec!["Materials", "Construction Sequence", "Special Requirements"]
        );
        assert_eq!(guidelines[2].items.len(), 5);
    }

    #[test]
    fn test_pcp_text_follows_road_class() {
        let rural = ParameterSet::from_pairs([("trafficVolume", "1")]).unwrap();
        let guidelines = construction_guidelines(PavementType::Pcp, &rural);
        assert_eq!(
            guidelines[0].items[0],
            "Cement: Use 33/43 grade OPC conforming to IS standards (IRC:SP:62-2014)"
        );
        assert!(guidelines[2].items[0].contains("3.0-3.6m"));

        let expressway = construction_guidelines(PavementType::Pcp, &ParameterSet::new());
        assert_eq!(
            expressway[1].items[0],
            "Prepare subgrade with proper compaction to achieve CBR ≥ 5% (IRC:SP:140-2024)"
        );
    }

    #[test]
    fn test_marine_block_is_appended() {
        let marine = ParameterSet::from_pairs([("marineEnvironment", "Yes")]).unwrap();
        let guidelines = construction_guidelines(PavementType::Jpcp, &marine);
        assert_eq!(guidelines.len(), 4);
        assert_eq!(guidelines[3].category, "Marine Environment Requirements");
        assert_eq!(construction_guidelines(PavementType::Jpcp, &ParameterSet::new()).len(), 3);
    }
}
