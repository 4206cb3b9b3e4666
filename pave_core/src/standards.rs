//! # Design Standard Profiles
//!
//! Static reference data for each pavement type, as summarized from the IRC
//! codes (IRC:58-2015 for jointed pavements, IRC:118-2015 for CRCP,
//! IRC:SP:62-2014 and IRC:SP:140-2024 for PCP).
//!
//! A [`StandardProfile`] is a typed requirement record. The compatibility
//! model grades inputs against it, the performance metrics derive from it,
//! and the design generator reads its display text. Profiles are built once
//! and never mutated.
//!
//! ## Road-class variants
//!
//! PCP requirements differ between rural roads (traffic bucket 1) and
//! expressways; those fields use [`ByRoadClass`].

use serde::Serialize;

use once_cell::sync::Lazy;

use crate::compatibility::Feature;
use crate::params::{
    InitialCost, LongitudinalJoints, Maintenance, RoadClass, SteelReinforcement, TransverseJoints,
};
use crate::pavement::{PavementType, PerType};

/// A requirement that differs by road class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByRoadClass<T> {
    pub rural: T,
    pub expressway: T,
}

impl<T: Copy> ByRoadClass<T> {
    pub fn get(&self, class: RoadClass) -> T {
        match class {
            RoadClass::Rural => self.rural,
            RoadClass::Expressway => self.expressway,
        }
    }
}

/// A minimum that is either fixed or depends on road class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Minimum<T> {
    Uniform(T),
    ByRoadClass(ByRoadClass<T>),
}

impl<T: Copy> Minimum<T> {
    pub fn for_class(&self, class: RoadClass) -> T {
        match self {
            Minimum::Uniform(value) => *value,
            Minimum::ByRoadClass(by_class) => by_class.get(class),
        }
    }
}

/// Traffic band a type is intended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficRequirement {
    /// Highways and expressways with at least 450 CVPD
    Highway,
    /// Very high volume of commercial traffic
    VeryHigh,
    /// Rural roads below 450 CVPD, or high-volume expressways
    RuralOrExpressway,
}

/// Design life window in years
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LifeRequirement {
    Range { preferred: u32, min: u32, max: u32 },
    ByRoadClass(ByRoadClass<(u32, u32)>),
}

impl LifeRequirement {
    /// Minimum acceptable life for a road class
    pub fn min_for(&self, class: RoadClass) -> u32 {
        match self {
            LifeRequirement::Range { min, .. } => *min,
            LifeRequirement::ByRoadClass(by_class) => by_class.get(class).0,
        }
    }
}

/// Longitudinal steel arrangement a type is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReinforcementRule {
    /// No distributed steel, dowels and tie bars only
    DowelsOnly,
    /// Steel at joints and along the slab length
    JointsAndSlabLength,
    /// 0.65-0.80% continuous longitudinal steel
    Continuous,
    NotApplicable,
}

/// How transverse joints are laid out for a type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum JointSpacingRule {
    /// `min(25 * thickness / 1000, cap)` rounded to 0.5 m
    Formula { cap_m: f64 },
    /// No transverse joints except at structures
    Jointless,
    /// Joint spacing follows the precast panel length
    PanelLength,
}

/// Shoulder provision a type expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShoulderRule {
    /// Tied concrete shoulders with no longitudinal joint
    TiedConcrete,
    /// Shoulders may be tied to the slab
    MayBeTied,
    /// Shoulders recommended on expressways
    RecommendedForExpressway,
}

/// Presence of an optional slab feature (anti-friction layer, edge support,
/// terminal slabs, special joints)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureRule {
    Required,
    Optional,
    /// Important on expressways
    Important,
    NotProvided,
    AsPerDesign,
    NotApplicable,
}

/// Acceptable maintenance effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaintenanceRule {
    Level(Maintenance),
    ByRoadClass(ByRoadClass<Maintenance>),
}

/// Initial cost band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostRule {
    Level(InitialCost),
    /// Higher initial cost offset by a lower life-cycle cost
    HigherWithLowerLifecycle,
    ByRoadClass(ByRoadClass<InitialCost>),
}

impl CostRule {
    /// Cost levels this rule fully matches
    pub fn level(&self) -> Option<InitialCost> {
        match self {
            CostRule::Level(level) => Some(*level),
            CostRule::HigherWithLowerLifecycle => Some(InitialCost::High),
            CostRule::ByRoadClass(_) => None,
        }
    }
}

/// Whether a type tolerates a site hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Suitability {
    Compatible,
    Avoid,
}

/// Environment compatibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentSuitability {
    pub marine: Suitability,
    pub utility_lines: Suitability,
    pub manual_construction: Suitability,
}

/// A cited clause of a design code, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrcReference {
    pub code: &'static str,
    pub section: &'static str,
    pub page: &'static str,
    pub description: &'static str,
}

/// Display text for a pavement type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDetails {
    pub name: &'static str,
    pub description: &'static str,
    pub reinforcement: &'static str,
    pub irc_reference: &'static str,
    pub maintenance_interval: &'static str,
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
}

/// Typed requirement record for one pavement type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardProfile {
    pub pavement_type: PavementType,
    pub traffic: TrafficRequirement,
    pub design_life: LifeRequirement,
    /// Minimum subgrade CBR in percent
    pub min_cbr: Minimum<f64>,
    /// Minimum slab thickness in mm
    pub min_thickness: Minimum<u32>,
    pub reinforcement: ReinforcementRule,
    /// Steel arrangements that satisfy the type
    pub accepted_steel: &'static [SteelReinforcement],
    /// Transverse joint layout the type is built with, if prescribed
    pub transverse_joints: Option<TransverseJoints>,
    /// Carriageway width above which longitudinal joints are placed
    pub longitudinal_joint_width: Option<LongitudinalJoints>,
    pub joint_spacing: JointSpacingRule,
    pub shoulders: ShoulderRule,
    pub anti_friction_layer: FeatureRule,
    pub edge_support: FeatureRule,
    pub terminal_slabs: FeatureRule,
    pub special_joints: FeatureRule,
    pub maintenance: MaintenanceRule,
    pub initial_cost: CostRule,
    /// Unsuitable for light traffic, village roads and short lengths
    pub heavy_traffic_only: bool,
    pub environment: EnvironmentSuitability,
    /// Code clause backing each requirement, where one exists
    pub feature_references: &'static [(Feature, &'static str)],
    pub main_standard: &'static str,
    pub references: Vec<IrcReference>,
    pub details: TypeDetails,
}

impl StandardProfile {
    /// Clause backing a requirement, if any
    pub fn reference_for(&self, feature: Feature) -> Option<&'static str> {
        self.feature_references
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, clause)| *clause)
    }
}

const COMPATIBLE_EVERYWHERE: EnvironmentSuitability = EnvironmentSuitability {
    marine: Suitability::Compatible,
    utility_lines: Suitability::Compatible,
    manual_construction: Suitability::Compatible,
};

const fn irc(
    code: &'static str,
    section: &'static str,
    page: &'static str,
    description: &'static str,
) -> IrcReference {
    IrcReference {
        code,
        section,
        page,
        description,
    }
}

const JPCP_CLAUSES: &[(Feature, &str)] = &[
    (Feature::TrafficVolume, "IRC:58-2015 2.1/p.2"),
    (Feature::DesignLife, "IRC:58-2015 2.1/p.2"),
    (Feature::SubgradeCbr, "IRC:58-2015 Table 4/p.13"),
    (Feature::SlabThickness, "IRC:58-2015 6.3.2/p.26"),
    (Feature::SteelReinforcement, "IRC:58-2015 7.1/p.31"),
    (Feature::TransverseJoints, "IRC:58-2015 2.1/p.2"),
    (Feature::LongitudinalJoints, "IRC:58-2015 8.5/p.36"),
    (Feature::Shoulders, "IRC:58-2015 9.1/p.38"),
    (Feature::AntiFrictionLayer, "IRC:58-2015 6.1/p.25"),
    (Feature::EdgeSupport, "IRC:58-2015 9.1/p.38"),
    (Feature::SpecialJoints, "IRC:58-2015 8.6/p.36"),
    (Feature::SurfaceTexture, "IRC:58-2015 8.9/p.36"),
    (Feature::Maintenance, "IRC:58-2015 11/p.44"),
    (Feature::InitialCost, "IRC:58-2015 1.2/p.1"),
    (Feature::MarineEnvironment, "IRC:58-2015 5.4/p.21"),
    (Feature::UtilityLines, "IRC:58-2015 13/p.46"),
];

const JRCP_CLAUSES: &[(Feature, &str)] = &[
    (Feature::TrafficVolume, "IRC:58-2015 2.1/p.2"),
    (Feature::DesignLife, "IRC:58-2015 2.1/p.2"),
    (Feature::SubgradeCbr, "IRC:58-2015 Table 4/p.13"),
    (Feature::SlabThickness, "IRC:58-2015 6.3.2/p.26"),
    (Feature::SteelReinforcement, "IRC:58-2015 7.2/p.32"),
    (Feature::TransverseJoints, "IRC:58-2015 2.1/p.2"),
    (Feature::LongitudinalJoints, "IRC:58-2015 8.5/p.36"),
    (Feature::Shoulders, "IRC:58-2015 9.1/p.38"),
    (Feature::AntiFrictionLayer, "IRC:58-2015 6.1/p.25"),
    (Feature::EdgeSupport, "IRC:58-2015 9.1/p.38"),
    (Feature::SpecialJoints, "IRC:58-2015 8.6/p.36"),
    (Feature::SurfaceTexture, "IRC:58-2015 8.9/p.36"),
    (Feature::Maintenance, "IRC:58-2015 11/p.44"),
    (Feature::InitialCost, "IRC:58-2015 1.2/p.1"),
    (Feature::MarineEnvironment, "IRC:58-2015 5.4/p.21"),
    (Feature::UtilityLines, "IRC:58-2015 13/p.46"),
];

const CRCP_CLAUSES: &[(Feature, &str)] = &[
    (Feature::TrafficVolume, "IRC:118-2015 1/p.1"),
    (Feature::DesignLife, "IRC:118-2015 3.1/p.5"),
    (Feature::SubgradeCbr, "IRC:118-2015 6.3/p.10"),
    (Feature::SlabThickness, "IRC:118-2015 6.3/p.10"),
    (Feature::SteelReinforcement, "IRC:118-2015 2.2(vii)/p.4"),
    (Feature::TransverseJoints, "IRC:118-2015 1/p.1"),
    (Feature::LongitudinalJoints, "IRC:118-2015 2.2(ii)/p.3"),
    (Feature::Shoulders, "IRC:118-2015 2.2(vii)/p.4"),
    (Feature::AntiFrictionLayer, "IRC:118-2015 2.2(iv)/p.3"),
    (Feature::EdgeSupport, "IRC:118-2015 2.2(vii)/p.4"),
    (Feature::TerminalSlabs, "IRC:118-2015 2.2(vi)/p.4"),
    (Feature::SpecialJoints, "IRC:118-2015 2.2(v)/p.4"),
    (Feature::SurfaceTexture, "IRC:118-2015 2.2(viii)/p.4"),
    (Feature::Maintenance, "IRC:118-2015 3.1/p.4"),
    (Feature::InitialCost, "IRC:118-2015 3.1/p.5"),
    (Feature::NotForLightTraffic, "IRC:118-2015 3.2(iii)/p.5"),
    (Feature::MarineEnvironment, "IRC:118-2015 3.2(i)/p.5"),
    (Feature::UtilityLines, "IRC:118-2015 3.2(ii)/p.5"),
    (Feature::ManualConstruction, "IRC:118-2015 3.2(iv)/p.5"),
];

const PCP_CLAUSES: &[(Feature, &str)] = &[
    (Feature::TrafficVolume, "IRC:SP:62-2014 2.1/p.5, IRC:SP:140-2024 3.1"),
    (Feature::DesignLife, "IRC:SP:62-2014 3.1/p.8, IRC:SP:140-2024 4.1"),
    (Feature::SubgradeCbr, "IRC:SP:62-2014 5.3/p.12, IRC:SP:140-2024 6.2"),
    (Feature::SlabThickness, "IRC:SP:62-2014 7.1/p.15, IRC:SP:140-2024 8.1"),
    (Feature::SteelReinforcement, "IRC:SP:62-2014 7.3/p.17"),
    (Feature::TransverseJoints, "IRC:SP:62-2014 8.1/p.18"),
    (Feature::LongitudinalJoints, "IRC:SP:62-2014 8.3/p.19"),
    (Feature::Shoulders, "IRC:SP:62-2014 9.1/p.21"),
    (Feature::AntiFrictionLayer, "IRC:SP:62-2014 6.2/p.14"),
    (Feature::EdgeSupport, "IRC:SP:140-2024 9.1"),
    (Feature::TerminalSlabs, "IRC:SP:140-2024 8.6"),
    (Feature::SpecialJoints, "IRC:SP:62-2014 8.5/p.19"),
    (Feature::SurfaceTexture, "IRC:SP:62-2014 8.4/p.20"),
    (Feature::Maintenance, "IRC:SP:62-2014 11/p.24"),
    (Feature::InitialCost, "IRC:SP:62-2014 12/p.24"),
    (Feature::MarineEnvironment, "IRC:SP:62-2014 5.4/p.13"),
    (Feature::UtilityLines, "IRC:SP:62-2014 13/p.25"),
    (Feature::ManualConstruction, "IRC:SP:62-2014 10/p.22"),
];

fn jpcp_profile() -> StandardProfile {
    StandardProfile {
        pavement_type: PavementType::Jpcp,
        traffic: TrafficRequirement::Highway,
        design_life: LifeRequirement::Range {
            preferred: 20,
            min: 20,
            max: 20,
        },
        min_cbr: Minimum::Uniform(6.0),
        min_thickness: Minimum::Uniform(200),
        reinforcement: ReinforcementRule::DowelsOnly,
        accepted_steel: &[SteelReinforcement::Unreinforced, SteelReinforcement::AtJoints],
        transverse_joints: Some(TransverseJoints::Regular),
        longitudinal_joint_width: Some(LongitudinalJoints::Width7),
        joint_spacing: JointSpacingRule::Formula { cap_m: 4.5 },
        shoulders: ShoulderRule::MayBeTied,
        anti_friction_layer: FeatureRule::Optional,
        edge_support: FeatureRule::Optional,
        terminal_slabs: FeatureRule::NotApplicable,
        special_joints: FeatureRule::AsPerDesign,
        maintenance: MaintenanceRule::Level(Maintenance::Low),
        initial_cost: CostRule::Level(InitialCost::High),
        heavy_traffic_only: false,
        environment: COMPATIBLE_EVERYWHERE,
        feature_references: JPCP_CLAUSES,
        main_standard: "IRC:58-2015",
        references: vec![
            irc("IRC:58-2015", "2.1", "2", "Traffic volume requirements"),
            irc("IRC:58-2015", "Table 4", "13", "Subgrade CBR requirements"),
            irc("IRC:58-2015", "6.3.2", "26", "Slab thickness specifications"),
            irc("IRC:58-2015", "8.5", "36", "Longitudinal joint requirements"),
        ],
        details: TypeDetails {
            name: "Jointed Plain Concrete Pavement (JPCP)",
            description: "A high-performance rigid pavement with transverse joints to control cracking without reinforcement. Suitable for highways and expressways with medium to high traffic.",
            reinforcement: "None (except dowels at joints)",
            irc_reference: "IRC:58-2015, Section 7.2, Page 32-34",
            maintenance_interval: "6-8 years (joint resealing)",
            advantages: &[
                "Lower initial cost compared to CRCP",
                "Well-established construction practices",
                "Easier to repair specific slabs",
            ],
            disadvantages: &[
                "Regular joint maintenance required",
                "More joints than JRCP",
                "Potential for pumping at joints under heavy traffic",
            ],
        },
    }
}

fn jrcp_profile() -> StandardProfile {
    StandardProfile {
        pavement_type: PavementType::Jrcp,
        traffic: TrafficRequirement::Highway,
        design_life: LifeRequirement::Range {
            preferred: 20,
            min: 20,
            max: 20,
        },
        min_cbr: Minimum::Uniform(6.0),
        min_thickness: Minimum::Uniform(200),
        reinforcement: ReinforcementRule::JointsAndSlabLength,
        accepted_steel: &[SteelReinforcement::AtJoints],
        transverse_joints: Some(TransverseJoints::Longer),
        longitudinal_joint_width: Some(LongitudinalJoints::Width7),
        joint_spacing: JointSpacingRule::Formula { cap_m: 9.0 },
        shoulders: ShoulderRule::MayBeTied,
        anti_friction_layer: FeatureRule::Optional,
        edge_support: FeatureRule::Optional,
        terminal_slabs: FeatureRule::NotApplicable,
        special_joints: FeatureRule::AsPerDesign,
        maintenance: MaintenanceRule::Level(Maintenance::Low),
        initial_cost: CostRule::Level(InitialCost::High),
        heavy_traffic_only: false,
        environment: COMPATIBLE_EVERYWHERE,
        feature_references: JRCP_CLAUSES,
        main_standard: "IRC:58-2015",
        references: vec![
            irc("IRC:58-2015", "2.1", "2", "Traffic volume and design life"),
            irc("IRC:58-2015", "7.2", "32", "Longitudinal steel requirements"),
            irc("IRC:58-2015", "8.2", "33", "Transverse joint specifications"),
        ],
        details: TypeDetails {
            name: "Jointed Reinforced Concrete Pavement (JRCP)",
            description: "Concrete pavement with steel reinforcement and transverse joints at longer intervals. The reinforcement holds cracks tightly together.",
            reinforcement: "0.15-0.25% of cross-sectional area",
            irc_reference: "IRC:58-2015, Section 9.5, Page 48-50",
            maintenance_interval: "8-10 years (joint resealing)",
            advantages: &[
                "Fewer joints than JPCP",
                "Better load transfer across cracks",
                "Less susceptible to pumping",
            ],
            disadvantages: &[
                "Higher initial cost than JPCP",
                "More complex construction",
                "Reinforcement may corrode in marine environments",
            ],
        },
    }
}

fn crcp_profile() -> StandardProfile {
    StandardProfile {
        pavement_type: PavementType::Crcp,
        traffic: TrafficRequirement::VeryHigh,
        design_life: LifeRequirement::Range {
            preferred: 35,
            min: 30,
            max: 40,
        },
        min_cbr: Minimum::Uniform(6.0),
        min_thickness: Minimum::Uniform(250),
        reinforcement: ReinforcementRule::Continuous,
        accepted_steel: &[SteelReinforcement::Longitudinal],
        transverse_joints: Some(TransverseJoints::Jointless),
        longitudinal_joint_width: Some(LongitudinalJoints::Width4_5),
        joint_spacing: JointSpacingRule::Jointless,
        shoulders: ShoulderRule::TiedConcrete,
        anti_friction_layer: FeatureRule::NotProvided,
        edge_support: FeatureRule::Important,
        terminal_slabs: FeatureRule::Required,
        special_joints: FeatureRule::Required,
        maintenance: MaintenanceRule::Level(Maintenance::Minimal),
        initial_cost: CostRule::HigherWithLowerLifecycle,
        heavy_traffic_only: true,
        environment: EnvironmentSuitability {
            marine: Suitability::Avoid,
            utility_lines: Suitability::Avoid,
            manual_construction: Suitability::Avoid,
        },
        feature_references: CRCP_CLAUSES,
        main_standard: "IRC:118-2015",
        references: vec![
            irc("IRC:118-2015", "1", "1", "Traffic volume requirements"),
            irc("IRC:118-2015", "2.2(i)", "3", "Crack spacing and width"),
            irc("IRC:118-2015", "2.2(vii)", "4", "Longitudinal steel percentage"),
            irc("IRC:118-2015", "3.1", "5", "Design life specifications"),
            irc("IRC:118-2015", "3.2", "5", "Environmental restrictions"),
        ],
        details: TypeDetails {
            name: "Continuously Reinforced Concrete Pavement (CRCP)",
            description: "High-performance pavement with continuous longitudinal reinforcement and no transverse joints except at structures. Provides superior long-term performance for high-traffic roads.",
            reinforcement: "0.65-0.80% of cross-sectional area",
            irc_reference: "IRC:118-2015, Section 4.3, Page 18-22",
            maintenance_interval: "12-15 years (minimal maintenance)",
            advantages: &[
                "No transverse joints (smoother ride)",
                "Longer service life",
                "Lower maintenance costs over lifetime",
                "Superior performance in heavy traffic",
            ],
            disadvantages: &[
                "Highest initial cost",
                "Most complex construction",
                "Specialized equipment and skilled labor required",
                "Potential for steel corrosion",
            ],
        },
    }
}

fn pcp_profile() -> StandardProfile {
    StandardProfile {
        pavement_type: PavementType::Pcp,
        traffic: TrafficRequirement::RuralOrExpressway,
        design_life: LifeRequirement::ByRoadClass(ByRoadClass {
            rural: (10, 20),
            expressway: (20, 30),
        }),
        min_cbr: Minimum::ByRoadClass(ByRoadClass {
            rural: 3.0,
            expressway: 5.0,
        }),
        min_thickness: Minimum::ByRoadClass(ByRoadClass {
            rural: 150,
            expressway: 200,
        }),
        reinforcement: ReinforcementRule::NotApplicable,
        accepted_steel: &[SteelReinforcement::Unreinforced],
        transverse_joints: None,
        longitudinal_joint_width: None,
        joint_spacing: JointSpacingRule::PanelLength,
        shoulders: ShoulderRule::RecommendedForExpressway,
        anti_friction_layer: FeatureRule::AsPerDesign,
        edge_support: FeatureRule::Important,
        terminal_slabs: FeatureRule::AsPerDesign,
        special_joints: FeatureRule::AsPerDesign,
        maintenance: MaintenanceRule::ByRoadClass(ByRoadClass {
            rural: Maintenance::Moderate,
            expressway: Maintenance::Low,
        }),
        initial_cost: CostRule::ByRoadClass(ByRoadClass {
            rural: InitialCost::Moderate,
            expressway: InitialCost::High,
        }),
        heavy_traffic_only: false,
        environment: COMPATIBLE_EVERYWHERE,
        feature_references: PCP_CLAUSES,
        main_standard: "IRC:SP:62-2014, IRC:SP:140-2024",
        references: vec![
            irc("IRC:SP:62-2014", "2.1", "5", "Traffic volume for rural roads"),
            irc("IRC:SP:62-2014", "5.3", "12", "Subgrade CBR requirements"),
            irc("IRC:SP:62-2014", "7.1", "15", "Slab thickness specifications"),
            irc("IRC:SP:140-2024", "4.1", "", "Design life for expressways"),
        ],
        details: TypeDetails {
            name: "Precast Concrete Pavement (PCP)",
            description: "Factory-produced concrete panels installed on-site. Ideal for rapid construction, repairs, and areas with limited construction windows.",
            reinforcement: "As per design requirements",
            irc_reference: "IRC:SP:62-2014, Section 5.3, Page 25-28",
            maintenance_interval: "8-12 years (joint maintenance)",
            advantages: &[
                "Rapid construction/installation",
                "Factory quality control",
                "Reduced traffic disruption",
                "Suitable for repair/rehabilitation",
            ],
            disadvantages: &[
                "Higher initial cost than JPCP",
                "More joints",
                "Specialized transportation needed",
                "Limited panel size options",
            ],
        },
    }
}

static PROFILES: Lazy<PerType<StandardProfile>> = Lazy::new(|| PerType {
    jpcp: jpcp_profile(),
    jrcp: jrcp_profile(),
    crcp: crcp_profile(),
    pcp: pcp_profile(),
});

/// Requirement record for a pavement type
pub fn profile(pavement_type: PavementType) -> &'static StandardProfile {
    &PROFILES[pavement_type]
}

/// All four requirement records
pub fn profiles() -> &'static PerType<StandardProfile> {
    &PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_keyed_by_their_own_type() {
        for t in PavementType::ALL {
            assert_eq!(profile(t).pavement_type, t);
        }
    }

    #[test]
    fn test_pcp_minimums_depend_on_road_class() {
        let pcp = profile(PavementType::Pcp);
        assert_eq!(pcp.min_thickness.for_class(RoadClass::Rural), 150);
        assert_eq!(pcp.min_thickness.for_class(RoadClass::Expressway), 200);
        assert_eq!(pcp.min_cbr.for_class(RoadClass::Rural), 3.0);
        assert_eq!(pcp.design_life.min_for(RoadClass::Expressway), 20);
    }

    #[test]
    fn test_only_crcp_avoids_site_hazards() {
        for t in PavementType::ALL {
            let env = profile(t).environment;
            let avoids = env.marine == Suitability::Avoid;
            assert_eq!(avoids, t == PavementType::Crcp);
            assert_eq!(profile(t).heavy_traffic_only, t == PavementType::Crcp);
        }
    }

    #[test]
    fn test_feature_references() {
        let jpcp = profile(PavementType::Jpcp);
        assert_eq!(jpcp.reference_for(Feature::SlabThickness), Some("IRC:58-2015 6.3.2/p.26"));
        assert_eq!(jpcp.reference_for(Feature::TerminalSlabs), None);
        assert_eq!(profile(PavementType::Crcp).feature_references.len(), Feature::ALL.len());
    }

    #[test]
    fn test_details_text() {
        let crcp = profile(PavementType::Crcp);
        assert_eq!(crcp.details.irc_reference, "IRC:118-2015, Section 4.3, Page 18-22");
        assert_eq!(crcp.details.advantages.len(), 4);
        assert_eq!(profile(PavementType::Pcp).details.name, "Precast Concrete Pavement (PCP)");
    }
}
