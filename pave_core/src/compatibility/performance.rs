//! # Performance Metrics
//!
//! Qualitative 0-100 indicators derived from a type's requirement record,
//! plus input-dependent IRC compliance, code notes and warnings.
//!
//! - **Durability**: design life, minimum thickness and steel content.
//! - **Cost-effectiveness**: initial cost band, maintenance effort and life.
//! - **Construction complexity**: steel, joint layout and special elements
//!   (higher means harder to build).
//! - **IRC compliance**: share of code criteria the input satisfies.
//! - **Reference coverage**: share of graded features backed by a clause.

use serde::{Deserialize, Serialize};

use super::{CompatibilityPrediction, Feature};
use crate::params::{
    InitialCost, Maintenance, ParameterSet, Provision, Shoulders, SlabThickness, SteelReinforcement,
    SubgradeCbr, SurfaceTexture, TrafficVolume, TransverseJoints, YesNo,
};
use crate::pavement::PavementType;
use crate::standards::{
    self, CostRule, FeatureRule, LifeRequirement, MaintenanceRule, Minimum, ReinforcementRule,
    StandardProfile, TrafficRequirement,
};

/// Metrics and notes for one pavement type under a given input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub pavement_type: PavementType,
    pub durability: f64,
    pub cost_effectiveness: f64,
    pub construction_complexity: f64,
    /// Percent of applicable IRC criteria met
    pub irc_compliance: u32,
    /// Percent of graded features backed by a code clause
    pub irc_reference_coverage: u32,
    pub irc_notes: Vec<String>,
    pub special_notes: Vec<String>,
    pub warnings: Vec<String>,
}

fn steel_durability(rule: ReinforcementRule) -> f64 {
    match rule {
        ReinforcementRule::Continuous => 10.0,
        ReinforcementRule::JointsAndSlabLength => 7.0,
        ReinforcementRule::DowelsOnly => 3.0,
        ReinforcementRule::NotApplicable => 0.0,
    }
}

/// Durability indicator for a requirement record
pub fn durability(profile: &StandardProfile) -> f64 {
    let mut score = match profile.design_life {
        LifeRequirement::Range { preferred, .. } => preferred as f64 * 0.5,
        LifeRequirement::ByRoadClass(ranges) => {
            (ranges.rural.1 + ranges.expressway.1) as f64 / 2.0 * 0.4
        }
    };
    if let Minimum::Uniform(min) = profile.min_thickness {
        score += min as f64 * 0.01;
    }
    score += steel_durability(profile.reinforcement);
    score.clamp(0.0, 100.0)
}

/// Cost-effectiveness indicator for a requirement record
pub fn cost_effectiveness(profile: &StandardProfile) -> f64 {
    let mut score = 50.0;
    score += match profile.initial_cost {
        // Higher initial cost, recovered over the life cycle
        CostRule::HigherWithLowerLifecycle => -15.0 + 20.0,
        CostRule::Level(InitialCost::High) => -10.0,
        CostRule::Level(InitialCost::Moderate) => -5.0,
        CostRule::Level(InitialCost::Low) => 0.0,
        CostRule::ByRoadClass(_) => 0.0,
    };
    score += match profile.maintenance {
        MaintenanceRule::Level(Maintenance::Minimal) => 15.0,
        MaintenanceRule::Level(Maintenance::Low) => 10.0,
        MaintenanceRule::Level(Maintenance::Moderate) => 5.0,
        MaintenanceRule::Level(Maintenance::High) | MaintenanceRule::ByRoadClass(_) => 0.0,
    };
    score += match profile.design_life {
        LifeRequirement::Range { preferred, .. } => preferred as f64 * 0.5,
        LifeRequirement::ByRoadClass(ranges) => {
            (ranges.rural.1 + ranges.expressway.1) as f64 / 2.0 * 0.3
        }
    };
    score.clamp(0.0, 100.0)
}

/// Construction complexity indicator for a requirement record
pub fn construction_complexity(profile: &StandardProfile) -> f64 {
    let mut score: f64 = 50.0;
    score += match profile.reinforcement {
        ReinforcementRule::Continuous => 20.0,
        ReinforcementRule::JointsAndSlabLength => 15.0,
        ReinforcementRule::DowelsOnly => 5.0,
        ReinforcementRule::NotApplicable => -10.0,
    };
    score += match profile.transverse_joints {
        Some(TransverseJoints::Jointless) => -10.0,
        Some(TransverseJoints::Regular) => 5.0,
        Some(TransverseJoints::Longer) => 10.0,
        None => 0.0,
    };
    if profile.terminal_slabs == FeatureRule::Required {
        score += 10.0;
    }
    if profile.special_joints == FeatureRule::Required {
        score += 10.0;
    }
    score.clamp(0.0, 100.0)
}

/// Percent of the graded features whose requirement cites a clause
pub fn reference_coverage(profile: &StandardProfile) -> u32 {
    let referenced = Feature::ALL
        .iter()
        .filter(|f| profile.reference_for(**f).is_some())
        .count();
    (referenced as f64 / Feature::ALL.len() as f64 * 100.0).round() as u32
}

fn traffic_in_band(rule: TrafficRequirement, traffic: TrafficVolume) -> bool {
    match rule {
        TrafficRequirement::Highway => traffic.level() >= 2,
        TrafficRequirement::VeryHigh => traffic == TrafficVolume::VeryHigh,
        TrafficRequirement::RuralOrExpressway => true,
    }
}

/// Share of IRC criteria satisfied by the input, in percent.
///
/// Traffic, design life and CBR must be supplied to count as met. Slab
/// thickness and CRCP steel are confirmed in the design phase, so an absent
/// value counts as met.
pub fn irc_compliance(profile: &StandardProfile, params: &ParameterSet) -> u32 {
    let class = params.road_class();
    let mut criteria = vec![
        params
            .traffic_volume
            .is_some_and(|t| traffic_in_band(profile.traffic, t)),
        params
            .design_life
            .is_some_and(|l| l.years() >= profile.design_life.min_for(class)),
        params
            .subgrade_cbr
            .is_some_and(|c| c.representative_percent() >= profile.min_cbr.for_class(class)),
        params
            .slab_thickness
            .map_or(true, |s| s.mm() >= profile.min_thickness.for_class(class)),
    ];
    if profile.reinforcement == ReinforcementRule::Continuous {
        criteria.push(
            params
                .steel_reinforcement
                .map_or(true, |s| s == SteelReinforcement::Longitudinal),
        );
    }
    let met = criteria.iter().filter(|c| **c).count();
    (met as f64 / criteria.len() as f64 * 100.0).round() as u32
}

/// Design-code notes for a type
pub fn irc_notes(pavement_type: PavementType) -> Vec<String> {
    let notes: &[&str] = match pavement_type {
        PavementType::Jpcp => &[
            "Design should follow IRC:58-2015 (Guidelines for the Design of Plain Jointed Rigid Pavements for Highways).",
            "Section 6.3.2 (IRC:58-2015) specifies minimum slab thickness of 200mm for highways.",
            "Section 8.1 (IRC:58-2015) recommends contraction joints at 4.5m spacing for 200-250mm thick slabs.",
        ],
        PavementType::Jrcp => &[
            "Design should follow IRC:58-2015 with specific attention to section 7.2 for reinforcement requirements.",
            "JRCP requires 6-10mm diameter bars at 60-70cm c/c as per IRC:58-2015.",
            "Wider joint spacing (up to 15m) requires additional attention to joint design as per section 8.2.",
        ],
        PavementType::Crcp => &[
            "Design should follow IRC:118-2015 (Guidelines for Design and Construction of CRCP).",
            "Section 2.2(i) of IRC:118-2015 requires tight crack spacing (1.1-2.4m) with maximum crack width of 0.5mm.",
            "Longitudinal steel percentage should be 0.6-0.7% of cross-sectional area as per section 6.2.",
            "Terminal joint treatment at bridges and structures as per section 8.5 is critical.",
        ],
        PavementType::Pcp => &[
            "Design should follow IRC:SP:62-2014 (Guidelines for Design and Construction of Precast Concrete Pavement) and SP:140-2024.",
            "PCP systems require special attention to joint design and sealing as per section 8.3.",
            "Factory quality control of precast elements is critical for durability and performance.",
        ],
    };
    notes.iter().map(|n| n.to_string()).collect()
}

fn jointed_notes(code: &str, params: &ParameterSet, notes: &mut Vec<String>) {
    if params.traffic_volume == Some(TrafficVolume::Low) {
        notes.push(format!(
            "{code} is designed for highways/expressways with ≥450 CVPD. Consider PCP for lower traffic volumes (IRC:58-2015 2.1/p.2)."
        ));
    }
    if params.slab_thickness == Some(SlabThickness::Mm150) {
        notes.push(format!(
            "{code} requires minimum 200mm slab thickness per IRC standards (IRC:58-2015 6.3.2/p.26)."
        ));
    }
    if matches!(params.subgrade_cbr, Some(SubgradeCbr::VeryWeak | SubgradeCbr::Weak)) {
        notes.push(format!(
            "{code} typically requires subgrade CBR ≥6%. Consider soil stabilization or increased thickness (IRC:58-2015 Table 4/p.13)."
        ));
    }
}

/// Type-specific notes on input choices that conflict with the standard
pub fn special_notes(pavement_type: PavementType, params: &ParameterSet) -> Vec<String> {
    let mut notes = Vec::new();

    match pavement_type {
        PavementType::Crcp => {
            if params.terminal_slabs == Some(YesNo::No) {
                notes.push("Terminal slabs are required for CRCP at transitions to flexible pavements (IRC:118-2015 2.2(vi)/p.4).".to_string());
            }
            if params.shoulders == Some(Shoulders::NotTied) {
                notes.push("Concrete shoulders tied to the main slab with no longitudinal joint are strongly recommended for CRCP (IRC:118-2015 2.2(vii)/p.4).".to_string());
            }
            if params.anti_friction_layer == Some(Provision::Provided) {
                notes.push("Anti-friction layer is not typically provided for CRCP (IRC:118-2015 2.2(iv)/p.3).".to_string());
            }
            if params.edge_support == Some(Provision::NotProvided) {
                notes.push("Edge support is important for CRCP; concrete shoulder is recommended (IRC:118-2015 2.2(vii)/p.4).".to_string());
            }
            if matches!(params.slab_thickness, Some(SlabThickness::Mm150 | SlabThickness::Mm200)) {
                notes.push("CRCP typically requires thicker slabs; no reduction in thickness is desirable (IRC:118-2015).".to_string());
            }
            if params
                .steel_reinforcement
                .is_some_and(|s| s != SteelReinforcement::Longitudinal)
            {
                notes.push("CRCP requires 0.65-0.80% longitudinal steel reinforcement (IRC:118-2015 2.2(vii)/p.4).".to_string());
            }
        }
        PavementType::Jpcp => jointed_notes("JPCP", params, &mut notes),
        PavementType::Jrcp => {
            jointed_notes("JRCP", params, &mut notes);
            if params.steel_reinforcement == Some(SteelReinforcement::Unreinforced) {
                notes.push("JRCP requires steel reinforcement at joints and along slab length (IRC:58-2015).".to_string());
            }
        }
        PavementType::Pcp => {
            if params.traffic_volume == Some(TrafficVolume::VeryHigh) {
                notes.push("For very high traffic volumes, consider CRCP or JRCP instead of PCP (IRC standards).".to_string());
            }
            if params.traffic_volume.is_some_and(|t| t != TrafficVolume::Low)
                && params.slab_thickness == Some(SlabThickness::Mm150)
            {
                notes.push("For non-rural roads, PCP requires minimum 200mm slab thickness (IRC:SP:62-2014).".to_string());
            }
            if params.subgrade_cbr == Some(SubgradeCbr::VeryWeak)
                && params.traffic_volume == Some(TrafficVolume::Low)
            {
                notes.push("PCP on rural roads requires minimum CBR ≥3%. Consider soil stabilization (IRC:SP:62-2014).".to_string());
            }
        }
    }

    if params.subgrade_cbr == Some(SubgradeCbr::VeryWeak) {
        notes.push("Subgrade CBR <3% is very low. Consider soil stabilization or increased pavement thickness to ensure durability.".to_string());
    }
    if params.slab_thickness == Some(SlabThickness::Mm150) && pavement_type != PavementType::Pcp {
        notes.push("Selected thickness (150mm) is below IRC minimum recommendation for this pavement type. Consider increasing thickness.".to_string());
    }
    if params.surface_texture == Some(SurfaceTexture::Untextured) {
        notes.push("Surface texturing is required for all concrete pavements per IRC standards (IRC:118-2015 2.2(viii)/p.4).".to_string());
    }
    if pavement_type == PavementType::Crcp
        && params
            .transverse_joints
            .is_some_and(|j| j != TransverseJoints::Jointless)
    {
        notes.push("CRCP does not require transverse joints as it relies on controlled natural cracking (IRC:118-2015 1/p.1).".to_string());
    }

    notes
}

/// Hard warnings for CRCP on restricted sites
pub fn warnings(pavement_type: PavementType, params: &ParameterSet) -> Vec<String> {
    let mut warnings = Vec::new();
    if pavement_type != PavementType::Crcp {
        return warnings;
    }
    if params.not_for_light_traffic == Some(YesNo::No) {
        warnings.push("WARNING: CRCP is not recommended for light traffic roads, village roads, urban streets, or short length projects (IRC:118-2015 3.2(iii)/p.5).".to_string());
    }
    if params.is_marine() {
        warnings.push("WARNING: IRC:118-2015 3.2(i)/p.5 states CRCP should be avoided in marine/corrosive environments unless epoxy/galvanized steel is used.".to_string());
    }
    if params.has_utility_lines() {
        warnings.push("WARNING: IRC:118-2015 3.2(ii)/p.5 states CRCP should be avoided in areas with many utility lines under the pavement.".to_string());
    }
    if params.is_manual_construction() {
        warnings.push("WARNING: IRC:118-2015 3.2(iv)/p.5 states CRCP should be avoided for manual construction projects.".to_string());
    }
    warnings
}

/// Metrics and notes for a pavement type under the given input
pub fn assess_type(pavement_type: PavementType, params: &ParameterSet) -> PerformanceReport {
    let profile = standards::profile(pavement_type);
    PerformanceReport {
        pavement_type,
        durability: durability(profile),
        cost_effectiveness: cost_effectiveness(profile),
        construction_complexity: construction_complexity(profile),
        irc_compliance: irc_compliance(profile, params),
        irc_reference_coverage: reference_coverage(profile),
        irc_notes: irc_notes(pavement_type),
        special_notes: special_notes(pavement_type, params),
        warnings: warnings(pavement_type, params),
    }
}

/// Metrics and notes for the type a prediction settled on
pub fn assess(prediction: &CompatibilityPrediction, params: &ParameterSet) -> PerformanceReport {
    assess_type(prediction.top_type, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::profile;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_static_indicators() {
        let expected = [
            (PavementType::Jpcp, 15.0, 60.0, 60.0),
            (PavementType::Jrcp, 19.0, 60.0, 75.0),
            (PavementType::Crcp, 30.0, 87.5, 80.0),
            (PavementType::Pcp, 10.0, 57.5, 40.0),
        ];
        for (t, dur, cost, complexity) in expected {
            let p = profile(t);
            assert!((durability(p) - dur).abs() < 1e-9, "{t} durability");
            assert!((cost_effectiveness(p) - cost).abs() < 1e-9, "{t} cost");
            assert!((construction_complexity(p) - complexity).abs() < 1e-9, "{t} complexity");
        }
    }

    #[test]
    fn test_reference_coverage() {
        assert_eq!(reference_coverage(profile(PavementType::Jpcp)), 84);
        assert_eq!(reference_coverage(profile(PavementType::Crcp)), 100);
        assert_eq!(reference_coverage(profile(PavementType::Pcp)), 95);
    }

    #[test]
    fn test_irc_compliance() {
        let ideal = params(&[("trafficVolume", "2"), ("designLife", "20"), ("subgradeCBR", "3"), ("slabThickness", "200")]);
        assert_eq!(irc_compliance(profile(PavementType::Jpcp), &ideal), 100);

        let rural = params(&[("trafficVolume", "1")]);
        assert_eq!(irc_compliance(profile(PavementType::Jpcp), &rural), 25);

        // CRCP adds the steel criterion
        let crcp = params(&[("trafficVolume", "4"), ("designLife", "40"), ("subgradeCBR", "4"), ("steelReinforcement", "None")]);
        assert_eq!(irc_compliance(profile(PavementType::Crcp), &crcp), 80);
    }

    #[test]
    fn test_crcp_warnings_follow_site_conditions() {
        let input = params(&[("marineEnvironment", "Yes"), ("manualConstruction", "Yes")]);
        let crcp = warnings(PavementType::Crcp, &input);
        assert_eq!(crcp.len(), 2);
        assert!(crcp[0].contains("marine"));
        assert!(crcp[1].contains("manual construction"));
        assert!(warnings(PavementType::Jpcp, &input).is_empty());
    }

    #[test]
    fn test_special_notes() {
        let input = params(&[("slabThickness", "150"), ("subgradeCBR", "1"), ("steelReinforcement", "None")]);
        let notes = special_notes(PavementType::Jrcp, &input);
        assert_eq!(notes.len(), 5);
        assert!(notes[0].starts_with("JRCP requires minimum 200mm"));
        assert!(notes[2].contains("JRCP requires steel reinforcement"));

        assert!(special_notes(PavementType::Pcp, &ParameterSet::new()).is_empty());
    }

    #[test]
    fn test_assess_uses_top_type() {
        let input = params(&[("trafficVolume", "1"), ("designLife", "10")]);
        let prediction = super::super::predict(&input);
        let report = assess(&prediction, &input);
        assert_eq!(report.pavement_type, PavementType::Pcp);
        assert_eq!(report.irc_notes.len(), 3);
    }
}
