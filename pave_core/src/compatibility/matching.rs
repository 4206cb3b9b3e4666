//! Graded match rules between parameter values and a requirement record.

use serde::{Deserialize, Serialize};

use super::{Feature, NEUTRAL_SCORE};
use crate::params::{
    DesignLife, InitialCost, LongitudinalJoints, Maintenance, ParameterSet, Provision, RoadClass,
    Shoulders, SlabThickness, SteelReinforcement, SubgradeCbr, SurfaceTexture, TrafficVolume,
    TransverseJoints, YesNo,
};
use crate::standards::{
    CostRule, FeatureRule, LifeRequirement, MaintenanceRule, Minimum, ShoulderRule,
    StandardProfile, Suitability, TrafficRequirement,
};

/// Outcome of one graded rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub feature: Feature,
    pub weight: f64,
    /// Fraction of the weight awarded, from -1 to 1
    pub credit: f64,
    /// `weight * credit`
    pub contribution: f64,
    pub matched: bool,
    pub note: String,
}

/// Compatibility of one type with the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCompatibility {
    /// `accumulated / total_weight * 100`
    pub score: f64,
    pub total_weight: f64,
    pub details: Vec<MatchDetail>,
}

struct Grade {
    credit: f64,
    note: &'static str,
}

const fn grade(credit: f64, note: &'static str) -> Grade {
    Grade { credit, note }
}

fn grade_traffic(rule: TrafficRequirement, traffic: TrafficVolume) -> Grade {
    use TrafficVolume::*;
    match (rule, traffic) {
        (TrafficRequirement::VeryHigh, VeryHigh) => grade(1.0, "Perfect match for very high traffic"),
        (TrafficRequirement::VeryHigh, Low | Medium) => {
            grade(-0.5, "Traffic mismatch with IRC recommendations")
        }
        (TrafficRequirement::Highway, Medium | High) => grade(1.0, "Perfect match for highway traffic"),
        (TrafficRequirement::Highway, VeryHigh) => grade(0.8, "Above minimum traffic threshold"),
        (TrafficRequirement::RuralOrExpressway, Low) => {
            grade(1.0, "Below maximum traffic threshold for rural roads")
        }
        _ => grade(0.0, "No clear traffic match"),
    }
}

fn grade_design_life(rule: LifeRequirement, life: DesignLife, class: RoadClass) -> Grade {
    let years = life.years() as i64;
    match rule {
        LifeRequirement::Range { preferred, min, max } => {
            let (preferred, min, max) = (preferred as i64, min as i64, max as i64);
            let distance = (years - preferred).abs();
            if distance == 0 {
                grade(1.0, "Perfect match with IRC recommended design life")
            } else if distance <= 5 {
                grade(1.0 - distance as f64 / 10.0, "Close to IRC recommended design life")
            } else if (min..=max).contains(&years) {
                grade(0.9, "Within IRC recommended range")
            } else if distance > 10 || years < min - 5 || years > max + 5 {
                grade(-0.3, "Outside IRC recommended design life range")
            } else {
                grade(0.0, "No clear design life match")
            }
        }
        LifeRequirement::ByRoadClass(ranges) => {
            let (min, max) = ranges.get(class);
            if (min as i64..=max as i64).contains(&years) {
                match class {
                    RoadClass::Rural => grade(0.9, "Matches rural road design life in IRC"),
                    RoadClass::Expressway => grade(0.9, "Matches expressway design life in IRC"),
                }
            } else {
                grade(0.0, "Outside recommended design life range")
            }
        }
    }
}

fn grade_cbr(rule: Minimum<f64>, cbr: SubgradeCbr, class: RoadClass) -> Grade {
    let percent = cbr.representative_percent();
    match rule {
        Minimum::Uniform(min) => {
            if percent >= min {
                grade(1.0, "Meets or exceeds minimum IRC CBR requirement")
            } else if percent < min * 0.8 {
                grade(-1.0, "Critically low CBR value per IRC standards")
            } else {
                grade(0.0, "Close to minimum CBR requirement")
            }
        }
        Minimum::ByRoadClass(mins) => {
            if percent >= mins.get(class) {
                match class {
                    RoadClass::Rural => grade(1.0, "Meets rural road CBR requirement"),
                    RoadClass::Expressway => grade(1.0, "Meets expressway CBR requirement"),
                }
            } else if percent >= mins.rural * 0.8 {
                grade(0.5, "Close to but below minimum CBR requirement")
            } else {
                grade(-0.5, "Subgrade CBR too low per IRC requirements")
            }
        }
    }
}

fn grade_slab(rule: Minimum<u32>, slab: SlabThickness, class: RoadClass) -> Grade {
    let mm = slab.mm();
    match rule {
        Minimum::Uniform(min) if mm >= min => {
            grade(1.0, "Meets or exceeds minimum IRC thickness requirement")
        }
        Minimum::Uniform(_) => grade(-0.8, "Below minimum IRC thickness requirement"),
        Minimum::ByRoadClass(mins) if mm >= mins.get(class) => match class {
            RoadClass::Rural => grade(1.0, "Meets rural road thickness requirement"),
            RoadClass::Expressway => grade(1.0, "Meets expressway thickness requirement"),
        },
        Minimum::ByRoadClass(_) => grade(-1.0, "Below minimum IRC thickness requirement"),
    }
}

fn grade_steel(accepted: &[SteelReinforcement], steel: SteelReinforcement) -> Grade {
    if accepted.contains(&steel) {
        grade(1.0, "Steel arrangement matches IRC requirement")
    } else {
        grade(0.0, "Steel arrangement differs from IRC requirement")
    }
}

fn grade_transverse(rule: Option<TransverseJoints>, joints: TransverseJoints) -> Grade {
    match rule {
        Some(expected) if expected == joints => grade(1.0, "Transverse joint layout matches IRC requirement"),
        Some(_) => grade(0.0, "Transverse joint layout differs from IRC requirement"),
        None => grade(0.0, "Transverse joints as per design"),
    }
}

fn grade_longitudinal(rule: Option<LongitudinalJoints>, joints: LongitudinalJoints) -> Grade {
    if joints == LongitudinalJoints::NotRequired {
        grade(0.5, "No longitudinal joints needed at this width")
    } else if rule == Some(joints) {
        grade(1.0, "Longitudinal joints at the IRC width threshold")
    } else {
        grade(0.0, "Longitudinal joint threshold differs")
    }
}

fn grade_shoulders(rule: ShoulderRule, shoulders: Shoulders) -> Grade {
    match (rule, shoulders) {
        (ShoulderRule::TiedConcrete, Shoulders::TiedConcrete) => {
            grade(1.0, "Tied concrete shoulders as recommended")
        }
        (ShoulderRule::TiedConcrete | ShoulderRule::MayBeTied, Shoulders::TiedConcrete | Shoulders::TiedOther) => {
            grade(0.8, "Tied shoulders acceptable")
        }
        (ShoulderRule::MayBeTied, Shoulders::NotTied) => grade(0.5, "Untied shoulders permitted"),
        _ => grade(0.0, "Shoulder provision differs from recommendation"),
    }
}

fn grade_anti_friction(rule: FeatureRule, layer: Provision) -> Grade {
    match (rule, layer) {
        (FeatureRule::Optional, Provision::Provided) => grade(1.0, "Anti-friction layer may be provided"),
        (FeatureRule::NotProvided, Provision::NotProvided) => {
            grade(1.0, "Anti-friction layer correctly omitted")
        }
        _ => grade(0.0, "Anti-friction layer provision differs"),
    }
}

fn grade_edge_support(rule: FeatureRule, support: Provision) -> Grade {
    match (rule, support) {
        (_, Provision::Provided) => grade(1.0, "Edge support provided"),
        (FeatureRule::Optional, Provision::NotProvided) => grade(0.3, "Edge support optional"),
        _ => grade(0.0, "Edge support is important for this type"),
    }
}

fn grade_terminal_slabs(rule: FeatureRule, terminal: YesNo) -> Grade {
    match (rule, terminal) {
        (FeatureRule::Required, YesNo::Yes) => grade(1.0, "Terminal slabs provided as required"),
        (FeatureRule::NotApplicable, YesNo::No) => grade(1.0, "Terminal slabs not applicable"),
        _ => grade(0.0, "Terminal slab provision differs"),
    }
}

fn grade_special_joints(rule: FeatureRule, special: YesNo) -> Grade {
    match (rule, special) {
        (FeatureRule::Required, YesNo::Yes) => grade(1.0, "Special joints provided as required"),
        (FeatureRule::AsPerDesign, YesNo::No) => grade(0.7, "Special joints as per design"),
        _ => grade(0.0, "Special joint provision differs"),
    }
}

fn grade_surface(texture: SurfaceTexture) -> Grade {
    match texture {
        SurfaceTexture::TineBrush | SurfaceTexture::Other => grade(1.0, "Surface texture provided"),
        SurfaceTexture::Untextured => grade(-1.0, "Surface texturing is required"),
    }
}

fn level_credit(distance: usize, levels: usize) -> f64 {
    1.0 - distance as f64 / levels as f64
}

fn grade_maintenance(rule: MaintenanceRule, maintenance: Maintenance) -> Grade {
    match rule {
        MaintenanceRule::Level(expected) => {
            let distance = expected.level().abs_diff(maintenance.level());
            if distance == 0 {
                grade(1.0, "Maintenance expectation matches")
            } else {
                grade(level_credit(distance, Maintenance::ALL.len()), "Maintenance expectation differs")
            }
        }
        MaintenanceRule::ByRoadClass(levels) => {
            if maintenance == levels.rural || maintenance == levels.expressway {
                grade(1.0, "Maintenance expectation matches")
            } else {
                grade(0.5, "Maintenance expectation differs")
            }
        }
    }
}

fn grade_cost(rule: CostRule, cost: InitialCost) -> Grade {
    match (rule.level(), rule) {
        (Some(expected), _) => {
            let distance = expected.level().abs_diff(cost.level());
            if distance == 0 {
                grade(1.0, "Budget matches expected initial cost")
            } else {
                grade(level_credit(distance, InitialCost::ALL.len()), "Budget differs from expected initial cost")
            }
        }
        (None, CostRule::ByRoadClass(levels)) if cost == levels.rural || cost == levels.expressway => {
            grade(1.0, "Budget matches expected initial cost")
        }
        (None, _) => grade(0.5, "Budget differs from expected initial cost"),
    }
}

fn grade_light_traffic(heavy_traffic_only: bool, not_for_light: YesNo) -> Grade {
    if not_for_light.is_yes() == heavy_traffic_only {
        grade(1.0, "Light-traffic restriction matches")
    } else {
        grade(-0.5, "Light-traffic restriction mismatch")
    }
}

fn grade_hazard(suitability: Suitability, present: YesNo) -> Grade {
    match (present, suitability) {
        (YesNo::No, _) => grade(1.0, "No site restriction"),
        (YesNo::Yes, Suitability::Compatible) => grade(1.0, "Compatible with site condition"),
        (YesNo::Yes, Suitability::Avoid) => grade(-1.0, "IRC advises avoiding this type here"),
    }
}

fn grade_feature(profile: &StandardProfile, feature: Feature, params: &ParameterSet) -> Option<Grade> {
    let class = params.road_class();
    let env = profile.environment;
    let graded = match feature {
        Feature::TrafficVolume => grade_traffic(profile.traffic, params.traffic_volume?),
        Feature::DesignLife => grade_design_life(profile.design_life, params.design_life?, class),
        Feature::SubgradeCbr => grade_cbr(profile.min_cbr, params.subgrade_cbr?, class),
        Feature::SlabThickness => grade_slab(profile.min_thickness, params.slab_thickness?, class),
        Feature::SteelReinforcement => grade_steel(profile.accepted_steel, params.steel_reinforcement?),
        Feature::TransverseJoints => grade_transverse(profile.transverse_joints, params.transverse_joints?),
        Feature::LongitudinalJoints => {
            grade_longitudinal(profile.longitudinal_joint_width, params.longitudinal_joints?)
        }
        Feature::Shoulders => grade_shoulders(profile.shoulders, params.shoulders?),
        Feature::AntiFrictionLayer => grade_anti_friction(profile.anti_friction_layer, params.anti_friction_layer?),
        Feature::EdgeSupport => grade_edge_support(profile.edge_support, params.edge_support?),
        Feature::TerminalSlabs => grade_terminal_slabs(profile.terminal_slabs, params.terminal_slabs?),
        Feature::SpecialJoints => grade_special_joints(profile.special_joints, params.special_joints?),
        Feature::SurfaceTexture => grade_surface(params.surface_texture?),
        Feature::Maintenance => grade_maintenance(profile.maintenance, params.maintenance?),
        Feature::InitialCost => grade_cost(profile.initial_cost, params.initial_cost?),
        Feature::NotForLightTraffic => grade_light_traffic(profile.heavy_traffic_only, params.not_for_light_traffic?),
        Feature::MarineEnvironment => grade_hazard(env.marine, params.marine_environment?),
        Feature::UtilityLines => grade_hazard(env.utility_lines, params.utility_lines?),
        Feature::ManualConstruction => grade_hazard(env.manual_construction, params.manual_construction?),
    };
    Some(graded)
}

/// Grade every present field against one requirement record.
///
/// Absent fields add neither weight nor credit.
pub fn compatibility_score(profile: &StandardProfile, params: &ParameterSet) -> TypeCompatibility {
    let details: Vec<MatchDetail> = Feature::ALL
        .into_iter()
        .filter_map(|feature| {
            let graded = grade_feature(profile, feature, params)?;
            let weight = feature.weight();
            Some(MatchDetail {
                feature,
                weight,
                credit: graded.credit,
                contribution: weight * graded.credit,
                matched: graded.credit > 0.0,
                note: graded.note.to_string(),
            })
        })
        .collect();

    let total_weight: f64 = details.iter().map(|d| d.weight).sum();
    let accumulated: f64 = details.iter().map(|d| d.contribution).sum();
    let score = if total_weight > 0.0 {
        accumulated / total_weight * 100.0
    } else {
        NEUTRAL_SCORE
    };

    TypeCompatibility {
        score,
        total_weight,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::PavementType;
    use crate::standards::profile;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn credit(t: PavementType, feature: Feature, pairs: &[(&str, &str)]) -> f64 {
        grade_feature(profile(t), feature, &params(pairs)).unwrap().credit
    }

    #[test]
    fn test_traffic_grades() {
        assert_eq!(credit(PavementType::Crcp, Feature::TrafficVolume, &[("trafficVolume", "4")]), 1.0);
        assert_eq!(credit(PavementType::Crcp, Feature::TrafficVolume, &[("trafficVolume", "2")]), -0.5);
        assert_eq!(credit(PavementType::Crcp, Feature::TrafficVolume, &[("trafficVolume", "3")]), 0.0);
        assert_eq!(credit(PavementType::Jrcp, Feature::TrafficVolume, &[("trafficVolume", "4")]), 0.8);
        assert_eq!(credit(PavementType::Pcp, Feature::TrafficVolume, &[("trafficVolume", "1")]), 1.0);
        assert_eq!(credit(PavementType::Pcp, Feature::TrafficVolume, &[("trafficVolume", "3")]), 0.0);
    }

    #[test]
    fn test_design_life_grades() {
        assert_eq!(credit(PavementType::Jpcp, Feature::DesignLife, &[("designLife", "20")]), 1.0);
        assert_eq!(credit(PavementType::Jpcp, Feature::DesignLife, &[("designLife", "30")]), -0.3);
        assert_eq!(credit(PavementType::Crcp, Feature::DesignLife, &[("designLife", "30")]), 0.5);
        assert_eq!(credit(PavementType::Crcp, Feature::DesignLife, &[("designLife", "20")]), -0.3);
        // PCP life window follows road class
        assert_eq!(
            credit(PavementType::Pcp, Feature::DesignLife, &[("trafficVolume", "1"), ("designLife", "10")]),
            0.9
        );
        assert_eq!(credit(PavementType::Pcp, Feature::DesignLife, &[("designLife", "10")]), 0.0);
    }

    #[test]
    fn test_cbr_and_slab_grades() {
        assert_eq!(credit(PavementType::Jpcp, Feature::SubgradeCbr, &[("subgradeCBR", "3")]), 1.0);
        assert_eq!(credit(PavementType::Jpcp, Feature::SubgradeCbr, &[("subgradeCBR", "2")]), -1.0);
        assert_eq!(credit(PavementType::Pcp, Feature::SubgradeCbr, &[("subgradeCBR", "2")]), 0.5);
        assert_eq!(
            credit(PavementType::Pcp, Feature::SubgradeCbr, &[("trafficVolume", "1"), ("subgradeCBR", "2")]),
            1.0
        );
        assert_eq!(credit(PavementType::Pcp, Feature::SubgradeCbr, &[("subgradeCBR", "1")]), -0.5);
        assert_eq!(credit(PavementType::Crcp, Feature::SlabThickness, &[("slabThickness", "200")]), -0.8);
        assert_eq!(credit(PavementType::Pcp, Feature::SlabThickness, &[("slabThickness", "150")]), -1.0);
    }

    #[test]
    fn test_secondary_grades() {
        assert_eq!(credit(PavementType::Jpcp, Feature::SteelReinforcement, &[("steelReinforcement", "AtJoints")]), 1.0);
        assert_eq!(credit(PavementType::Pcp, Feature::SteelReinforcement, &[("steelReinforcement", "None")]), 1.0);
        assert_eq!(credit(PavementType::Crcp, Feature::LongitudinalJoints, &[("longitudinalJoints", "Width4.5")]), 1.0);
        assert_eq!(credit(PavementType::Pcp, Feature::LongitudinalJoints, &[("longitudinalJoints", "NotRequired")]), 0.5);
        assert_eq!(credit(PavementType::Jrcp, Feature::Shoulders, &[("shoulders", "TiedConcrete")]), 0.8);
        assert_eq!(credit(PavementType::Jpcp, Feature::EdgeSupport, &[("edgeSupport", "NotProvided")]), 0.3);
        assert_eq!(credit(PavementType::Pcp, Feature::SpecialJoints, &[("specialJoints", "No")]), 0.7);
        assert_eq!(credit(PavementType::Crcp, Feature::SurfaceTexture, &[("surfaceTexture", "No")]), -1.0);
        assert_eq!(credit(PavementType::Crcp, Feature::MarineEnvironment, &[("marineEnvironment", "Yes")]), -1.0);
        assert_eq!(credit(PavementType::Jpcp, Feature::MarineEnvironment, &[("marineEnvironment", "Yes")]), 1.0);
        assert_eq!(credit(PavementType::Jpcp, Feature::NotForLightTraffic, &[("notForLightTraffic", "Yes")]), -0.5);
    }

    #[test]
    fn test_level_distance_credit() {
        assert_eq!(credit(PavementType::Crcp, Feature::Maintenance, &[("maintenance", "High")]), 0.25);
        assert_eq!(credit(PavementType::Jpcp, Feature::InitialCost, &[("initialCost", "Moderate")]), 1.0 - 1.0 / 3.0);
        assert_eq!(credit(PavementType::Pcp, Feature::Maintenance, &[("maintenance", "Low")]), 1.0);
        assert_eq!(credit(PavementType::Pcp, Feature::InitialCost, &[("initialCost", "Low")]), 0.5);
    }

    #[test]
    fn test_score_is_weighted_average() {
        let input = params(&[("trafficVolume", "4"), ("designLife", "40"), ("subgradeCBR", "4"), ("slabThickness", "250")]);
        let result = compatibility_score(profile(PavementType::Crcp), &input);
        assert_eq!(result.total_weight, 47.0);
        // 15 + 0.5 * 12 + 10 + 10
        assert!((result.score - 41.0 / 47.0 * 100.0).abs() < 1e-9);
        assert_eq!(result.details.len(), 4);
    }

    #[test]
    fn test_no_fields_gives_neutral_score() {
        let result = compatibility_score(profile(PavementType::Pcp), &ParameterSet::new());
        assert_eq!(result.score, NEUTRAL_SCORE);
        assert_eq!(result.total_weight, 0.0);
    }
}
