//! Plain-language explanation of a scored recommendation.

use serde::{Deserialize, Serialize};

use crate::params::{ConstructionTime, DesignLife, InitialCost, ParameterSet, SubgradeCbr, TrafficVolume};
use crate::pavement::{PavementType, PerType};

use super::RecommendationResult;

/// Score difference below which the runner-up is mentioned
pub const CLOSE_ALTERNATIVE_MARGIN: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// One-sentence summary of the recommendation
    pub summary: String,
    /// Each type's share of the total score, in percent
    pub probabilities: PerType<u32>,
    /// Inputs that characteristically favor the recommended type
    pub key_factors: Vec<String>,
    /// Note on a close runner-up, when the margin is under 10 points
    pub alternative: Option<String>,
}

/// Input values that characteristically favor `pavement_type`
pub fn key_factors(pavement_type: PavementType, params: &ParameterSet) -> Vec<&'static str> {
    use PavementType::*;
    let mut factors = Vec::new();

    match (pavement_type, params.traffic_volume) {
        (Jpcp, Some(TrafficVolume::Medium))
        | (Jrcp, Some(TrafficVolume::High))
        | (Crcp, Some(TrafficVolume::VeryHigh))
        | (Pcp, Some(TrafficVolume::Low)) => {
            if let Some(traffic) = params.traffic_volume {
                factors.push(traffic.description());
            }
        }
        _ => {}
    }

    match (pavement_type, params.design_life) {
        (Jpcp, Some(DesignLife::Years20)) => factors.push("medium design life"),
        (Jrcp, Some(DesignLife::Years30)) => factors.push("long design life"),
        (Crcp, Some(DesignLife::Years40)) => factors.push("very long design life"),
        (Pcp, Some(DesignLife::Years10)) => factors.push("short design life"),
        _ => {}
    }

    match (pavement_type, params.subgrade_cbr) {
        (Pcp, Some(SubgradeCbr::VeryWeak)) => factors.push("weak subgrade"),
        (Crcp, Some(SubgradeCbr::Strong)) => factors.push("strong subgrade"),
        _ => {}
    }

    match (pavement_type, params.construction_time) {
        (Pcp, Some(ConstructionTime::Limited)) => factors.push("limited construction time"),
        (Crcp, Some(ConstructionTime::Flexible)) => factors.push("flexible construction time"),
        _ => {}
    }

    match (pavement_type, params.initial_cost) {
        (Jpcp | Pcp, Some(InitialCost::Low)) => factors.push("low budget constraints"),
        (Crcp, Some(InitialCost::High)) => factors.push("high budget availability"),
        _ => {}
    }

    factors
}

/// Share of the total score per type, rounded to whole percent
pub fn score_shares(scores: &PerType<u32>) -> PerType<u32> {
    let total: u32 = scores.iter().map(|(_, s)| *s).sum();
    if total == 0 {
        return PerType::splat(0);
    }
    scores.map(|_, s| (*s as f64 / total as f64 * 100.0).round() as u32)
}

/// Explain why `result` recommends its type
pub fn explain(result: &RecommendationResult, params: &ParameterSet) -> Explanation {
    let recommended = result.recommended_type;
    let probabilities = score_shares(&result.scores);
    let factors: Vec<String> = key_factors(recommended, params)
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut summary = format!(
        "{} is recommended with a confidence level of {} ({}% probability).",
        recommended.full_name(),
        result.confidence_level,
        probabilities[recommended]
    );
    if !factors.is_empty() {
        summary.push_str(&format!(" Key factors: {}.", factors.join(", ")));
    }

    let alternative = (result.score_difference < CLOSE_ALTERNATIVE_MARGIN).then(|| {
        let runner_up = result.runner_up();
        format!(
            "{} is also a viable alternative with {}% probability.",
            runner_up.full_name(),
            probabilities[runner_up]
        )
    });

    Explanation {
        summary,
        probabilities,
        key_factors: factors,
        alternative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_explains_ideal_jpcp() {
        let input = params(&[("trafficVolume", "2"), ("designLife", "20"), ("subgradeCBR", "3"), ("slabThickness", "200")]);
        let explanation = explain(&score(&input).unwrap(), &input);
        // 100 / 285, 67 / 285, 55 / 285, 63 / 285
        assert_eq!(explanation.probabilities, PerType::from_array([35, 24, 19, 22]));
        assert_eq!(explanation.key_factors, vec!["medium traffic volume", "medium design life"]);
        assert_eq!(
            explanation.summary,
            "Jointed Plain Concrete Pavement is recommended with a confidence level of Very High (35% probability). \
             Key factors: medium traffic volume, medium design life."
        );
        assert!(explanation.alternative.is_none());
    }

    #[test]
    fn test_close_runner_up_is_mentioned() {
        let input = params(&[("trafficVolume", "3")]);
        let explanation = explain(&score(&input).unwrap(), &input);
        let alternative = explanation.alternative.unwrap();
        assert!(alternative.starts_with("Continuously Reinforced Concrete Pavement is also a viable alternative"));
    }

    #[test]
    fn test_key_factors_for_pcp() {
        let input = params(&[
            ("trafficVolume", "1"),
            ("designLife", "10"),
            ("subgradeCBR", "1"),
            ("constructionTime", "Limited"),
            ("initialCost", "Low"),
        ]);
        assert_eq!(
            key_factors(PavementType::Pcp, &input),
            vec![
                "low traffic volume",
                "short design life",
                "weak subgrade",
                "limited construction time",
                "low budget constraints"
            ]
        );
        assert!(key_factors(PavementType::Jrcp, &input).is_empty());
    }

    #[test]
    fn test_score_shares_of_zero_total() {
        assert_eq!(score_shares(&PerType::splat(0)), PerType::splat(0));
    }
}
