//! Plain-text rendering of advisor results for the terminal.

use pave_core::compatibility::{CompatibilityPrediction, PerformanceReport, ValidationReport};
use pave_core::design::{DesignSpec, GuidelineCategory};
use pave_core::ensemble::StrategyComparison;
use pave_core::probability::ProbabilityReport;
use pave_core::scoring::{Explanation, RecommendationResult};
use pave_core::standards;

const RULE: &str = "═══════════════════════════════════════";

fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push(RULE.to_string());
    lines.push(format!("  {}", title));
    lines.push(RULE.to_string());
    lines.push(String::new());
}

fn bullets(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{}:", heading));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "  <- recommended"
    } else {
        ""
    }
}

pub fn recommendation(result: &RecommendationResult, explanation: Option<&Explanation>) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "PAVEMENT TYPE RECOMMENDATION");

    lines.push("Scores:".to_string());
    for (t, score) in result.scores.iter() {
        lines.push(format!("  {:<5} {:>3}{}", t.code(), score, marker(t == result.recommended_type)));
    }
    lines.push(String::new());
    lines.push(format!(
        "Recommended: {} ({})",
        result.recommended_type,
        result.recommended_type.full_name()
    ));
    lines.push(format!(
        "Confidence:  {} (margin {} points)",
        result.confidence_level, result.score_difference
    ));
    lines.push(format!("Reliability: {}%", result.reliability));
    if result.calibrated {
        lines.push("Calibration: applied".to_string());
    }
    bullets(&mut lines, "Adjustments", &result.adjustments);

    if let Some(explanation) = explanation {
        lines.push(String::new());
        lines.push(explanation.summary.clone());
        let shares: Vec<String> = explanation
            .probabilities
            .iter()
            .map(|(t, p)| format!("{} {}%", t, p))
            .collect();
        lines.push(format!("Shares: {}", shares.join(", ")));
        if let Some(alternative) = &explanation.alternative {
            lines.push(alternative.clone());
        }
    }

    lines.join("\n")
}

pub fn design(spec: &DesignSpec, guidelines: &[GuidelineCategory]) -> String {
    let details = &standards::profile(spec.pavement_type).details;
    let cost = &spec.lifecycle_cost;
    let mut lines = Vec::new();
    banner(&mut lines, &format!("DESIGN: {}", details.name));

    lines.push(details.description.to_string());
    lines.push(String::new());
    lines.push(format!("  Thickness:      {} mm", spec.thickness_mm));
    lines.push(format!("  Reinforcement:  {}", spec.reinforcement));
    lines.push(format!("  Joint spacing:  {}", spec.joint_spacing));
    lines.push(format!("  Design life:    {} years", spec.design_life_years));
    lines.push(format!("  Maintenance:    {}", details.maintenance_interval));
    lines.push(format!("  Reference:      {}", spec.irc_reference));
    bullets(&mut lines, "Special considerations", &spec.special_considerations);

    lines.push(String::new());
    lines.push(format!("Lifecycle cost ({}, {} years):", cost.unit, cost.design_life));
    lines.push(format!("  Initial:      {:>7.1}", cost.initial_cost));
    lines.push(format!("  Maintenance:  {:>7.1}", cost.maintenance_cost));
    lines.push(format!("  Total:        {:>7.1}", cost.total_lifecycle_cost));
    lines.push(format!("  Per year:     {:>7.1}", cost.annual_cost));

    let advantages: Vec<String> = details.advantages.iter().map(|s| s.to_string()).collect();
    let disadvantages: Vec<String> = details.disadvantages.iter().map(|s| s.to_string()).collect();
    bullets(&mut lines, "Advantages", &advantages);
    bullets(&mut lines, "Disadvantages", &disadvantages);

    for category in guidelines {
        bullets(&mut lines, &category.category, &category.items);
    }

    lines.push(String::new());
    lines.push(cost.note.clone());
    lines.join("\n")
}

pub fn prediction(prediction: &CompatibilityPrediction, performance: &PerformanceReport) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "COMPATIBILITY MODEL");

    lines.push("Compatibility:".to_string());
    for t in prediction.ranking {
        lines.push(format!(
            "  {:<5} {:>6.1}{}",
            t.code(),
            prediction.per_type_scores[t],
            marker(t == prediction.top_type)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Recommended: {} (confidence {:.0}%)",
        prediction.top_type,
        prediction.confidence_score * 100.0
    ));
    lines.push(format!(
        "Alternative: {} (confidence {:.0}%)",
        prediction.alternative_type,
        prediction.alternative_score * 100.0
    ));
    if prediction.swapped {
        lines.push("CRCP moved to alternative: site hazard with a close runner-up".to_string());
    }

    lines.push(String::new());
    lines.push("Performance:".to_string());
    lines.push(format!("  Durability:              {:>5.1}", performance.durability));
    lines.push(format!("  Cost-effectiveness:      {:>5.1}", performance.cost_effectiveness));
    lines.push(format!("  Construction complexity: {:>5.1}", performance.construction_complexity));
    lines.push(format!("  IRC compliance:          {:>5}%", performance.irc_compliance));
    lines.push(format!("  IRC reference coverage:  {:>5}%", performance.irc_reference_coverage));

    let details: Vec<String> = prediction
        .match_details
        .iter()
        .map(|d| format!("[{}] {} ({:+.1})", if d.matched { "OK" } else { "--" }, d.note, d.contribution))
        .collect();
    bullets(&mut lines, "Matched requirements", &details);
    bullets(&mut lines, "Warnings", &performance.warnings);
    bullets(&mut lines, "Special notes", &performance.special_notes);
    bullets(&mut lines, "IRC notes", &performance.irc_notes);
    lines.join("\n")
}

pub fn comparison(comparison: &StrategyComparison) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "STRATEGY COMPARISON");
    lines.push(format!(
        "  Weighted scoring:     {} ({})",
        comparison.weighted.recommended_type, comparison.weighted.confidence_level
    ));
    lines.push(format!(
        "  Compatibility model:  {} ({:.0}%)",
        comparison.compatibility.top_type,
        comparison.compatibility.confidence_score * 100.0
    ));
    lines.push(String::new());
    lines.push(comparison.summary.clone());
    lines.push(format!("Combined confidence: {}", comparison.confidence));
    lines.join("\n")
}

pub fn estimate(report: &ProbabilityReport) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "MONTE CARLO ESTIMATE");
    lines.push(format!("Samples: {} (seed {})", report.sample_size, report.seed));
    if report.calibrated {
        lines.push("Calibration: applied".to_string());
    }
    lines.push(String::new());
    for (t, formatted) in report.formatted_probabilities.iter() {
        lines.push(format!("  {:<5} {:>7}  ({} runs)", t.code(), formatted, report.counts[t]));
    }
    lines.join("\n")
}

pub fn validation(report: &ValidationReport) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "COMPATIBILITY MODEL SELF-TEST");
    for case in &report.cases {
        lines.push(format!(
            "  {} {:<28} expected {:<5} got {:<5} ({:.1})",
            if case.correct { "[OK]  " } else { "[FAIL]" },
            case.name,
            case.expected.code(),
            case.predicted.code(),
            case.score
        ));
    }
    lines.push(String::new());
    lines.push(format!("Accuracy:  {:.1}% ({}/{})", report.accuracy * 100.0, report.correct, report.total));
    lines.push(format!("Precision: {:.1}% ({} false positives)", report.precision * 100.0, report.false_positives));
    lines.push(format!("Recall:    {:.1}% ({} false negatives)", report.recall * 100.0, report.false_negatives));
    lines.join("\n")
}
