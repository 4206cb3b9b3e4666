//! # Strategy Comparison
//!
//! Runs the weighted scoring engine and the compatibility model on the same
//! input. The two are independent, so disagreement between them is a useful
//! low-confidence signal; agreement leaves the weighted confidence as is.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::ensemble::compare_strategies;
//! use pave_core::params::ParameterSet;
//! use pave_core::pavement::PavementType;
//!
//! let params = ParameterSet::from_pairs([
//!     ("trafficVolume", "2"),
//!     ("designLife", "20"),
//!     ("subgradeCBR", "3"),
//!     ("slabThickness", "200"),
//! ])?;
//! let comparison = compare_strategies(&params)?;
//! assert!(comparison.agree);
//! assert_eq!(comparison.consensus, Some(PavementType::Jpcp));
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::compatibility::{self, CompatibilityPrediction};
use crate::errors::PaveResult;
use crate::params::ParameterSet;
use crate::pavement::PavementType;
use crate::scoring::{self, ConfidenceLevel, RecommendationResult};

/// Both strategies' answers for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub weighted: RecommendationResult,
    pub compatibility: CompatibilityPrediction,
    /// Both strategies picked the same type
    pub agree: bool,
    /// The shared pick, when they agree
    pub consensus: Option<PavementType>,
    /// Weighted confidence, capped at Low on disagreement
    pub confidence: ConfidenceLevel,
    pub summary: String,
}

/// Score `params` with both strategies and report whether they agree.
///
/// Fails like [`scoring::score`] when no primary field is present.
pub fn compare_strategies(params: &ParameterSet) -> PaveResult<StrategyComparison> {
    let weighted = scoring::score(params)?;
    let compatibility = compatibility::predict(params);

    let agree = weighted.recommended_type == compatibility.top_type;
    let confidence = if agree {
        weighted.confidence_level
    } else {
        weighted.confidence_level.min(ConfidenceLevel::Low)
    };

    let summary = if agree {
        format!("Both strategies recommend {}", weighted.recommended_type)
    } else {
        format!(
            "Strategies disagree: weighted scoring recommends {}, compatibility model recommends {}",
            weighted.recommended_type, compatibility.top_type
        )
    };

    if !agree {
        tracing::debug!(
            weighted = %weighted.recommended_type,
            compatibility = %compatibility.top_type,
            "scoring strategies disagree"
        );
    }

    Ok(StrategyComparison {
        consensus: agree.then_some(weighted.recommended_type),
        weighted,
        compatibility,
        agree,
        confidence,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_agreement_keeps_confidence() {
        let input = params(&[("trafficVolume", "2"), ("designLife", "20"), ("subgradeCBR", "3"), ("slabThickness", "200")]);
        let comparison = compare_strategies(&input).unwrap();
        assert!(comparison.agree);
        assert_eq!(comparison.confidence, ConfidenceLevel::VeryHigh);
        assert_eq!(comparison.summary, "Both strategies recommend JPCP");
    }

    #[test]
    fn test_disagreement_caps_confidence() {
        // Weighted scoring favors CRCP for heavy traffic; the compatibility
        // model rejects CRCP on the 200 mm slab and prefers PCP.
        let input = params(&[("trafficVolume", "4"), ("designLife", "30"), ("subgradeCBR", "4"), ("slabThickness", "200")]);
        let comparison = compare_strategies(&input).unwrap();
        assert_eq!(comparison.weighted.recommended_type, PavementType::Crcp);
        assert_eq!(comparison.weighted.confidence_level, ConfidenceLevel::VeryHigh);
        assert_eq!(comparison.compatibility.top_type, PavementType::Pcp);
        assert!(!comparison.agree);
        assert!(comparison.consensus.is_none());
        assert_eq!(comparison.confidence, ConfidenceLevel::Low);
        assert_eq!(
            comparison.summary,
            "Strategies disagree: weighted scoring recommends CRCP, compatibility model recommends PCP"
        );
    }

    #[test]
    fn test_pcp_ideal_agrees() {
        let input = params(&[("trafficVolume", "1"), ("designLife", "10"), ("subgradeCBR", "1"), ("slabThickness", "150")]);
        let comparison = compare_strategies(&input).unwrap();
        assert_eq!(comparison.consensus, Some(PavementType::Pcp));
    }

    #[test]
    fn test_requires_primary_input() {
        let err = compare_strategies(&params(&[("marineEnvironment", "Yes")])).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_INPUT");
    }
}
