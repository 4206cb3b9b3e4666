//! # Pavement Types
//!
//! The four concrete pavement categories the advisor classifies among, and
//! [`PerType`], a fixed-size map keyed by [`PavementType`] used for every
//! score vector in the crate.
//!
//! `PerType` serializes as a JSON object keyed by type code:
//!
//! ```json
//! { "JPCP": 100, "JRCP": 67, "CRCP": 55, "PCP": 63 }
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Concrete pavement design categories.
///
/// # Example
/// ```
/// use pave_core::pavement::PavementType;
///
/// assert_eq!(PavementType::Crcp.code(), "CRCP");
/// assert_eq!(PavementType::from_code("pcp"), Some(PavementType::Pcp));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PavementType {
    /// Jointed plain concrete pavement
    #[serde(rename = "JPCP")]
    Jpcp,
    /// Jointed reinforced concrete pavement
    #[serde(rename = "JRCP")]
    Jrcp,
    /// Continuously reinforced concrete pavement
    #[serde(rename = "CRCP")]
    Crcp,
    /// Precast concrete pavement
    #[serde(rename = "PCP")]
    Pcp,
}

impl PavementType {
    /// All types in canonical order. Ties are always broken in this order.
    pub const ALL: [PavementType; 4] = [
        PavementType::Jpcp,
        PavementType::Jrcp,
        PavementType::Crcp,
        PavementType::Pcp,
    ];

    /// Short code (JPCP, JRCP, CRCP, PCP)
    pub fn code(&self) -> &'static str {
        match self {
            PavementType::Jpcp => "JPCP",
            PavementType::Jrcp => "JRCP",
            PavementType::Crcp => "CRCP",
            PavementType::Pcp => "PCP",
        }
    }

    /// Full descriptive name
    pub fn full_name(&self) -> &'static str {
        match self {
            PavementType::Jpcp => "Jointed Plain Concrete Pavement",
            PavementType::Jrcp => "Jointed Reinforced Concrete Pavement",
            PavementType::Crcp => "Continuously Reinforced Concrete Pavement",
            PavementType::Pcp => "Precast Concrete Pavement",
        }
    }

    /// Position in [`PavementType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PavementType::Jpcp => 0,
            PavementType::Jrcp => 1,
            PavementType::Crcp => 2,
            PavementType::Pcp => 3,
        }
    }

    /// Parse a type code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        PavementType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }

    /// Whether the type carries steel beyond dowels and tie bars
    pub fn is_reinforced(&self) -> bool {
        matches!(self, PavementType::Jrcp | PavementType::Crcp)
    }
}

impl fmt::Display for PavementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One value per pavement type.
///
/// Indexing with a [`PavementType`] is exhaustive by construction, so no
/// lookup can miss.
///
/// # Example
/// ```
/// use pave_core::pavement::{PavementType, PerType};
///
/// let mut scores = PerType::splat(0.5);
/// scores[PavementType::Crcp] *= 1.1;
/// assert!(scores[PavementType::Crcp] > scores[PavementType::Jpcp]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerType<T> {
    #[serde(rename = "JPCP")]
    pub jpcp: T,
    #[serde(rename = "JRCP")]
    pub jrcp: T,
    #[serde(rename = "CRCP")]
    pub crcp: T,
    #[serde(rename = "PCP")]
    pub pcp: T,
}

impl<T> PerType<T> {
    /// Build from values in canonical order (JPCP, JRCP, CRCP, PCP)
    pub const fn from_array(values: [T; 4]) -> Self
    where
        T: Copy,
    {
        PerType {
            jpcp: values[0],
            jrcp: values[1],
            crcp: values[2],
            pcp: values[3],
        }
    }

    /// Build by evaluating `f` for each type
    pub fn from_fn(mut f: impl FnMut(PavementType) -> T) -> Self {
        PerType {
            jpcp: f(PavementType::Jpcp),
            jrcp: f(PavementType::Jrcp),
            crcp: f(PavementType::Crcp),
            pcp: f(PavementType::Pcp),
        }
    }

    /// Transform every entry
    pub fn map<U>(&self, mut f: impl FnMut(PavementType, &T) -> U) -> PerType<U> {
        PerType::from_fn(|t| f(t, &self[t]))
    }

    /// Iterate `(type, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (PavementType, &T)> + '_ {
        PavementType::ALL.into_iter().map(move |t| (t, &self[t]))
    }
}

impl<T: Copy> PerType<T> {
    /// Same value for every type
    pub const fn splat(value: T) -> Self {
        PerType {
            jpcp: value,
            jrcp: value,
            crcp: value,
            pcp: value,
        }
    }
}

impl<T: Copy + PartialOrd> PerType<T> {
    /// Type holding the largest value; ties go to the earliest type in
    /// canonical order.
    pub fn argmax(&self) -> PavementType {
        let mut best = PavementType::Jpcp;
        for t in PavementType::ALL {
            if self[t] > self[best] {
                best = t;
            }
        }
        best
    }

    /// Largest value
    pub fn max_value(&self) -> T {
        self[self.argmax()]
    }

    /// Types ordered by descending value, ties in canonical order
    pub fn ranked(&self) -> [PavementType; 4] {
        let mut order = PavementType::ALL;
        // Stable sort keeps canonical order among equal values.
        order.sort_by(|a, b| {
            self[*b]
                .partial_cmp(&self[*a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// Best type other than `excluded`
    pub fn runner_up(&self, excluded: PavementType) -> PavementType {
        self.ranked()
            .into_iter()
            .find(|t| *t != excluded)
            .unwrap_or(excluded)
    }
}

impl<T> Index<PavementType> for PerType<T> {
    type Output = T;

    fn index(&self, t: PavementType) -> &T {
        match t {
            PavementType::Jpcp => &self.jpcp,
            PavementType::Jrcp => &self.jrcp,
            PavementType::Crcp => &self.crcp,
            PavementType::Pcp => &self.pcp,
        }
    }
}

impl<T> IndexMut<PavementType> for PerType<T> {
    fn index_mut(&mut self, t: PavementType) -> &mut T {
        match t {
            PavementType::Jpcp => &mut self.jpcp,
            PavementType::Jrcp => &mut self.jrcp,
            PavementType::Crcp => &mut self.crcp,
            PavementType::Pcp => &mut self.pcp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_parsing() {
        for t in PavementType::ALL {
            assert_eq!(PavementType::from_code(t.code()), Some(t));
        }
        assert_eq!(PavementType::from_code(" jrcp "), Some(PavementType::Jrcp));
        assert_eq!(PavementType::from_code("asphalt"), None);
    }

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, t) in PavementType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&PavementType::Crcp).unwrap();
        assert_eq!(json, "\"CRCP\"");

        let scores = PerType::from_array([100u32, 67, 55, 63]);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"JPCP":100,"JRCP":67,"CRCP":55,"PCP":63}"#);
        let parsed: PerType<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scores);
    }

    #[test]
    fn test_argmax_breaks_ties_in_canonical_order() {
        let scores = PerType::from_array([40, 70, 70, 10]);
        assert_eq!(scores.argmax(), PavementType::Jrcp);
        assert_eq!(scores.max_value(), 70);

        let flat = PerType::splat(0);
        assert_eq!(flat.argmax(), PavementType::Jpcp);
    }

    #[test]
    fn test_ranked_and_runner_up() {
        let scores = PerType::from_array([58.4, 58.4, 62.5, 45.3]);
        assert_eq!(
            scores.ranked(),
            [PavementType::Crcp, PavementType::Jpcp, PavementType::Jrcp, PavementType::Pcp]
        );
        assert_eq!(scores.runner_up(PavementType::Crcp), PavementType::Jpcp);
        assert_eq!(scores.runner_up(PavementType::Jpcp), PavementType::Crcp);
    }

    #[test]
    fn test_map_and_iter() {
        let scores = PerType::from_array([1.0, 2.0, 3.0, 4.0]);
        let doubled = scores.map(|_, v| v * 2.0);
        assert_eq!(doubled[PavementType::Pcp], 8.0);
        let total: f64 = scores.iter().map(|(_, v)| *v).sum();
        assert_eq!(total, 10.0);
    }
}
