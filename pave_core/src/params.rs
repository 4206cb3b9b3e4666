//! # Input Parameters
//!
//! Every input field is a closed enum whose JSON form is the categorical
//! code used by the advisory forms (`"1"`..`"4"` for traffic, `"Yes"`/`"No"`
//! for site conditions, and so on). [`ParameterSet`] holds one optional value
//! per field; omitted fields simply do not contribute.
//!
//! ## Validation Policy
//!
//! Parsing is strict. An unknown field name or a code outside the field's
//! domain is rejected with [`PaveError::InvalidParameterValue`] in every entry
//! point ([`ParameterSet::from_pairs`], [`ParameterSet::from_json`], and serde
//! deserialization). No component silently ignores a bad value.
//!
//! All three entry points share one parser, so they accept the same input:
//! codes are matched after trimming, numeric JSON values are read as their
//! decimal text, and JSON nulls count as absent.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "trafficVolume": "2",
//!   "designLife": "20",
//!   "subgradeCBR": "3",
//!   "slabThickness": "200",
//!   "marineEnvironment": "No"
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PaveError, PaveResult};

/// Declares a categorical parameter enum with its wire codes.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant ),+
        }

        impl $name {
            /// Every value in domain order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code for this value
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Parse a wire code (exact match after trimming)
            pub fn from_code(code: &str) -> Option<Self> {
                match code.trim() {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// All wire codes, for error messages and help text
            pub fn codes() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.code()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

categorical! {
    /// Commercial traffic bucket
    pub enum TrafficVolume {
        /// Below 450 CVPD (rural roads)
        Low => "1",
        /// Highway traffic
        Medium => "2",
        /// Heavy highway traffic
        High => "3",
        /// Very high commercial traffic
        VeryHigh => "4",
    }
}

impl TrafficVolume {
    /// Bucket number 1..=4
    pub fn level(&self) -> u8 {
        match self {
            TrafficVolume::Low => 1,
            TrafficVolume::Medium => 2,
            TrafficVolume::High => 3,
            TrafficVolume::VeryHigh => 4,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrafficVolume::Low => "low traffic volume",
            TrafficVolume::Medium => "medium traffic volume",
            TrafficVolume::High => "high traffic volume",
            TrafficVolume::VeryHigh => "very high traffic volume",
        }
    }
}

categorical! {
    /// Design life bucket in years
    pub enum DesignLife {
        Years10 => "10",
        Years20 => "20",
        Years30 => "30",
        Years40 => "40",
    }
}

impl DesignLife {
    pub fn years(&self) -> u32 {
        match self {
            DesignLife::Years10 => 10,
            DesignLife::Years20 => 20,
            DesignLife::Years30 => 30,
            DesignLife::Years40 => 40,
        }
    }
}

categorical! {
    /// Subgrade CBR bucket
    pub enum SubgradeCbr {
        /// CBR below 3%
        VeryWeak => "1",
        /// CBR 3-5%
        Weak => "2",
        /// CBR 6-7%
        Good => "3",
        /// CBR 8% and above
        Strong => "4",
    }
}

impl SubgradeCbr {
    /// Representative CBR percentage for the bucket
    pub fn representative_percent(&self) -> f64 {
        match self {
            SubgradeCbr::VeryWeak => 2.0,
            SubgradeCbr::Weak => 4.0,
            SubgradeCbr::Good => 6.5,
            SubgradeCbr::Strong => 8.0,
        }
    }
}

categorical! {
    /// Selected slab thickness
    pub enum SlabThickness {
        Mm150 => "150",
        Mm200 => "200",
        Mm250 => "250",
        Mm300 => "300",
    }
}

impl SlabThickness {
    pub fn mm(&self) -> u32 {
        match self {
            SlabThickness::Mm150 => 150,
            SlabThickness::Mm200 => 200,
            SlabThickness::Mm250 => 250,
            SlabThickness::Mm300 => 300,
        }
    }
}

categorical! {
    /// Carriageway width that triggers longitudinal joints
    pub enum LongitudinalJoints {
        NotRequired => "NotRequired",
        /// Width above 4.5 m
        Width4_5 => "Width4.5",
        /// Width above 7 m
        Width7 => "Width7",
    }
}

categorical! {
    /// Yes/No site condition
    pub enum YesNo {
        Yes => "Yes",
        No => "No",
    }
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

categorical! {
    /// Budget level for initial construction
    pub enum InitialCost {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
}

impl InitialCost {
    /// Position on the Low..High scale
    pub fn level(&self) -> usize {
        match self {
            InitialCost::Low => 0,
            InitialCost::Moderate => 1,
            InitialCost::High => 2,
        }
    }
}

categorical! {
    /// Available construction window
    pub enum ConstructionTime {
        Limited => "Limited",
        Normal => "Normal",
        Flexible => "Flexible",
    }
}

categorical! {
    /// Acceptable maintenance effort
    pub enum Maintenance {
        Minimal => "Minimal",
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
}

impl Maintenance {
    /// Position on the Minimal..High scale
    pub fn level(&self) -> usize {
        match self {
            Maintenance::Minimal => 0,
            Maintenance::Low => 1,
            Maintenance::Moderate => 2,
            Maintenance::High => 3,
        }
    }
}

categorical! {
    /// Longitudinal steel arrangement
    pub enum SteelReinforcement {
        /// No distributed steel
        Unreinforced => "None",
        /// Steel at joints and along the slab
        AtJoints => "AtJoints",
        /// Continuous longitudinal steel
        Longitudinal => "Longitudinal",
    }
}

categorical! {
    /// Transverse joint arrangement
    pub enum TransverseJoints {
        Regular => "Regular",
        Longer => "Longer",
        /// No transverse joints
        Jointless => "No",
    }
}

categorical! {
    /// Shoulder construction
    pub enum Shoulders {
        TiedConcrete => "TiedConcrete",
        TiedOther => "TiedOther",
        NotTied => "NotTied",
    }
}

categorical! {
    /// Whether a layer or support element is provided
    pub enum Provision {
        Provided => "Provided",
        NotProvided => "NotProvided",
    }
}

categorical! {
    /// Surface finish
    pub enum SurfaceTexture {
        TineBrush => "TineBrush",
        Other => "Other",
        /// No texturing
        Untextured => "No",
    }
}

/// Road class used by standards that distinguish rural roads from
/// expressways. Traffic bucket 1 is rural; anything else, including an
/// unspecified traffic volume, is treated as expressway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadClass {
    Rural,
    Expressway,
}

/// A full or partial set of advisory inputs.
///
/// Field names serialize in camelCase (`subgradeCBR` keeps its acronym).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct ParameterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_volume: Option<TrafficVolume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_life: Option<DesignLife>,
    #[serde(default, rename = "subgradeCBR", skip_serializing_if = "Option::is_none")]
    pub subgrade_cbr: Option<SubgradeCbr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slab_thickness: Option<SlabThickness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitudinal_joints: Option<LongitudinalJoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marine_environment: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility_lines: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_construction: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_cost: Option<InitialCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_time: Option<ConstructionTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Maintenance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steel_reinforcement: Option<SteelReinforcement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transverse_joints: Option<TransverseJoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders: Option<Shoulders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_friction_layer: Option<Provision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_support: Option<Provision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_slabs: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_joints: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_texture: Option<SurfaceTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_for_light_traffic: Option<YesNo>,
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for ParameterSet {
    type Error = PaveError;

    fn try_from(object: serde_json::Map<String, serde_json::Value>) -> PaveResult<Self> {
        ParameterSet::from_object(&object)
    }
}

/// Wire names of the four primary fields
pub const PRIMARY_FIELDS: [&str; 4] = ["trafficVolume", "designLife", "subgradeCBR", "slabThickness"];

/// Wire names of every accepted field
pub const ALL_FIELDS: [&str; 20] = [
    "trafficVolume",
    "designLife",
    "subgradeCBR",
    "slabThickness",
    "longitudinalJoints",
    "marineEnvironment",
    "utilityLines",
    "manualConstruction",
    "initialCost",
    "constructionTime",
    "maintenance",
    "steelReinforcement",
    "transverseJoints",
    "shoulders",
    "antiFrictionLayer",
    "edgeSupport",
    "terminalSlabs",
    "specialJoints",
    "surfaceTexture",
    "notForLightTraffic",
];

fn parse_code<T>(field: &str, code: &str, parse: fn(&str) -> Option<T>, codes: fn() -> Vec<&'static str>) -> PaveResult<T> {
    parse(code).ok_or_else(|| {
        PaveError::invalid_parameter(field, code, format!("expected one of: {}", codes().join(", ")))
    })
}

impl ParameterSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(field, code)` pairs. Later pairs overwrite earlier
    /// ones for the same field.
    ///
    /// # Example
    /// ```
    /// use pave_core::params::{ParameterSet, TrafficVolume};
    ///
    /// let params = ParameterSet::from_pairs([("trafficVolume", "4"), ("designLife", "40")])?;
    /// assert_eq!(params.traffic_volume, Some(TrafficVolume::VeryHigh));
    ///
    /// let err = ParameterSet::from_pairs([("trafficVolume", "9")]).unwrap_err();
    /// assert_eq!(err.error_code(), "INVALID_PARAMETER_VALUE");
    /// # Ok::<(), pave_core::errors::PaveError>(())
    /// ```
    pub fn from_pairs<'a, I>(pairs: I) -> PaveResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = ParameterSet::new();
        for (field, code) in pairs {
            params.set(field, code)?;
        }
        Ok(params)
    }

    /// Parse a JSON object of field codes. Numeric codes such as
    /// `"trafficVolume": 2` are accepted and read as their decimal text.
    pub fn from_json(json: &str) -> PaveResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| PaveError::serialization(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| PaveError::serialization("parameter input must be a JSON object"))?;
        Self::from_object(object)
    }

    fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> PaveResult<Self> {
        let mut params = ParameterSet::new();
        for (field, raw) in object {
            let code = match raw {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Null => continue,
                other => {
                    return Err(PaveError::invalid_parameter(
                        field.as_str(),
                        other.to_string(),
                        "expected a string code",
                    ))
                }
            };
            params.set(field, &code)?;
        }
        Ok(params)
    }

    /// Set one field from its wire name and code.
    pub fn set(&mut self, field: &str, code: &str) -> PaveResult<()> {
        match field.trim() {
            "trafficVolume" => {
                self.traffic_volume = Some(parse_code(field, code, TrafficVolume::from_code, TrafficVolume::codes)?)
            }
            "designLife" => self.design_life = Some(parse_code(field, code, DesignLife::from_code, DesignLife::codes)?),
            "subgradeCBR" => self.subgrade_cbr = Some(parse_code(field, code, SubgradeCbr::from_code, SubgradeCbr::codes)?),
            "slabThickness" => {
                self.slab_thickness = Some(parse_code(field, code, SlabThickness::from_code, SlabThickness::codes)?)
            }
            "longitudinalJoints" => {
                self.longitudinal_joints =
                    Some(parse_code(field, code, LongitudinalJoints::from_code, LongitudinalJoints::codes)?)
            }
            "marineEnvironment" => self.marine_environment = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?),
            "utilityLines" => self.utility_lines = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?),
            "manualConstruction" => {
                self.manual_construction = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?)
            }
            "initialCost" => self.initial_cost = Some(parse_code(field, code, InitialCost::from_code, InitialCost::codes)?),
            "constructionTime" => {
                self.construction_time =
                    Some(parse_code(field, code, ConstructionTime::from_code, ConstructionTime::codes)?)
            }
            "maintenance" => self.maintenance = Some(parse_code(field, code, Maintenance::from_code, Maintenance::codes)?),
            "steelReinforcement" => {
                self.steel_reinforcement =
                    Some(parse_code(field, code, SteelReinforcement::from_code, SteelReinforcement::codes)?)
            }
            "transverseJoints" => {
                self.transverse_joints =
                    Some(parse_code(field, code, TransverseJoints::from_code, TransverseJoints::codes)?)
            }
            "shoulders" => self.shoulders = Some(parse_code(field, code, Shoulders::from_code, Shoulders::codes)?),
            "antiFrictionLayer" => {
                self.anti_friction_layer = Some(parse_code(field, code, Provision::from_code, Provision::codes)?)
            }
            "edgeSupport" => self.edge_support = Some(parse_code(field, code, Provision::from_code, Provision::codes)?),
            "terminalSlabs" => self.terminal_slabs = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?),
            "specialJoints" => self.special_joints = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?),
            "surfaceTexture" => {
                self.surface_texture = Some(parse_code(field, code, SurfaceTexture::from_code, SurfaceTexture::codes)?)
            }
            "notForLightTraffic" => {
                self.not_for_light_traffic = Some(parse_code(field, code, YesNo::from_code, YesNo::codes)?)
            }
            other => {
                return Err(PaveError::invalid_parameter(
                    other,
                    code,
                    format!("unknown parameter; expected one of: {}", ALL_FIELDS.join(", ")),
                ))
            }
        }
        Ok(())
    }

    /// Number of primary fields present (0..=4)
    pub fn primary_count(&self) -> usize {
        [
            self.traffic_volume.is_some(),
            self.design_life.is_some(),
            self.subgrade_cbr.is_some(),
            self.slab_thickness.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Whether all four primary fields are present
    pub fn has_all_primaries(&self) -> bool {
        self.primary_count() == 4
    }

    /// Road class implied by the traffic bucket
    pub fn road_class(&self) -> RoadClass {
        if self.traffic_volume == Some(TrafficVolume::Low) {
            RoadClass::Rural
        } else {
            RoadClass::Expressway
        }
    }

    pub fn is_marine(&self) -> bool {
        self.marine_environment.is_some_and(|v| v.is_yes())
    }

    pub fn has_utility_lines(&self) -> bool {
        self.utility_lines.is_some_and(|v| v.is_yes())
    }

    pub fn is_manual_construction(&self) -> bool {
        self.manual_construction.is_some_and(|v| v.is_yes())
    }

    /// Field/code pairs for every present field, in wire-name order
    pub fn to_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let codes: [Option<&'static str>; 20] = [
            self.traffic_volume.map(|v| v.code()),
            self.design_life.map(|v| v.code()),
            self.subgrade_cbr.map(|v| v.code()),
            self.slab_thickness.map(|v| v.code()),
            self.longitudinal_joints.map(|v| v.code()),
            self.marine_environment.map(|v| v.code()),
            self.utility_lines.map(|v| v.code()),
            self.manual_construction.map(|v| v.code()),
            self.initial_cost.map(|v| v.code()),
            self.construction_time.map(|v| v.code()),
            self.maintenance.map(|v| v.code()),
            self.steel_reinforcement.map(|v| v.code()),
            self.transverse_joints.map(|v| v.code()),
            self.shoulders.map(|v| v.code()),
            self.anti_friction_layer.map(|v| v.code()),
            self.edge_support.map(|v| v.code()),
            self.terminal_slabs.map(|v| v.code()),
            self.special_joints.map(|v| v.code()),
            self.surface_texture.map(|v| v.code()),
            self.not_for_light_traffic.map(|v| v.code()),
        ];
        ALL_FIELDS
            .into_iter()
            .zip(codes)
            .filter_map(|(field, code)| code.map(|c| (field, c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_code() {
        for v in TrafficVolume::ALL {
            assert_eq!(TrafficVolume::from_code(v.code()), Some(*v));
        }
        assert_eq!(LongitudinalJoints::from_code("Width4.5"), Some(LongitudinalJoints::Width4_5));
        assert_eq!(SteelReinforcement::from_code("None"), Some(SteelReinforcement::Unreinforced));
        assert_eq!(TransverseJoints::from_code("No"), Some(TransverseJoints::Jointless));
        assert_eq!(YesNo::from_code("yes"), None);
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let params = ParameterSet {
            subgrade_cbr: Some(SubgradeCbr::Good),
            longitudinal_joints: Some(LongitudinalJoints::Width4_5),
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"subgradeCBR":"3","longitudinalJoints":"Width4.5"}"#);
    }

    #[test]
    fn test_from_pairs_rejects_out_of_domain_value() {
        let err = ParameterSet::from_pairs([("slabThickness", "175")]).unwrap_err();
        match err {
            PaveError::InvalidParameterValue { field, value, reason } => {
                assert_eq!(field, "slabThickness");
                assert_eq!(value, "175");
                assert!(reason.contains("150, 200, 250, 300"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_pairs_rejects_unknown_field() {
        let err = ParameterSet::from_pairs([("laneCount", "2")]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER_VALUE");
        assert!(err.to_string().contains("laneCount"));
    }

    #[test]
    fn test_from_json_accepts_numbers_and_skips_nulls() {
        let params = ParameterSet::from_json(
            r#"{"trafficVolume": 3, "designLife": "30", "utilityLines": null}"#,
        )
        .unwrap();
        assert_eq!(params.traffic_volume, Some(TrafficVolume::High));
        assert_eq!(params.design_life, Some(DesignLife::Years30));
        assert_eq!(params.utility_lines, None);
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert_eq!(
            ParameterSet::from_json("[1, 2]").unwrap_err().error_code(),
            "SERIALIZATION_ERROR"
        );
        assert_eq!(
            ParameterSet::from_json(r#"{"marineEnvironment": true}"#)
                .unwrap_err()
                .error_code(),
            "INVALID_PARAMETER_VALUE"
        );
    }

    #[test]
    fn test_serde_deserialize_is_strict() {
        let unknown: Result<ParameterSet, _> = serde_json::from_str(r#"{"colour": "grey"}"#);
        assert!(unknown.is_err());
        let bad_value: Result<ParameterSet, _> = serde_json::from_str(r#"{"trafficVolume": "7"}"#);
        assert!(bad_value.is_err());
    }

    #[test]
    fn test_serde_and_from_json_accept_the_same_input() {
        let json = r#"{"trafficVolume": 2, "designLife": " 20 ", "marineEnvironment": null}"#;
        let via_serde: ParameterSet = serde_json::from_str(json).unwrap();
        assert_eq!(via_serde, ParameterSet::from_json(json).unwrap());
        assert_eq!(via_serde.traffic_volume, Some(TrafficVolume::Medium));
        assert_eq!(via_serde.design_life, Some(DesignLife::Years20));
        assert_eq!(via_serde.marine_environment, None);

        let err = serde_json::from_str::<ParameterSet>(r#"{"slabThickness": "175"}"#).unwrap_err();
        assert!(err.to_string().contains("slabThickness"));
    }

    #[test]
    fn test_primary_count_and_road_class() {
        let params = ParameterSet::from_pairs([("trafficVolume", "1"), ("slabThickness", "150")]).unwrap();
        assert_eq!(params.primary_count(), 2);
        assert!(!params.has_all_primaries());
        assert_eq!(params.road_class(), RoadClass::Rural);
        assert_eq!(ParameterSet::new().road_class(), RoadClass::Expressway);
    }

    #[test]
    fn test_to_pairs_round_trips() {
        let pairs = [
            ("trafficVolume", "4"),
            ("designLife", "40"),
            ("marineEnvironment", "Yes"),
            ("surfaceTexture", "No"),
        ];
        let params = ParameterSet::from_pairs(pairs).unwrap();
        assert_eq!(params.to_pairs(), pairs.to_vec());
        assert!(params.is_marine());
        assert!(!params.has_utility_lines());
    }
}
