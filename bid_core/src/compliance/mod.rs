//! # Compliance Rule Engine
//!
//! Turns building geometry into required quantities (air terminals,
//! conductor footage, ground rods, bonding connections) under one of two
//! engineering code rule sets:
//!
//! - [`ul96a`] - UL 96A: tighter 20 ft terminal spacing
//! - [`nfpa780`] - NFPA 780: looser spacing with structure-type adjustments
//!   and explicit bonding rules for metal objects
//!
//! Each rule set is a flat module of pure functions behind the same
//! interface, selected by [`ComplianceCode`]. Every requirement record
//! carries a `notes` string stating the spacing and assumptions used, so
//! the rendered bid stays auditable.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::compliance::{BuildingSpec, ComplianceCode};
//!
//! let building = BuildingSpec {
//!     building_height_ft: Some(35.0),
//!     roof_area_sqft: Some(5000.0),
//!     perimeter_ft: Some(280.0),
//!     ..Default::default()
//! };
//!
//! let report = ComplianceCode::Ul96a.check_compliance(&building);
//! assert_eq!(report.air_terminals.unwrap().total, 24);
//! ```

pub mod nfpa780;
pub mod ul96a;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BidError, BidResult};

/// Hard floor on down-conductor paths (two-way path to ground).
///
/// Requests below this are silently raised, never reported as violations.
pub const MIN_DOWNLEADS: u32 = 2;

/// Compliance code selector. Exactly two rule sets are recognized; anything
/// else is an explicit error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceCode {
    /// UL 96A - Installation Requirements for Lightning Protection Systems
    #[serde(rename = "UL 96A")]
    Ul96a,
    /// NFPA 780 - Standard for the Installation of Lightning Protection Systems
    #[serde(rename = "NFPA 780")]
    Nfpa780,
}

impl ComplianceCode {
    /// All recognized codes, for UI selection.
    pub const ALL: [ComplianceCode; 2] = [ComplianceCode::Ul96a, ComplianceCode::Nfpa780];

    /// Display name, matching the selector string form.
    pub fn name(&self) -> &'static str {
        match self {
            ComplianceCode::Ul96a => "UL 96A",
            ComplianceCode::Nfpa780 => "NFPA 780",
        }
    }

    /// Run the full compliance check for this code.
    ///
    /// Presence rules: `air_terminals` only when roof area was supplied,
    /// `conductors` only when height was supplied, `grounding` always,
    /// `bonding` always for NFPA 780 and never for UL 96A.
    pub fn check_compliance(&self, building: &BuildingSpec) -> ComplianceReport {
        match self {
            ComplianceCode::Ul96a => ul96a::check_compliance(building),
            ComplianceCode::Nfpa780 => nfpa780::check_compliance(building),
        }
    }
}

impl fmt::Display for ComplianceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ComplianceCode {
    type Err = BidError;

    fn from_str(s: &str) -> BidResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "ul 96a" | "ul96a" => Ok(ComplianceCode::Ul96a),
            "nfpa 780" | "nfpa780" => Ok(ComplianceCode::Nfpa780),
            _ => Err(BidError::unknown_code(s.trim())),
        }
    }
}

/// Soil condition at the grounding electrodes.
///
/// Drives the rods-per-downlead multiplier: poor soil needs more electrodes
/// to reach acceptable resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    /// Typical soil: 1 rod per downlead
    #[default]
    Normal,
    /// Rocky soil: 2 rods per downlead
    Rocky,
    /// Sandy soil: 1.5 rods per downlead
    Sandy,
}

impl SoilType {
    /// All soil variants for UI selection
    pub const ALL: [SoilType; 3] = [SoilType::Normal, SoilType::Rocky, SoilType::Sandy];

    /// Ground rods required per down conductor for this soil.
    pub fn rods_per_downlead(&self) -> f64 {
        match self {
            SoilType::Normal => 1.0,
            SoilType::Rocky => 2.0,
            SoilType::Sandy => 1.5,
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoilType::Normal => "normal",
            SoilType::Rocky => "rocky",
            SoilType::Sandy => "sandy",
        };
        write!(f, "{}", name)
    }
}

/// Structure type modifier (NFPA 780 only).
///
/// Taller and geometrically complex roofs need tighter terminal spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    /// Conventional low-rise structure
    #[default]
    Normal,
    /// Tall structure: tighter spacing
    Tall,
    /// Complex roof geometry: tightest spacing
    Complex,
}

impl StructureType {
    /// All structure variants for UI selection
    pub const ALL: [StructureType; 3] = [
        StructureType::Normal,
        StructureType::Tall,
        StructureType::Complex,
    ];
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureType::Normal => "normal",
            StructureType::Tall => "tall",
            StructureType::Complex => "complex",
        };
        write!(f, "{}", name)
    }
}

/// Building geometry and options for one bid calculation.
///
/// Optional dimensions gate which requirement categories engage: terminal
/// counts need a roof area, conductor runs need a height. The remaining
/// fields default to the common case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "project_name": "Office Building",
///   "building_height_ft": 35.0,
///   "roof_area_sqft": 5000.0,
///   "num_corners": 4,
///   "perimeter_ft": 280.0,
///   "num_downleads": 2,
///   "soil_type": "normal",
///   "has_metal_roof": false,
///   "preferred_material": "copper"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Project name used on the rendered bid
    #[serde(default)]
    pub project_name: String,

    /// Building height in feet; required for conductor and downlead sizing
    #[serde(default)]
    pub building_height_ft: Option<f64>,

    /// Roof area in square feet; required for terminal counts
    #[serde(default)]
    pub roof_area_sqft: Option<f64>,

    /// Number of roof corners
    #[serde(default = "default_num_corners")]
    pub num_corners: u32,

    /// Measured roof perimeter in feet; enables the precise edge-terminal
    /// and horizontal-conductor formulas when present
    #[serde(default)]
    pub perimeter_ft: Option<f64>,

    /// Requested down-conductor paths (floored at 2 during calculation)
    #[serde(default = "default_num_downleads")]
    pub num_downleads: u32,

    /// Soil condition at the electrodes
    #[serde(default)]
    pub soil_type: SoilType,

    /// Whether the roof is metal (extra bonding under NFPA 780)
    #[serde(default)]
    pub has_metal_roof: bool,

    /// Preferred conductor material, e.g. "copper" or "aluminum"
    #[serde(default = "default_preferred_material")]
    pub preferred_material: String,

    /// Structure type modifier; only NFPA 780 reads this
    #[serde(default)]
    pub structure_type: StructureType,

    /// Metal objects to bond (HVAC, pipes, ...); only NFPA 780 reads this
    #[serde(default)]
    pub metal_objects: u32,

    /// Request a ground ring; only NFPA 780 reads this
    #[serde(default)]
    pub ground_ring: bool,
}

fn default_num_corners() -> u32 {
    4
}

fn default_num_downleads() -> u32 {
    2
}

fn default_preferred_material() -> String {
    "copper".to_string()
}

impl Default for BuildingSpec {
    fn default() -> Self {
        BuildingSpec {
            project_name: String::new(),
            building_height_ft: None,
            roof_area_sqft: None,
            num_corners: default_num_corners(),
            perimeter_ft: None,
            num_downleads: default_num_downleads(),
            soil_type: SoilType::default(),
            has_metal_roof: false,
            preferred_material: default_preferred_material(),
            structure_type: StructureType::default(),
            metal_objects: 0,
            ground_ring: false,
        }
    }
}

impl BuildingSpec {
    /// Validate the supplied dimensions.
    ///
    /// Absent optional dimensions are fine (they gate categories off);
    /// present but negative ones are rejected.
    pub fn validate(&self) -> BidResult<()> {
        if let Some(height) = self.building_height_ft {
            if height < 0.0 {
                return Err(BidError::invalid_input(
                    "building_height_ft",
                    height.to_string(),
                    "Height cannot be negative",
                ));
            }
        }
        if let Some(area) = self.roof_area_sqft {
            if area < 0.0 {
                return Err(BidError::invalid_input(
                    "roof_area_sqft",
                    area.to_string(),
                    "Roof area cannot be negative",
                ));
            }
        }
        if let Some(perimeter) = self.perimeter_ft {
            if perimeter < 0.0 {
                return Err(BidError::invalid_input(
                    "perimeter_ft",
                    perimeter.to_string(),
                    "Perimeter cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Air terminal counts for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirTerminalRequirement {
    /// Total terminals: corners + edges + field
    pub total: u32,
    /// One terminal per roof corner, verbatim
    pub corners: u32,
    /// Terminals along edges at the code's max spacing
    pub edges: u32,
    /// Terminals in the roof field by area coverage
    pub field: u32,
    /// Spacing and assumptions used, for audit traceability
    pub notes: String,
}

/// Conductor footage for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorRequirement {
    /// Total run: vertical + horizontal (+ roof bonding, NFPA 780)
    pub total_length_ft: f64,
    /// Downlead footage, with 10 ft termination slack per lead
    pub vertical_ft: f64,
    /// Perimeter loop footage including 20% for overlaps
    pub horizontal_ft: f64,
    /// Metal-roof bonding run (0 when not applicable)
    pub bonding_ft: f64,
    /// Down-conductor paths after the two-way-path floor
    pub num_downleads: u32,
    /// Spacing and assumptions used, for audit traceability
    pub notes: String,
}

/// Grounding electrode counts for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingRequirement {
    /// Ground rods, scaled by soil condition
    pub total_rods: u32,
    /// Minimum rod depth in feet
    pub rod_depth_ft: f64,
    /// Whether a ground ring was requested
    pub ground_ring: bool,
    /// Ground ring footage when requested (NFPA 780)
    pub ground_ring_length_ft: Option<f64>,
    /// Spacing and assumptions used, for audit traceability
    pub notes: String,
}

/// Bonding connections for one building (NFPA 780 only).
///
/// Zero connections means the requirement is absent downstream: no bonding
/// section appears in the bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondingRequirement {
    /// Metal objects plus metal-roof corner bonds
    pub total_connections: u32,
    /// Bonding wire footage, 10 ft per connection
    pub bonding_wire_ft: f64,
    /// Minimum bonding wire size (AWG)
    pub wire_size_awg: u32,
    /// Spacing and assumptions used, for audit traceability
    pub notes: String,
}

/// Full requirements map for one building under one code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Which rule set produced this report
    pub code: ComplianceCode,
    /// Present only when roof area was supplied
    pub air_terminals: Option<AirTerminalRequirement>,
    /// Present only when building height was supplied
    pub conductors: Option<ConductorRequirement>,
    /// Always computed
    pub grounding: GroundingRequirement,
    /// Always computed for NFPA 780, never present for UL 96A
    pub bonding: Option<BondingRequirement>,
}

/// Round a length to 1 decimal place at the point of computation.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Apply the two-way-path floor to the requested downlead count.
pub(crate) fn effective_downleads(requested: u32) -> u32 {
    requested.max(MIN_DOWNLEADS)
}

/// Edge terminal count at the given max spacing.
///
/// When no measured perimeter is given, approximates one from the roof area
/// assuming a square footprint. Both rule sets use this same approximation.
pub(crate) fn edge_terminal_count(
    roof_area_sqft: f64,
    num_corners: u32,
    perimeter_ft: Option<f64>,
    max_spacing_ft: f64,
) -> u32 {
    let perimeter = perimeter_ft.unwrap_or_else(|| roof_area_sqft.sqrt() * 4.0);
    let remaining = (perimeter - f64::from(num_corners) * 2.0).max(0.0);
    (remaining / max_spacing_ft).ceil() as u32
}

/// Field (roof interior) terminal count by area coverage, net of corners.
pub(crate) fn field_terminal_count(
    roof_area_sqft: f64,
    num_corners: u32,
    area_per_terminal_sqft: f64,
) -> u32 {
    let by_area = (roof_area_sqft / area_per_terminal_sqft).ceil() as i64;
    (by_area - i64::from(num_corners)).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parsing() {
        assert_eq!("UL 96A".parse::<ComplianceCode>().unwrap(), ComplianceCode::Ul96a);
        assert_eq!("ul 96a".parse::<ComplianceCode>().unwrap(), ComplianceCode::Ul96a);
        assert_eq!("NFPA 780".parse::<ComplianceCode>().unwrap(), ComplianceCode::Nfpa780);
        assert_eq!("nfpa780".parse::<ComplianceCode>().unwrap(), ComplianceCode::Nfpa780);
    }

    #[test]
    fn test_unrecognized_code_is_error() {
        let err = "IEC 62305".parse::<ComplianceCode>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COMPLIANCE_CODE");
    }

    #[test]
    fn test_code_serialization() {
        let json = serde_json::to_string(&ComplianceCode::Ul96a).unwrap();
        assert_eq!(json, "\"UL 96A\"");
        let roundtrip: ComplianceCode = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, ComplianceCode::Ul96a);
    }

    #[test]
    fn test_soil_rod_factors() {
        assert_eq!(SoilType::Normal.rods_per_downlead(), 1.0);
        assert_eq!(SoilType::Rocky.rods_per_downlead(), 2.0);
        assert_eq!(SoilType::Sandy.rods_per_downlead(), 1.5);
    }

    #[test]
    fn test_building_spec_defaults() {
        let building: BuildingSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(building.num_corners, 4);
        assert_eq!(building.num_downleads, 2);
        assert_eq!(building.soil_type, SoilType::Normal);
        assert_eq!(building.preferred_material, "copper");
        assert!(!building.has_metal_roof);
        assert!(building.roof_area_sqft.is_none());
    }

    #[test]
    fn test_soil_type_json_form() {
        let building: BuildingSpec = serde_json::from_str(r#"{"soil_type": "rocky"}"#).unwrap();
        assert_eq!(building.soil_type, SoilType::Rocky);
    }

    #[test]
    fn test_validate_rejects_negative_dimensions() {
        let building = BuildingSpec {
            roof_area_sqft: Some(-100.0),
            ..Default::default()
        };
        let err = building.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let building = BuildingSpec {
            building_height_ft: Some(-1.0),
            ..Default::default()
        };
        assert!(building.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_absent_dimensions() {
        assert!(BuildingSpec::default().validate().is_ok());
    }

    #[test]
    fn test_effective_downleads_floor() {
        assert_eq!(effective_downleads(0), 2);
        assert_eq!(effective_downleads(1), 2);
        assert_eq!(effective_downleads(2), 2);
        assert_eq!(effective_downleads(4), 4);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(425.96), 426.0);
        assert_eq!(round1(167.999), 168.0);
        assert_eq!(round1(10.04), 10.0);
    }

    #[test]
    fn test_edge_count_never_negative() {
        // Perimeter smaller than corner allowance
        assert_eq!(edge_terminal_count(25.0, 4, Some(6.0), 20.0), 0);
    }
}
