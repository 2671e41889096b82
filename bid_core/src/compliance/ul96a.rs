//! # UL 96A Rules
//!
//! Quantity rules per UL 96A, the tighter of the two supported codes:
//!
//! - Air terminals at every corner, along edges at max 20 ft spacing, and
//!   one per 500 sqft of roof field
//! - Minimum two down conductors (two-way path to ground)
//! - Ground rods at minimum 10 ft depth, scaled up in poor soil
//!
//! All functions are pure; [`check_compliance`] assembles the full
//! requirements map for a building.

use super::{
    edge_terminal_count, effective_downleads, field_terminal_count, round1, AirTerminalRequirement,
    BuildingSpec, ComplianceCode, ComplianceReport, ConductorRequirement, GroundingRequirement,
    SoilType,
};

/// Max air terminal spacing along roof edges (ft)
pub const AIR_TERMINAL_MAX_SPACING_FT: f64 = 20.0;

/// Roof field area covered per terminal (sqft)
pub const FIELD_AREA_PER_TERMINAL_SQFT: f64 = 500.0;

/// Minimum ground rod depth (ft)
pub const GROUND_ROD_MIN_DEPTH_FT: f64 = 10.0;

/// Air terminal counts: corners + edge spacing + field coverage.
pub fn calculate_air_terminals(
    roof_area_sqft: f64,
    num_corners: u32,
    perimeter_ft: Option<f64>,
) -> AirTerminalRequirement {
    let corners = num_corners;
    let edges = edge_terminal_count(
        roof_area_sqft,
        num_corners,
        perimeter_ft,
        AIR_TERMINAL_MAX_SPACING_FT,
    );
    let field = field_terminal_count(roof_area_sqft, num_corners, FIELD_AREA_PER_TERMINAL_SQFT);

    AirTerminalRequirement {
        total: corners + edges + field,
        corners,
        edges,
        field,
        notes: format!("UL 96A: max {} ft terminal spacing", AIR_TERMINAL_MAX_SPACING_FT),
    }
}

/// Conductor footage: downleads plus the horizontal perimeter loop.
///
/// With no measured perimeter the horizontal run falls back to a
/// height-based proxy (height x 4 x 1.2). This is a different approximation
/// than the area-based one used for edge terminals; both are kept as-is
/// because existing estimates were calibrated against them.
pub fn calculate_conductors(
    building_height_ft: f64,
    num_downleads: u32,
    perimeter_ft: Option<f64>,
) -> ConductorRequirement {
    let num_downleads = effective_downleads(num_downleads);

    // 10 ft per downlead for connections and ground termination
    let vertical_ft = (building_height_ft + 10.0) * f64::from(num_downleads);

    // Perimeter loop plus 20% for overlaps and connections
    let horizontal_ft = match perimeter_ft {
        Some(perimeter) => perimeter * 1.2,
        None => building_height_ft * 4.0 * 1.2,
    };

    ConductorRequirement {
        total_length_ft: round1(vertical_ft + horizontal_ft),
        vertical_ft: round1(vertical_ft),
        horizontal_ft: round1(horizontal_ft),
        bonding_ft: 0.0,
        num_downleads,
        notes: "UL 96A: min 2 down conductors (two-way path), 8\" min bend radius".to_string(),
    }
}

/// Ground rod count: one per downlead, scaled by soil condition.
pub fn calculate_grounding(num_downleads: u32, soil_type: SoilType) -> GroundingRequirement {
    let num_downleads = effective_downleads(num_downleads);
    let total_rods = (f64::from(num_downleads) * soil_type.rods_per_downlead()).ceil() as u32;

    GroundingRequirement {
        total_rods,
        rod_depth_ft: GROUND_ROD_MIN_DEPTH_FT,
        ground_ring: false,
        ground_ring_length_ft: None,
        notes: format!(
            "UL 96A: min {} ft deep, one rod per downlead minimum",
            GROUND_ROD_MIN_DEPTH_FT
        ),
    }
}

/// Full UL 96A requirements map for a building.
///
/// UL 96A has no separate bonding category; the report's `bonding` is
/// always absent.
pub fn check_compliance(building: &BuildingSpec) -> ComplianceReport {
    let air_terminals = building
        .roof_area_sqft
        .map(|area| calculate_air_terminals(area, building.num_corners, building.perimeter_ft));

    let conductors = building.building_height_ft.map(|height| {
        calculate_conductors(height, building.num_downleads, building.perimeter_ft)
    });

    let grounding = calculate_grounding(building.num_downleads, building.soil_type);

    ComplianceReport {
        code: ComplianceCode::Ul96a,
        air_terminals,
        conductors,
        grounding,
        bonding: None,
    }
}
