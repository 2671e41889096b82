//! # NFPA 780 Rules
//!
//! Quantity rules per NFPA 780. Similar in structure to UL 96A but:
//!
//! - Allows 25 ft terminal spacing (tightened to 20 ft for tall structures
//!   and 15 ft for complex roofs)
//! - Roof field coverage at one terminal per 600 sqft
//! - Explicit bonding of metal objects within 6 ft of the system, with
//!   extra corner bonds for metal roofs
//! - Optional ground ring for larger structures

use super::{
    edge_terminal_count, effective_downleads, field_terminal_count, round1, AirTerminalRequirement,
    BondingRequirement, BuildingSpec, ComplianceCode, ComplianceReport, ConductorRequirement,
    GroundingRequirement, SoilType, StructureType,
};

/// Max air terminal spacing for a normal structure (ft)
pub const AIR_TERMINAL_MAX_SPACING_FT: f64 = 25.0;

/// Roof field area covered per terminal (sqft)
pub const FIELD_AREA_PER_TERMINAL_SQFT: f64 = 600.0;

/// Minimum ground rod depth (ft)
pub const GROUND_ROD_MIN_DEPTH_FT: f64 = 10.0;

/// Minimum bonding wire size (AWG)
pub const BONDING_WIRE_SIZE_AWG: u32 = 6;

/// Rod-to-rod spacing along an optional ground ring (ft)
pub const GROUND_RING_ROD_SPACING_FT: f64 = 25.0;

/// Estimated bonding wire per connection (ft)
pub const BONDING_WIRE_PER_CONNECTION_FT: f64 = 10.0;

/// Max terminal spacing adjusted for structure type.
pub fn max_terminal_spacing(structure_type: StructureType) -> f64 {
    match structure_type {
        StructureType::Normal => AIR_TERMINAL_MAX_SPACING_FT,
        StructureType::Tall => 20.0,
        StructureType::Complex => 15.0,
    }
}

/// Air terminal counts: corners + edge spacing + field coverage, with the
/// edge spacing tightened for tall or complex structures.
pub fn calculate_air_terminals(
    roof_area_sqft: f64,
    num_corners: u32,
    perimeter_ft: Option<f64>,
    structure_type: StructureType,
) -> AirTerminalRequirement {
    let max_spacing = max_terminal_spacing(structure_type);
    let corners = num_corners;
    let edges = edge_terminal_count(roof_area_sqft, num_corners, perimeter_ft, max_spacing);
    let field = field_terminal_count(roof_area_sqft, num_corners, FIELD_AREA_PER_TERMINAL_SQFT);

    AirTerminalRequirement {
        total: corners + edges + field,
        corners,
        edges,
        field,
        notes: format!(
            "NFPA 780: max {} ft spacing, {} structure",
            max_spacing, structure_type
        ),
    }
}

/// Conductor footage: downleads, horizontal loop, and for metal roofs an
/// additional bonding run along the roof.
pub fn calculate_conductors(
    building_height_ft: f64,
    num_downleads: u32,
    perimeter_ft: Option<f64>,
    has_metal_roof: bool,
) -> ConductorRequirement {
    let num_downleads = effective_downleads(num_downleads);

    let vertical_ft = (building_height_ft + 10.0) * f64::from(num_downleads);
    let horizontal_ft = match perimeter_ft {
        Some(perimeter) => perimeter * 1.2,
        None => building_height_ft * 4.0 * 1.2,
    };

    let bonding_ft = if has_metal_roof {
        match perimeter_ft {
            Some(perimeter) => perimeter * 0.5,
            None => building_height_ft * 2.0,
        }
    } else {
        0.0
    };

    ConductorRequirement {
        total_length_ft: round1(vertical_ft + horizontal_ft + bonding_ft),
        vertical_ft: round1(vertical_ft),
        horizontal_ft: round1(horizontal_ft),
        bonding_ft: round1(bonding_ft),
        num_downleads,
        notes: if has_metal_roof {
            "NFPA 780: min 2 paths, metal roof bonding required".to_string()
        } else {
            "NFPA 780: min 2 down paths".to_string()
        },
    }
}

/// Ground rod count, with an optional ground ring sized at 25 ft of ring
/// conductor per downlead.
pub fn calculate_grounding(
    num_downleads: u32,
    soil_type: SoilType,
    ground_ring: bool,
) -> GroundingRequirement {
    let num_downleads = effective_downleads(num_downleads);
    let total_rods = (f64::from(num_downleads) * soil_type.rods_per_downlead()).ceil() as u32;

    let mut notes = format!(
        "NFPA 780: {} rods at {} ft depth",
        total_rods, GROUND_ROD_MIN_DEPTH_FT
    );
    let ground_ring_length_ft = if ground_ring {
        notes.push_str(", ground ring recommended");
        Some(f64::from(num_downleads) * GROUND_RING_ROD_SPACING_FT)
    } else {
        None
    };

    GroundingRequirement {
        total_rods,
        rod_depth_ft: GROUND_ROD_MIN_DEPTH_FT,
        ground_ring,
        ground_ring_length_ft,
        notes,
    }
}

/// Bonding connections: every listed metal object, plus four corner bonds
/// for a metal roof. Zero connections means no bonding work downstream.
pub fn calculate_bonding(metal_objects: u32, has_metal_roof: bool) -> BondingRequirement {
    let total_connections = metal_objects + if has_metal_roof { 4 } else { 0 };

    BondingRequirement {
        total_connections,
        bonding_wire_ft: f64::from(total_connections) * BONDING_WIRE_PER_CONNECTION_FT,
        wire_size_awg: BONDING_WIRE_SIZE_AWG,
        notes: "NFPA 780: bond all metal within 6 ft of system".to_string(),
    }
}

/// Full NFPA 780 requirements map for a building.
///
/// Bonding is always computed here, even when it comes out to zero
/// connections; the bid assembler decides whether a section is warranted.
pub fn check_compliance(building: &BuildingSpec) -> ComplianceReport {
    let air_terminals = building.roof_area_sqft.map(|area| {
        calculate_air_terminals(
            area,
            building.num_corners,
            building.perimeter_ft,
            building.structure_type,
        )
    });

    let conductors = building.building_height_ft.map(|height| {
        calculate_conductors(
            height,
            building.num_downleads,
            building.perimeter_ft,
            building.has_metal_roof,
        )
    });

    let grounding = calculate_grounding(
        building.num_downleads,
        building.soil_type,
        building.ground_ring,
    );

    let bonding = calculate_bonding(building.metal_objects, building.has_metal_roof);

    ComplianceReport {
        code: ComplianceCode::Nfpa780,
        air_terminals,
        conductors,
        grounding,
        bonding: Some(bonding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_terminals_normal_structure() {
        // edges = ceil((280-8)/25) = 11, field = ceil(5000/600) - 4 = 5
        let req = calculate_air_terminals(5000.0, 4, Some(280.0), StructureType::Normal);
        assert_eq!(req.corners, 4);
        assert_eq!(req.edges, 11);
        assert_eq!(req.field, 5);
        assert_eq!(req.total, 20);
    }

    #[test]
    fn test_looser_spacing_than_ul96a() {
        // Same building yields fewer terminals than UL 96A's 24
        let nfpa = calculate_air_terminals(5000.0, 4, Some(280.0), StructureType::Normal);
        let ul = super::super::ul96a::calculate_air_terminals(5000.0, 4, Some(280.0));
        assert!(nfpa.total < ul.total);
    }

    #[test]
    fn test_structure_type_tightens_spacing() {
        assert_eq!(max_terminal_spacing(StructureType::Normal), 25.0);
        assert_eq!(max_terminal_spacing(StructureType::Tall), 20.0);
        assert_eq!(max_terminal_spacing(StructureType::Complex), 15.0);

        // Tall structure matches UL 96A edge spacing: ceil(272/20) = 14
        let tall = calculate_air_terminals(5000.0, 4, Some(280.0), StructureType::Tall);
        assert_eq!(tall.edges, 14);

        // Complex roof: ceil(272/15) = 19
        let complex = calculate_air_terminals(5000.0, 4, Some(280.0), StructureType::Complex);
        assert_eq!(complex.edges, 19);
        assert!(complex.notes.contains("complex"));
    }

    #[test]
    fn test_conductors_without_metal_roof() {
        let req = calculate_conductors(35.0, 2, Some(280.0), false);
        assert_eq!(req.total_length_ft, 426.0);
        assert_eq!(req.bonding_ft, 0.0);
    }

    #[test]
    fn test_conductors_metal_roof_bonding_run() {
        // bonding = 280 * 0.5 = 140, total = 90 + 336 + 140
        let req = calculate_conductors(35.0, 2, Some(280.0), true);
        assert_eq!(req.bonding_ft, 140.0);
        assert_eq!(req.total_length_ft, 566.0);
        assert!(req.notes.contains("metal roof"));
    }

    #[test]
    fn test_conductors_metal_roof_height_fallback() {
        // no perimeter: bonding = 35 * 2 = 70
        let req = calculate_conductors(35.0, 2, None, true);
        assert_eq!(req.bonding_ft, 70.0);
    }

    #[test]
    fn test_grounding_without_ring() {
        let req = calculate_grounding(2, SoilType::Normal, false);
        assert_eq!(req.total_rods, 2);
        assert!(!req.ground_ring);
        assert!(req.ground_ring_length_ft.is_none());
    }

    #[test]
    fn test_grounding_with_ring() {
        let req = calculate_grounding(2, SoilType::Normal, true);
        assert_eq!(req.ground_ring_length_ft, Some(50.0));
        assert!(req.notes.contains("ground ring"));
    }

    #[test]
    fn test_bonding_counts() {
        let req = calculate_bonding(3, true);
        assert_eq!(req.total_connections, 7);
        assert_eq!(req.bonding_wire_ft, 70.0);
        assert_eq!(req.wire_size_awg, 6);

        let req = calculate_bonding(0, false);
        assert_eq!(req.total_connections, 0);
        assert_eq!(req.bonding_wire_ft, 0.0);
    }

    #[test]
    fn test_check_compliance_always_reports_bonding() {
        let report = check_compliance(&BuildingSpec::default());
        assert_eq!(report.code, ComplianceCode::Nfpa780);
        // Bonding is computed even at zero connections
        let bonding = report.bonding.unwrap();
        assert_eq!(bonding.total_connections, 0);
    }

    #[test]
    fn test_check_compliance_metal_roof_flows_through() {
        let building = BuildingSpec {
            building_height_ft: Some(35.0),
            perimeter_ft: Some(280.0),
            has_metal_roof: true,
            metal_objects: 2,
            ..Default::default()
        };
        let report = check_compliance(&building);
        assert_eq!(report.conductors.unwrap().bonding_ft, 140.0);
        assert_eq!(report.bonding.unwrap().total_connections, 6);
    }
}
