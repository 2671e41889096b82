//! # Bid Calculator
//!
//! Orchestrates a bid: runs the compliance engine for the selected code,
//! resolves each requirement category against the price catalog, and
//! assembles costed sections in a fixed order (air terminals, conductors,
//! grounding, bonding).
//!
//! Every category builder follows the same template - find an item, price
//! material and labor with a category-specific fallback rate, build the
//! line - driven by the [`Category`] strategy table. A category with no
//! catalog match produces an empty section, never an error: a partially
//! priced bid is still a bid.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::calculator::BidCalculator;
//! use bid_core::catalog::PriceItem;
//! use bid_core::compliance::{BuildingSpec, ComplianceCode};
//!
//! let catalog = vec![PriceItem {
//!     code: "GR-10".to_string(),
//!     name: "Ground Rod - 10ft Copper".to_string(),
//!     material_type: Some("Copper".to_string()),
//!     unit: Some("ea".to_string()),
//!     unit_price: 65.00,
//!     labor_rate: Some(50.00),
//! }];
//!
//! let calculator = BidCalculator::new(catalog, ComplianceCode::Ul96a);
//! let bid = calculator.calculate_bid(&BuildingSpec::default()).unwrap();
//! assert_eq!(bid.sections.len(), 1); // grounding always engages
//! ```

use log::debug;

use crate::bid::{Bid, BidLineItem, BidSection, LaborFallback};
use crate::catalog::{CatalogIndex, PriceItem};
use crate::compliance::{
    AirTerminalRequirement, BondingRequirement, BuildingSpec, ComplianceCode,
    ConductorRequirement, GroundingRequirement,
};
use crate::errors::BidResult;

/// Conductors are supported every 3 ft of run.
pub const CONDUCTOR_SUPPORT_SPACING_FT: f64 = 3.0;

/// Project name used when the building spec leaves it blank.
const DEFAULT_PROJECT_NAME: &str = "Lightning Protection Bid";

/// Requirement categories the assembler prices.
///
/// Each category fixes its catalog search order (which terms, and whether
/// the material preference applies) and its fallback labor rate, keeping
/// the whole fallback table in one testable place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Roof-mounted air terminals
    AirTerminals,
    /// Main conductor run (downleads + horizontal loop)
    ConductorRun,
    /// Cable clamps along the conductor run
    ConductorSupports,
    /// Driven ground rods
    GroundRods,
    /// Bonding wire for metal objects
    BondingWire,
}

impl Category {
    /// Ordered catalog search terms; `true` means the buyer's material
    /// preference applies to that term.
    fn search_order(&self) -> &'static [(&'static str, bool)] {
        match self {
            Category::AirTerminals => &[("air terminal", true), ("terminal", false)],
            Category::ConductorRun => &[("conductor", true), ("cable", true)],
            Category::ConductorSupports => &[("clamp", false), ("connector", false)],
            Category::GroundRods => &[("ground rod", false), ("grounding", false)],
            Category::BondingWire => &[("bonding", true), ("wire", true)],
        }
    }

    /// Labor rate used when the matched item has no labor rate of its own.
    ///
    /// Per unit for terminals, supports, and rods (rods are high - they
    /// get drilled in); per foot for the conductor run; per *connection*
    /// for bonding wire, whose quantity is measured in feet.
    pub fn fallback_labor_rate(&self) -> f64 {
        match self {
            Category::AirTerminals => 15.0,
            Category::ConductorRun => 2.0,
            Category::ConductorSupports => 5.0,
            Category::GroundRods => 50.0,
            Category::BondingWire => 25.0,
        }
    }
}

/// Main bid calculation engine.
///
/// Holds the catalog (via its derived keyword index) and the selected
/// compliance code. Construction builds the index once; after that the
/// calculator is read-only and can serve any number of independent
/// calculations.
#[derive(Debug, Clone)]
pub struct BidCalculator {
    index: CatalogIndex,
    code: ComplianceCode,
}

impl BidCalculator {
    /// Create a calculator over a loaded catalog.
    pub fn new(catalog: Vec<PriceItem>, code: ComplianceCode) -> Self {
        BidCalculator {
            index: CatalogIndex::new(catalog),
            code,
        }
    }

    /// The compliance code this calculator applies.
    pub fn code(&self) -> ComplianceCode {
        self.code
    }

    /// The catalog index, for direct item lookups.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Calculate a complete bid for a building.
    ///
    /// Sections appear in the fixed order air terminals, conductors,
    /// grounding, bonding; a category appears only when its requirement
    /// does (bonding additionally needs at least one connection).
    pub fn calculate_bid(&self, building: &BuildingSpec) -> BidResult<Bid> {
        building.validate()?;

        let report = self.code.check_compliance(building);
        let material = building.preferred_material.as_str();

        let project_name = if building.project_name.is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            building.project_name.as_str()
        };
        let mut bid = Bid::new(project_name);

        if let Some(req) = &report.air_terminals {
            bid.sections.push(self.air_terminal_section(req, material));
        }
        if let Some(req) = &report.conductors {
            bid.sections.push(self.conductor_section(req, material));
        }
        bid.sections.push(self.grounding_section(&report.grounding));
        if let Some(req) = &report.bonding {
            if req.total_connections > 0 {
                bid.sections.push(self.bonding_section(req, material));
            }
        }

        Ok(bid)
    }

    /// Resolve a category to a catalog item by its fixed search order.
    fn find_for_category(&self, category: Category, material: &str) -> Option<&PriceItem> {
        category
            .search_order()
            .iter()
            .find_map(|&(term, use_material)| {
                self.index.find(term, use_material.then_some(material))
            })
    }

    /// Shared line-item template: find, price, build.
    ///
    /// `labor_basis` is the quantity the fallback labor rate applies to;
    /// it equals `quantity` for every category except bonding wire.
    fn line_item(
        &self,
        category: Category,
        quantity: f64,
        labor_basis: f64,
        material: &str,
        reason: &str,
    ) -> Option<BidLineItem> {
        let item = match self.find_for_category(category, material) {
            Some(item) => item,
            None => {
                debug!("no catalog match for {:?}, leaving section unpriced", category);
                return None;
            }
        };

        Some(BidLineItem::new(
            item.clone(),
            quantity,
            LaborFallback {
                rate: category.fallback_labor_rate(),
                basis: labor_basis,
            },
            reason,
        ))
    }

    fn air_terminal_section(&self, req: &AirTerminalRequirement, material: &str) -> BidSection {
        let mut section = BidSection::new("Air Terminals");
        let quantity = f64::from(req.total);

        if let Some(line) =
            self.line_item(Category::AirTerminals, quantity, quantity, material, &req.notes)
        {
            section.line_items.push(line);
        }

        section
    }

    fn conductor_section(&self, req: &ConductorRequirement, material: &str) -> BidSection {
        let mut section = BidSection::new("Down Conductors & Main Cables");
        let length = req.total_length_ft;

        if let Some(line) =
            self.line_item(Category::ConductorRun, length, length, material, &req.notes)
        {
            section.line_items.push(line);
        }

        // Supports are always quoted alongside the run
        let supports = (length / CONDUCTOR_SUPPORT_SPACING_FT).floor();
        if let Some(line) = self.line_item(
            Category::ConductorSupports,
            supports,
            supports,
            material,
            "Cable supports every 3 ft",
        ) {
            section.line_items.push(line);
        }

        section
    }

    fn grounding_section(&self, req: &GroundingRequirement) -> BidSection {
        let mut section = BidSection::new("Grounding System");
        let quantity = f64::from(req.total_rods);

        if let Some(line) =
            self.line_item(Category::GroundRods, quantity, quantity, "", &req.notes)
        {
            section.line_items.push(line);
        }

        section
    }

    fn bonding_section(&self, req: &BondingRequirement, material: &str) -> BidSection {
        let mut section = BidSection::new("Bonding Connections");

        // Quantity is wire footage; fallback labor is priced per connection
        if let Some(line) = self.line_item(
            Category::BondingWire,
            req.bonding_wire_ft,
            f64::from(req.total_connections),
            material,
            &req.notes,
        ) {
            section.line_items.push(line);
        }

        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::SoilType;

    fn item(
        code: &str,
        name: &str,
        material: Option<&str>,
        unit_price: f64,
        labor_rate: Option<f64>,
    ) -> PriceItem {
        PriceItem {
            code: code.to_string(),
            name: name.to_string(),
            material_type: material.map(String::from),
            unit: None,
            unit_price,
            labor_rate,
        }
    }

    fn sample_catalog() -> Vec<PriceItem> {
        vec![
            item("AT-001", "Air Terminal - Copper", Some("Copper"), 45.0, Some(15.0)),
            item("COND-100", "Conductor Cable - Copper 4/0 AWG", Some("Copper"), 3.5, Some(2.0)),
            item("GR-10", "Ground Rod - 10ft Copper", Some("Copper"), 65.0, Some(50.0)),
            item("CLAMP-01", "Cable Clamp", None, 8.0, Some(5.0)),
            item("BOND-6", "Bonding Wire #6 AWG", Some("Copper"), 2.0, Some(1.5)),
        ]
    }

    fn office_building() -> BuildingSpec {
        BuildingSpec {
            project_name: "Sample Office Building".to_string(),
            building_height_ft: Some(35.0),
            roof_area_sqft: Some(5000.0),
            num_corners: 4,
            perimeter_ft: Some(280.0),
            num_downleads: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_ul96a_office_building_bid() {
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&office_building()).unwrap();

        // No bonding under UL 96A
        let names: Vec<&str> = bid.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Air Terminals", "Down Conductors & Main Cables", "Grounding System"]
        );

        // 24 terminals at $45 / $15
        let terminals = &bid.sections[0].line_items[0];
        assert_eq!(terminals.quantity, 24.0);
        assert_eq!(terminals.material_cost, 24.0 * 45.0);
        assert_eq!(terminals.labor_cost, 24.0 * 15.0);

        // 426.0 ft of conductor plus floor(426/3) = 142 supports
        let conductors = &bid.sections[1];
        assert_eq!(conductors.line_items.len(), 2);
        assert_eq!(conductors.line_items[0].quantity, 426.0);
        assert_eq!(conductors.line_items[1].quantity, 142.0);
        assert_eq!(conductors.line_items[1].price_item.code, "CLAMP-01");

        // 2 rods in normal soil
        assert_eq!(bid.sections[2].line_items[0].quantity, 2.0);
    }

    #[test]
    fn test_nfpa780_yields_fewer_terminals() {
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Nfpa780);
        let bid = calculator.calculate_bid(&office_building()).unwrap();
        assert_eq!(bid.sections[0].line_items[0].quantity, 20.0);
    }

    #[test]
    fn test_rocky_soil_doubles_rods() {
        let building = BuildingSpec {
            soil_type: SoilType::Rocky,
            ..office_building()
        };
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&building).unwrap();
        let grounding = bid
            .sections
            .iter()
            .find(|s| s.name == "Grounding System")
            .unwrap();
        assert_eq!(grounding.line_items[0].quantity, 4.0);
    }

    #[test]
    fn test_zero_connections_means_no_bonding_section() {
        // NFPA 780, but nothing to bond
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Nfpa780);
        let bid = calculator.calculate_bid(&office_building()).unwrap();
        assert!(bid.sections.iter().all(|s| s.name != "Bonding Connections"));
    }

    #[test]
    fn test_bonding_section_when_connections_exist() {
        let building = BuildingSpec {
            metal_objects: 3,
            ..office_building()
        };
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Nfpa780);
        let bid = calculator.calculate_bid(&building).unwrap();

        let bonding = bid.sections.last().unwrap();
        assert_eq!(bonding.name, "Bonding Connections");
        // 3 connections -> 30 ft of wire, catalog labor rate applies
        let line = &bonding.line_items[0];
        assert_eq!(line.quantity, 30.0);
        assert_eq!(line.labor_cost, 30.0 * 1.5);
    }

    #[test]
    fn test_bonding_fallback_labor_is_per_connection() {
        let mut catalog = sample_catalog();
        // Strip the supplier labor rate from the bonding wire
        catalog[4].labor_rate = None;

        let building = BuildingSpec {
            metal_objects: 3,
            ..office_building()
        };
        let calculator = BidCalculator::new(catalog, ComplianceCode::Nfpa780);
        let bid = calculator.calculate_bid(&building).unwrap();

        let line = &bid.sections.last().unwrap().line_items[0];
        // Quantity stays in feet, but fallback labor is 3 connections x $25
        assert_eq!(line.quantity, 30.0);
        assert_eq!(line.labor_cost, 75.0);
    }

    #[test]
    fn test_empty_catalog_yields_empty_sections() {
        let calculator = BidCalculator::new(Vec::new(), ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&office_building()).unwrap();

        assert_eq!(bid.sections.len(), 3);
        for section in &bid.sections {
            assert!(section.line_items.is_empty());
            assert_eq!(section.section_total(), 0.0);
        }
        assert_eq!(bid.final_bid_amount(), 0.0);
    }

    #[test]
    fn test_partial_catalog_tolerated() {
        // Clamps missing: conductor section carries only the main run
        let catalog = vec![item(
            "COND-100",
            "Conductor Cable",
            Some("Copper"),
            3.5,
            Some(2.0),
        )];
        let calculator = BidCalculator::new(catalog, ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&office_building()).unwrap();

        let conductors = bid
            .sections
            .iter()
            .find(|s| s.name == "Down Conductors & Main Cables")
            .unwrap();
        assert_eq!(conductors.line_items.len(), 1);
        assert_eq!(conductors.line_items[0].price_item.code, "COND-100");
    }

    #[test]
    fn test_air_terminal_fallback_search_term() {
        // No "air terminal" item, but a plain "terminal" matches second
        let catalog = vec![item("TB-01", "Terminal Base", None, 12.0, None)];
        let calculator = BidCalculator::new(catalog, ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&office_building()).unwrap();

        let terminals = &bid.sections[0];
        assert_eq!(terminals.line_items[0].price_item.code, "TB-01");
        // Fallback labor: 24 terminals x $15
        assert_eq!(terminals.line_items[0].labor_cost, 360.0);
    }

    #[test]
    fn test_material_preference_selects_catalog_item() {
        let catalog = vec![
            item("AT-AL", "Air Terminal - Aluminum", Some("Aluminum"), 30.0, None),
            item("AT-CU", "Air Terminal - Copper", Some("Copper"), 45.0, None),
        ];
        let calculator = BidCalculator::new(catalog, ComplianceCode::Ul96a);

        let copper = office_building();
        let bid = calculator.calculate_bid(&copper).unwrap();
        assert_eq!(bid.sections[0].line_items[0].price_item.code, "AT-CU");

        let aluminum = BuildingSpec {
            preferred_material: "aluminum".to_string(),
            ..office_building()
        };
        let bid = calculator.calculate_bid(&aluminum).unwrap();
        assert_eq!(bid.sections[0].line_items[0].price_item.code, "AT-AL");
    }

    #[test]
    fn test_idempotent_totals() {
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Ul96a);
        let first = calculator.calculate_bid(&office_building()).unwrap();
        let second = calculator.calculate_bid(&office_building()).unwrap();

        assert_eq!(first.subtotal_material(), second.subtotal_material());
        assert_eq!(first.subtotal_labor(), second.subtotal_labor());
        assert_eq!(first.total_with_markup(), second.total_with_markup());
        assert_eq!(first.final_bid_amount(), second.final_bid_amount());
    }

    #[test]
    fn test_default_project_name() {
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Ul96a);
        let bid = calculator.calculate_bid(&BuildingSpec::default()).unwrap();
        assert_eq!(bid.project_name, "Lightning Protection Bid");
    }

    #[test]
    fn test_invalid_building_rejected() {
        let calculator = BidCalculator::new(sample_catalog(), ComplianceCode::Ul96a);
        let building = BuildingSpec {
            roof_area_sqft: Some(-5000.0),
            ..Default::default()
        };
        assert!(calculator.calculate_bid(&building).is_err());
    }

    #[test]
    fn test_fallback_rate_table() {
        assert_eq!(Category::AirTerminals.fallback_labor_rate(), 15.0);
        assert_eq!(Category::ConductorRun.fallback_labor_rate(), 2.0);
        assert_eq!(Category::ConductorSupports.fallback_labor_rate(), 5.0);
        assert_eq!(Category::GroundRods.fallback_labor_rate(), 50.0);
        assert_eq!(Category::BondingWire.fallback_labor_rate(), 25.0);
    }
}
