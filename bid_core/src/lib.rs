//! # bid_core - Lightning Protection Bid Engine
//!
//! `bid_core` estimates bills of materials and prices for lightning
//! protection installations. It applies an engineering code rule set
//! (UL 96A or NFPA 780) to building geometry, matches the computed
//! quantities against a supplier price catalog, and assembles a priced,
//! markup-adjusted bid.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one `calculate_bid` call is a pure computation over an
//!   immutable catalog and building record
//! - **JSON-First**: all inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Degrade, don't fail**: a category with no catalog match yields an
//!   empty bid section, never an exception
//!
//! ## Quick Start
//!
//! ```rust
//! use bid_core::calculator::BidCalculator;
//! use bid_core::catalog::PriceItem;
//! use bid_core::compliance::{BuildingSpec, ComplianceCode};
//!
//! let catalog = vec![PriceItem {
//!     code: "AT-001".to_string(),
//!     name: "Air Terminal - Copper".to_string(),
//!     material_type: Some("Copper".to_string()),
//!     unit: Some("ea".to_string()),
//!     unit_price: 45.00,
//!     labor_rate: Some(15.00),
//! }];
//!
//! let building = BuildingSpec {
//!     project_name: "Office Building".to_string(),
//!     building_height_ft: Some(35.0),
//!     roof_area_sqft: Some(5000.0),
//!     perimeter_ft: Some(280.0),
//!     ..Default::default()
//! };
//!
//! let calculator = BidCalculator::new(catalog, ComplianceCode::Ul96a);
//! let bid = calculator.calculate_bid(&building).unwrap();
//! println!("Final bid: ${:.2}", bid.final_bid_amount());
//! ```
//!
//! ## Modules
//!
//! - [`compliance`] - Code rule sets that turn geometry into quantities
//! - [`catalog`] - Price catalog, keyword index/matcher, CSV loader
//! - [`calculator`] - Bid assembly: requirements -> costed sections
//! - [`bid`] - Bid, section, and line-item data model with the markup chain
//! - [`errors`] - Structured error types

pub mod bid;
pub mod calculator;
pub mod catalog;
pub mod compliance;
pub mod errors;

// Re-export commonly used types at crate root for convenience
pub use bid::{Bid, BidLineItem, BidSection};
pub use calculator::BidCalculator;
pub use catalog::{load_catalog_csv, CatalogIndex, PriceItem};
pub use compliance::{BuildingSpec, ComplianceCode, ComplianceReport};
pub use errors::{BidError, BidResult};
