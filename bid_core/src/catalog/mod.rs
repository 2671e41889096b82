//! # Price Catalog
//!
//! Catalog entries loaded from a supplier pricing sheet, plus the derived
//! keyword index used to resolve abstract needs ("ground rod", copper
//! preferred) to concrete priced items.
//!
//! ## Submodules
//!
//! - [`index`] - Keyword index and matcher over a loaded catalog
//! - [`loader`] - CSV pricing-sheet loader, tolerant of messy rows
//!
//! ## Example
//!
//! ```rust
//! use bid_core::catalog::PriceItem;
//!
//! let item = PriceItem {
//!     code: "AT-001".to_string(),
//!     name: "Air Terminal - Copper".to_string(),
//!     material_type: Some("Copper".to_string()),
//!     unit: Some("ea".to_string()),
//!     unit_price: 45.00,
//!     labor_rate: Some(15.00),
//! };
//! assert!(item.matches_keyword("air terminal"));
//! ```

pub mod index;
pub mod loader;

pub use index::CatalogIndex;
pub use loader::{load_catalog_csv, load_catalog_from_reader};

use serde::{Deserialize, Serialize};

/// One priced item from the supplier catalog.
///
/// Created once by the loader and read-only afterward. The `name` and `code`
/// strings drive keyword matching; `material_type` drives the best-effort
/// material preference filter.
///
/// ## JSON Example
///
/// ```json
/// {
///   "code": "GR-10",
///   "name": "Ground Rod - 10ft Copper",
///   "material_type": "Copper",
///   "unit": "ea",
///   "unit_price": 65.0,
///   "labor_rate": 50.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceItem {
    /// Supplier part code (may be empty, never absent)
    pub code: String,

    /// Item description, used for text matching
    pub name: String,

    /// Material type, e.g. "Copper" or "Aluminum"
    #[serde(default)]
    pub material_type: Option<String>,

    /// Unit of measure, e.g. "ea" or "ft"
    #[serde(default)]
    pub unit: Option<String>,

    /// Price per unit (non-negative)
    pub unit_price: f64,

    /// Labor cost per unit, when the supplier quotes one
    #[serde(default)]
    pub labor_rate: Option<f64>,
}

impl PriceItem {
    /// Case-insensitive keyword test against both name and code.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword) || self.code.to_lowercase().contains(&keyword)
    }

    /// Case-insensitive material test, e.g. `has_material("copper")`.
    ///
    /// Items with no material type never match.
    pub fn has_material(&self, material: &str) -> bool {
        let material = material.to_lowercase();
        self.material_type
            .as_deref()
            .map(|m| m.to_lowercase().contains(&material))
            .unwrap_or(false)
    }
}
