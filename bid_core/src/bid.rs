//! # Bid Data Model
//!
//! The costed output graph: a [`Bid`] holds ordered [`BidSection`]s of
//! [`BidLineItem`]s plus the markup configuration. Line-item costs are
//! computed once at construction and never mutated; every rolled-up total
//! is a method that recomputes from the children, so totals can never
//! drift from the line items and an exporter can verify them
//! independently.
//!
//! ## Markup chain
//!
//! The totals feed each other in a strict order:
//!
//! ```text
//! subtotal          = subtotal_material + subtotal_labor
//! total_with_markup = subtotal + material_markup + labor_markup
//! final_bid_amount  = total_with_markup * (1 + overhead% + profit%)
//! ```
//!
//! Overhead and profit both apply to the marked-up total and are additive,
//! not compounded.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::bid::Bid;
//!
//! let bid = Bid::new("Office Building");
//! assert_eq!(bid.material_markup_pct, 15.0);
//! assert_eq!(bid.final_bid_amount(), 0.0);
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::PriceItem;

/// Default material markup (%)
pub const DEFAULT_MATERIAL_MARKUP_PCT: f64 = 15.0;
/// Default labor markup (%)
pub const DEFAULT_LABOR_MARKUP_PCT: f64 = 20.0;
/// Default overhead (%)
pub const DEFAULT_OVERHEAD_PCT: f64 = 10.0;
/// Default profit (%)
pub const DEFAULT_PROFIT_PCT: f64 = 10.0;

/// Labor pricing used when the matched catalog item has no labor rate.
///
/// The `basis` quantity is usually the line quantity, but not always:
/// bonding wire is quantified in feet while its fallback labor is priced
/// per connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaborFallback {
    /// Dollars per basis unit
    pub rate: f64,
    /// Quantity the fallback rate applies to
    pub basis: f64,
}

/// One costed row of the bid.
///
/// Owns a copy of the matched catalog item so the row stays renderable and
/// auditable even if the catalog is dropped. Costs are fixed at
/// construction: `material_cost = quantity x unit_price`, `labor_cost =
/// quantity x labor_rate` or the category fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidLineItem {
    /// The catalog item this row prices
    pub price_item: PriceItem,

    /// How many units (or feet) the requirement calls for
    pub quantity: f64,

    /// quantity x unit_price
    pub material_cost: f64,

    /// quantity x labor_rate, or the category fallback when the item
    /// carries no labor rate
    pub labor_cost: f64,

    /// Why this row is in the bid (the requirement's audit notes)
    pub reason: String,
}

impl BidLineItem {
    /// Build a line item, computing both costs now.
    pub fn new(
        price_item: PriceItem,
        quantity: f64,
        fallback: LaborFallback,
        reason: impl Into<String>,
    ) -> Self {
        let material_cost = quantity * price_item.unit_price;
        let labor_cost = match price_item.labor_rate {
            Some(rate) => quantity * rate,
            None => fallback.basis * fallback.rate,
        };

        BidLineItem {
            price_item,
            quantity,
            material_cost,
            labor_cost,
            reason: reason.into(),
        }
    }

    /// Combined cost of this row.
    pub fn total_cost(&self) -> f64 {
        self.material_cost + self.labor_cost
    }
}

/// A named group of line items ("Air Terminals", "Grounding System", ...).
///
/// Totals are always recomputed from the children, never stored.
/// A section may legitimately be empty when nothing in the catalog matched
/// its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSection {
    /// Section heading on the rendered bid
    pub name: String,

    /// Costed rows in this section
    pub line_items: Vec<BidLineItem>,
}

impl BidSection {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        BidSection {
            name: name.into(),
            line_items: Vec::new(),
        }
    }

    /// Sum of material costs in this section.
    pub fn total_material(&self) -> f64 {
        self.line_items.iter().map(|item| item.material_cost).sum()
    }

    /// Sum of labor costs in this section.
    pub fn total_labor(&self) -> f64 {
        self.line_items.iter().map(|item| item.labor_cost).sum()
    }

    /// Material + labor for this section.
    pub fn section_total(&self) -> f64 {
        self.total_material() + self.total_labor()
    }
}

/// Complete bid for one project.
///
/// Sections appear in the fixed category order: air terminals, conductors,
/// grounding, then bonding (when present). The section list is append-only
/// during assembly; everything else is immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Stable identifier for exports and references
    pub id: Uuid,

    /// Project name on the rendered bid
    pub project_name: String,

    /// Date the bid was calculated
    pub bid_date: NaiveDate,

    /// Ordered bid sections
    pub sections: Vec<BidSection>,

    /// Markup on raw material cost (%)
    #[serde(default = "default_material_markup")]
    pub material_markup_pct: f64,

    /// Markup on raw labor cost (%)
    #[serde(default = "default_labor_markup")]
    pub labor_markup_pct: f64,

    /// Overhead applied to the marked-up total (%)
    #[serde(default = "default_overhead")]
    pub overhead_pct: f64,

    /// Profit applied to the marked-up total (%)
    #[serde(default = "default_profit")]
    pub profit_pct: f64,
}

fn default_material_markup() -> f64 {
    DEFAULT_MATERIAL_MARKUP_PCT
}

fn default_labor_markup() -> f64 {
    DEFAULT_LABOR_MARKUP_PCT
}

fn default_overhead() -> f64 {
    DEFAULT_OVERHEAD_PCT
}

fn default_profit() -> f64 {
    DEFAULT_PROFIT_PCT
}

impl Bid {
    /// Create an empty bid with default markup percentages, dated today.
    pub fn new(project_name: impl Into<String>) -> Self {
        Bid {
            id: Uuid::new_v4(),
            project_name: project_name.into(),
            bid_date: Utc::now().date_naive(),
            sections: Vec::new(),
            material_markup_pct: DEFAULT_MATERIAL_MARKUP_PCT,
            labor_markup_pct: DEFAULT_LABOR_MARKUP_PCT,
            overhead_pct: DEFAULT_OVERHEAD_PCT,
            profit_pct: DEFAULT_PROFIT_PCT,
        }
    }

    /// Total material cost across all sections, before markup.
    pub fn subtotal_material(&self) -> f64 {
        self.sections.iter().map(|s| s.total_material()).sum()
    }

    /// Total labor cost across all sections, before markup.
    pub fn subtotal_labor(&self) -> f64 {
        self.sections.iter().map(|s| s.total_labor()).sum()
    }

    /// Material + labor, before markup.
    pub fn subtotal(&self) -> f64 {
        self.subtotal_material() + self.subtotal_labor()
    }

    /// Subtotal plus the separate material and labor markups.
    pub fn total_with_markup(&self) -> f64 {
        let material_markup = self.subtotal_material() * (self.material_markup_pct / 100.0);
        let labor_markup = self.subtotal_labor() * (self.labor_markup_pct / 100.0);
        self.subtotal() + material_markup + labor_markup
    }

    /// Final amount: overhead and profit each applied to the marked-up
    /// total, additively.
    pub fn final_bid_amount(&self) -> f64 {
        let base = self.total_with_markup();
        base * (1.0 + self.overhead_pct / 100.0 + self.profit_pct / 100.0)
    }
}
