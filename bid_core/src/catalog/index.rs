//! # Catalog Index & Matcher
//!
//! Precomputed keyword index over a price catalog. The index is a derived,
//! rebuildable artifact: it is built once from the catalog at construction
//! and never mutated, so it is safe to share across any number of bid
//! calculations.
//!
//! Matching semantics:
//!
//! 1. Look the term up in the keyword index (case-insensitive).
//! 2. If the index has nothing, fall back to a linear scan of item names.
//! 3. A material preference narrows the candidates only when at least one
//!    candidate carries that material; otherwise the preference is dropped.
//! 4. The first candidate in catalog order wins. Catalog ordering therefore
//!    affects which item prices a requirement.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::catalog::{CatalogIndex, PriceItem};
//!
//! let index = CatalogIndex::new(vec![PriceItem {
//!     code: "AT-001".to_string(),
//!     name: "Air Terminal - Copper".to_string(),
//!     material_type: Some("Copper".to_string()),
//!     unit: Some("ea".to_string()),
//!     unit_price: 45.00,
//!     labor_rate: Some(15.00),
//! }]);
//!
//! let hit = index.find("air terminal", Some("copper")).unwrap();
//! assert_eq!(hit.code, "AT-001");
//! ```

use std::collections::HashMap;

use log::debug;

use super::PriceItem;

/// Fixed keyword vocabulary the index is built over.
///
/// Every keyword gets an index entry even when no catalog item matches it,
/// so lookups distinguish "known keyword, no stock" from "unknown term".
pub const KEYWORDS: [&str; 15] = [
    "air terminal",
    "lightning rod",
    "terminal",
    "conductor",
    "cable",
    "wire",
    "downlead",
    "ground rod",
    "grounding",
    "electrode",
    "bonding",
    "clamp",
    "connector",
    "labor",
    "installation",
];

/// Keyword index over a loaded price catalog.
///
/// Owns the catalog items; the index stores positions into the item list so
/// that catalog order is preserved for tie-breaking.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    items: Vec<PriceItem>,
    by_keyword: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Build the index from catalog items.
    pub fn new(items: Vec<PriceItem>) -> Self {
        let mut by_keyword: HashMap<String, Vec<usize>> = HashMap::new();

        for keyword in KEYWORDS {
            let positions: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.matches_keyword(keyword))
                .map(|(pos, _)| pos)
                .collect();
            by_keyword.insert(keyword.to_string(), positions);
        }

        CatalogIndex { items, by_keyword }
    }

    /// The catalog items, in original catalog order.
    pub fn items(&self) -> &[PriceItem] {
        &self.items
    }

    /// Number of items in the underlying catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the underlying catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the best item for a search term.
    ///
    /// Returns `None` when nothing in the catalog matches - absence, not an
    /// error. The material preference is best-effort: it narrows the
    /// candidate set only when the narrowed set is non-empty.
    pub fn find(&self, term: &str, preferred_material: Option<&str>) -> Option<&PriceItem> {
        let term = term.to_lowercase();

        let mut candidates: Vec<usize> = self.by_keyword.get(&term).cloned().unwrap_or_default();

        if candidates.is_empty() {
            // Term outside the fixed vocabulary (or vocabulary entry came up
            // empty): scan item names directly.
            candidates = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.name.to_lowercase().contains(&term))
                .map(|(pos, _)| pos)
                .collect();
            if !candidates.is_empty() {
                debug!("term '{}' resolved by linear scan, not index", term);
            }
        }

        if candidates.is_empty() {
            return None;
        }

        if let Some(material) = preferred_material {
            let filtered: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&pos| self.items[pos].has_material(material))
                .collect();
            if !filtered.is_empty() {
                candidates = filtered;
            } else {
                debug!(
                    "no '{}' item carries material '{}', keeping unfiltered candidates",
                    term, material
                );
            }
        }

        // First in catalog order wins ties.
        candidates.first().map(|&pos| &self.items[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, name: &str, material: Option<&str>, price: f64) -> PriceItem {
        PriceItem {
            code: code.to_string(),
            name: name.to_string(),
            material_type: material.map(String::from),
            unit: None,
            unit_price: price,
            labor_rate: None,
        }
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::new(vec![
            item("AT-AL", "Air Terminal - Aluminum", Some("Aluminum"), 30.0),
            item("AT-CU", "Air Terminal - Copper", Some("Copper"), 45.0),
            item("COND-100", "Conductor Cable 4/0", Some("Copper"), 3.5),
            item("GR-10", "Ground Rod - 10ft", None, 65.0),
        ])
    }

    #[test]
    fn test_every_keyword_has_entry() {
        let index = sample_index();
        for keyword in KEYWORDS {
            assert!(
                index.by_keyword.contains_key(keyword),
                "missing entry for '{}'",
                keyword
            );
        }
        // Zero-match keywords still get (empty) entries
        assert!(index.by_keyword["bonding"].is_empty());
    }

    #[test]
    fn test_find_first_in_catalog_order() {
        let index = sample_index();
        // No material preference: the aluminum terminal comes first
        let hit = index.find("air terminal", None).unwrap();
        assert_eq!(hit.code, "AT-AL");
    }

    #[test]
    fn test_material_preference_narrows() {
        let index = sample_index();
        let hit = index.find("air terminal", Some("copper")).unwrap();
        assert_eq!(hit.code, "AT-CU");
    }

    #[test]
    fn test_material_preference_is_best_effort() {
        let index = sample_index();
        // No bronze terminals in stock: preference silently dropped
        let hit = index.find("air terminal", Some("bronze")).unwrap();
        assert_eq!(hit.code, "AT-AL");
    }

    #[test]
    fn test_fallback_linear_scan() {
        let index = sample_index();
        // "10ft" is not in the keyword vocabulary but appears in a name
        let hit = index.find("10ft", None).unwrap();
        assert_eq!(hit.code, "GR-10");
    }

    #[test]
    fn test_no_match_is_none() {
        let index = sample_index();
        assert!(index.find("surge arrester", None).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let index = CatalogIndex::new(Vec::new());
        assert!(index.is_empty());
        assert!(index.find("air terminal", None).is_none());
    }
}
