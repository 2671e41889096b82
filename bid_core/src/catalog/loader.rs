//! # Pricing Sheet Loader
//!
//! Loads a price catalog from a CSV pricing sheet. Supplier sheets come in
//! wildly different shapes, so the loader is deliberately forgiving:
//!
//! - Column headers are matched against candidate-name lists ("price",
//!   "unit price", "cost", ...), trimmed and case-insensitive.
//! - Rows whose price cell does not parse are skipped, not fatal. Pricing
//!   sheets routinely contain section headers and subtotal rows.
//! - A sheet missing any of the required columns (code, name, price) is a
//!   hard failure that names the file and the columns that were found.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::catalog::load_catalog_from_reader;
//!
//! let sheet = "\
//! Code,Description,Type,Unit,Price,Labor
//! AT-001,Air Terminal - Copper,Copper,ea,$45.00,$15.00
//! SECTION: GROUNDING,,,,,
//! GR-10,Ground Rod - 10ft,Copper,ea,\"1,065.00\",50
//! ";
//!
//! let items = load_catalog_from_reader(sheet.as_bytes(), "demo.csv").unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].unit_price, 1065.0);
//! ```

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::errors::{BidError, BidResult};

use super::PriceItem;

/// Candidate header names for each catalog column.
const CODE_HEADERS: [&str; 5] = ["code", "item code", "part", "part #", "part number"];
const NAME_HEADERS: [&str; 4] = ["name", "description", "item", "material name"];
const MATERIAL_HEADERS: [&str; 3] = ["type", "material type", "category"];
const UNIT_HEADERS: [&str; 3] = ["unit", "uom", "units"];
const PRICE_HEADERS: [&str; 4] = ["price", "unit price", "unit_cost", "cost"];
const LABOR_HEADERS: [&str; 3] = ["labor", "labor rate", "labor_cost"];

/// Resolved column positions for one sheet.
struct ColumnMap {
    code: usize,
    name: usize,
    material_type: Option<usize>,
    unit: Option<usize>,
    unit_price: usize,
    labor_rate: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns from the (normalized) header row. Required columns
    /// that cannot be resolved produce a MissingColumns error naming what
    /// was actually in the sheet.
    fn resolve(headers: &[String], source: &str) -> BidResult<ColumnMap> {
        let position = |candidates: &[&str]| {
            headers
                .iter()
                .position(|h| candidates.contains(&h.as_str()))
        };

        let code = position(&CODE_HEADERS);
        let name = position(&NAME_HEADERS);
        let unit_price = position(&PRICE_HEADERS);

        let mut missing = Vec::new();
        if code.is_none() {
            missing.push("code".to_string());
        }
        if name.is_none() {
            missing.push("name".to_string());
        }
        if unit_price.is_none() {
            missing.push("unit_price".to_string());
        }
        if !missing.is_empty() {
            return Err(BidError::missing_columns(source, missing, headers.to_vec()));
        }

        Ok(ColumnMap {
            code: code.unwrap(),
            name: name.unwrap(),
            material_type: position(&MATERIAL_HEADERS),
            unit: position(&UNIT_HEADERS),
            unit_price: unit_price.unwrap(),
            labor_rate: position(&LABOR_HEADERS),
        })
    }
}

/// Parse a currency cell: strips "$" and thousands separators.
///
/// Returns `None` for blank or non-numeric cells.
fn parse_money(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace('$', "").replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Load a price catalog from a CSV file on disk.
///
/// See [`load_catalog_from_reader`] for the parsing rules.
pub fn load_catalog_csv(path: &Path) -> BidResult<Vec<PriceItem>> {
    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("pricing sheet")
        .to_string();

    let file = std::fs::File::open(path)
        .map_err(|e| BidError::catalog_error("open", path.display().to_string(), e.to_string()))?;

    load_catalog_from_reader(file, &source)
}

/// Load a price catalog from any CSV reader.
///
/// `source` names the sheet in error messages (typically the file name).
/// Rows that are not price rows (unparsable or negative price) are skipped
/// and logged; a missing required column set fails the whole load.
pub fn load_catalog_from_reader<R: Read>(reader: R, source: &str) -> BidResult<Vec<PriceItem>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| BidError::catalog_error("read headers", source, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let columns = ColumnMap::resolve(&headers, source)?;

    let mut items = Vec::new();
    for (row_num, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("{}: skipping malformed row {}: {}", source, row_num + 2, e);
                continue;
            }
        };

        let cell = |pos: usize| record.get(pos).unwrap_or("").trim();
        let optional_cell = |pos: Option<usize>| {
            pos.map(|p| cell(p))
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let unit_price = match parse_money(cell(columns.unit_price)) {
            Some(price) if price >= 0.0 => price,
            Some(price) => {
                debug!(
                    "{}: skipping row {} with negative price {}",
                    source,
                    row_num + 2,
                    price
                );
                continue;
            }
            None => {
                // Section header or subtotal row, not a price row.
                debug!("{}: skipping non-price row {}", source, row_num + 2);
                continue;
            }
        };

        let labor_rate = columns
            .labor_rate
            .and_then(|pos| parse_money(cell(pos)))
            .filter(|rate| *rate >= 0.0);

        items.push(PriceItem {
            code: cell(columns.code).to_string(),
            name: cell(columns.name).to_string(),
            material_type: optional_cell(columns.material_type),
            unit: optional_cell(columns.unit),
            unit_price,
            labor_rate,
        });
    }

    debug!("{}: loaded {} pricing items", source, items.len());
    Ok(items)
}
