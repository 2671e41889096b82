//! # BoltBid CLI Application
//!
//! Terminal front end for the bid engine. Loads a pricing catalog (CSV path
//! as the first argument, or a built-in sample catalog), prompts for the
//! building geometry, and prints the priced bid with the full markup chain
//! plus a JSON rendition for downstream tooling.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use bid_core::calculator::BidCalculator;
use bid_core::catalog::{load_catalog_csv, PriceItem};
use bid_core::compliance::{BuildingSpec, ComplianceCode};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Built-in catalog for running the demo without a pricing sheet.
fn sample_catalog() -> Vec<PriceItem> {
    let item = |code: &str, name: &str, material: Option<&str>, unit: &str, price, labor| PriceItem {
        code: code.to_string(),
        name: name.to_string(),
        material_type: material.map(String::from),
        unit: Some(unit.to_string()),
        unit_price: price,
        labor_rate: labor,
    };

    vec![
        item("AT-001", "Air Terminal - Copper", Some("Copper"), "ea", 45.00, Some(15.00)),
        item("COND-100", "Conductor Cable - Copper 4/0 AWG", Some("Copper"), "ft", 3.50, Some(2.00)),
        item("GR-10", "Ground Rod - 10ft Copper", Some("Copper"), "ea", 65.00, Some(50.00)),
        item("CLAMP-01", "Cable Clamp", None, "ea", 8.00, Some(5.00)),
        item("BOND-6", "Bonding Wire #6 AWG", Some("Copper"), "ft", 2.00, Some(1.50)),
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    println!("BoltBid - Lightning Protection Bid Generator");
    println!("============================================");
    println!();

    let catalog = match std::env::args().nth(1) {
        Some(path) => {
            let catalog = load_catalog_csv(Path::new(&path))
                .with_context(|| format!("failed to load pricing sheet '{}'", path))?;
            println!("Loaded {} pricing items from {}", catalog.len(), path);
            catalog
        }
        None => {
            let catalog = sample_catalog();
            println!("No pricing sheet given - using {} sample items", catalog.len());
            catalog
        }
    };
    println!();

    let height_ft = prompt_f64("Building height (ft) [35.0]: ", 35.0);
    let roof_area_sqft = prompt_f64("Roof area (sqft) [5000.0]: ", 5000.0);
    let perimeter_ft = prompt_f64("Roof perimeter (ft) [280.0]: ", 280.0);
    let code: ComplianceCode = prompt_str("Compliance code (UL 96A / NFPA 780) [UL 96A]: ", "UL 96A")
        .parse()
        .context("unrecognized compliance code")?;

    let building = BuildingSpec {
        project_name: prompt_str("Project name [Sample Office Building]: ", "Sample Office Building"),
        building_height_ft: Some(height_ft),
        roof_area_sqft: Some(roof_area_sqft),
        perimeter_ft: Some(perimeter_ft),
        ..Default::default()
    };

    println!();
    println!("Calculating bid under {}...", code);
    println!();

    let calculator = BidCalculator::new(catalog, code);
    let bid = calculator.calculate_bid(&building)?;

    println!("═══════════════════════════════════════════════");
    println!("  BID: {}", bid.project_name);
    println!("═══════════════════════════════════════════════");
    for section in &bid.sections {
        println!();
        println!("{}", section.name);
        for line in &section.line_items {
            println!(
                "  {:8.1} x {:<34} ${:>10.2} mat  ${:>10.2} labor",
                line.quantity, line.price_item.name, line.material_cost, line.labor_cost
            );
        }
        println!("  Section total: ${:.2}", section.section_total());
    }
    println!();
    println!("───────────────────────────────────────────────");
    println!("  Material subtotal:  ${:>12.2}", bid.subtotal_material());
    println!("  Labor subtotal:     ${:>12.2}", bid.subtotal_labor());
    println!("  Subtotal:           ${:>12.2}", bid.subtotal());
    println!(
        "  With markup:        ${:>12.2}  ({}% mat / {}% labor)",
        bid.total_with_markup(),
        bid.material_markup_pct,
        bid.labor_markup_pct
    );
    println!(
        "  FINAL BID:          ${:>12.2}  (+{}% overhead, +{}% profit)",
        bid.final_bid_amount(),
        bid.overhead_pct,
        bid.profit_pct
    );
    println!("═══════════════════════════════════════════════");

    println!();
    println!("JSON Output (for export tooling):");
    println!("{}", serde_json::to_string_pretty(&bid)?);

    Ok(())
}
