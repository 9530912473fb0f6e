//! Known-vendor categorization example

use reconciliation_core::{normalize_vendor_name, VendorMap};

fn main() {
    println!("🏷️  Reconciliation Core - Vendor Categorization Example\n");

    let mut vendors = VendorMap::with_defaults();
    println!("📚 Loaded {} known vendor patterns\n", vendors.len());

    // Categorize raw statement descriptions
    let descriptions = [
        "POS STARBUCKS STORE #1234",
        "SQ *BLUE BOTTLE COFFEE",
        "RECURRING ADOBE SYSTEMS INC 00998877",
        "DEBIT CARD UBER TRIP",
        "CHK 000482 NW TRADERS",
    ];

    for description in descriptions {
        println!("  \"{}\"", description);
        println!("    normalized: \"{}\"", normalize_vendor_name(description));
        match vendors.categorize(description) {
            Some(result) => println!(
                "    → {} / {} ({}% via \"{}\")",
                result.category, result.subcategory, result.confidence, result.matched_pattern
            ),
            None => println!("    → unknown vendor"),
        }
        println!();
    }

    // Extend the table with a custom merchant, per-instance
    vendors.insert_custom(
        "blue bottle",
        "Operating Expenses",
        "Meals and Entertainment",
        "Expense (Operating)",
        "Neighborhood coffee",
    );
    let result = vendors
        .categorize("SQ *BLUE BOTTLE COFFEE")
        .expect("custom vendor matches");
    println!(
        "➕ After adding a custom mapping: \"blue bottle\" → {} ({}%)",
        result.subcategory, result.confidence
    );
}
