//! Output files: parsed flyers as JSON and one CSV per table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use matchit_core::models::flyer::save_records;
use matchit_core::{AggregatedTables, FlyerRecord};

pub const FLYERS_FILE: &str = "flyers.json";
pub const STORES_FILE: &str = "stores.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const COMPARISONS_FILE: &str = "price_comparisons.csv";

const STORE_HEADERS: &[&str] = &[
    "Store_Name",
    "Slogan",
    "Address",
    "Website",
    "Phone",
    "Flyer_Source",
    "Products_Count",
];

const PRODUCT_HEADERS: &[&str] = &[
    "Product_ID",
    "Product_Name",
    "Store_Name",
    "Price_Text",
    "Price_Numeric",
    "Size_Weight",
    "Description",
    "Flyer_Source",
];

const COMPARISON_HEADERS: &[&str] = &[
    "Product_Group",
    "Product_Name",
    "Store_Name",
    "Price",
    "Size_Weight",
    "Stores_Selling",
];

/// Write the flyer collection and its tables into `output_dir`.
///
/// Returns the written paths in write order.
pub fn write_outputs(
    output_dir: &Path,
    records: &[FlyerRecord],
    tables: &AggregatedTables,
    pretty_json: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let flyers_path = output_dir.join(FLYERS_FILE);
    save_records(&flyers_path, records, pretty_json)?;

    let stores_path = output_dir.join(STORES_FILE);
    write_table(&stores_path, &tables.stores, STORE_HEADERS)?;

    let products_path = output_dir.join(PRODUCTS_FILE);
    write_table(&products_path, &tables.products, PRODUCT_HEADERS)?;

    let comparisons_path = output_dir.join(COMPARISONS_FILE);
    write_table(&comparisons_path, &tables.comparisons, COMPARISON_HEADERS)?;

    Ok(vec![flyers_path, stores_path, products_path, comparisons_path])
}

/// Serialize rows as CSV; an empty table still gets its header line.
fn write_table<T: Serialize>(path: &Path, rows: &[T], headers: &[&str]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        wtr.write_record(headers)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchit_core::Session;

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session.analyze_texts(vec![(
            "acme.txt",
            "**Store Name:** Acme\n**Featured Products & Prices:**\n* **Eggs:** 12 count for $3.49\n",
        )]);
        let tables = session.tables().unwrap();

        let paths = write_outputs(dir.path(), session.records(), &tables, true).unwrap();
        assert_eq!(paths.len(), 4);

        let products = fs::read_to_string(dir.path().join(PRODUCTS_FILE)).unwrap();
        let mut lines = products.lines();
        assert_eq!(lines.next(), Some(PRODUCT_HEADERS.join(",").as_str()));
        assert!(lines.next().unwrap().starts_with("1,Eggs,Acme,$3.49,3.49,12 count"));

        // A single store yields no comparisons, just the header
        let comparisons = fs::read_to_string(dir.path().join(COMPARISONS_FILE)).unwrap();
        assert_eq!(comparisons.trim_end(), COMPARISON_HEADERS.join(","));
    }
}
