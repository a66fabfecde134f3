//! Cross-flyer aggregation into store, product and comparison tables.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::flyer::rules::numeric_price;
use crate::models::flyer::FlyerRecord;
use crate::models::tables::{AggregatedTables, ComparisonRow, ProductRow, StoreRow};

/// Build all three tables from the flyer collection.
///
/// Output is a pure function of `records` and their order.
pub fn aggregate(records: &[FlyerRecord]) -> AggregatedTables {
    let stores = store_rows(records);
    let products = product_rows(records);
    let comparisons = comparison_rows(&products);

    debug!(
        "Aggregated {} stores, {} products, {} comparison rows",
        stores.len(),
        products.len(),
        comparisons.len()
    );

    AggregatedTables {
        stores,
        products,
        comparisons,
    }
}

/// One row per flyer.
pub fn store_rows(records: &[FlyerRecord]) -> Vec<StoreRow> {
    records
        .iter()
        .map(|record| StoreRow {
            store_name: record.display_store_name().to_string(),
            slogan: record.slogan.clone().unwrap_or_default(),
            address: record.address.clone().unwrap_or_default(),
            website: record.website.clone().unwrap_or_default(),
            phone: record.phone.clone().unwrap_or_default(),
            flyer_source: record.source_id.clone(),
            products_count: record.products.len(),
        })
        .collect()
}

/// Every product of every flyer, numbered from 1 in flattening order.
///
/// The numeric price is re-derived from the price text.
pub fn product_rows(records: &[FlyerRecord]) -> Vec<ProductRow> {
    records
        .iter()
        .flat_map(|record| {
            let store_name = record.display_store_name();
            record.products.iter().map(move |product| (record, store_name, product))
        })
        .enumerate()
        .map(|(index, (record, store_name, product))| ProductRow {
            product_id: index + 1,
            product_name: product.name.clone(),
            store_name: store_name.to_string(),
            price_text: product.price_text.clone(),
            price_numeric: numeric_price(&product.price_text),
            size_weight: product.size_weight.clone(),
            description: product.description.clone(),
            flyer_source: record.source_id.clone(),
        })
        .collect()
}

/// Grouping key: first whitespace token of the lowercased, trimmed name.
pub fn group_key(name: &str) -> Option<String> {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// Priced products in groups that at least two stores sell.
///
/// Groups are emitted in first-seen order, rows in product order.
pub fn comparison_rows(products: &[ProductRow]) -> Vec<ComparisonRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&ProductRow>> = HashMap::new();

    for product in products {
        let Some(key) = group_key(&product.product_name) else {
            continue;
        };
        groups
            .entry(key)
            .or_insert_with_key(|key| {
                order.push(key.clone());
                Vec::new()
            })
            .push(product);
    }

    let mut rows = Vec::new();
    for key in &order {
        let members = &groups[key];
        if members.len() < 2 {
            continue;
        }

        let stores: HashSet<&str> = members.iter().map(|p| p.store_name.as_str()).collect();
        if stores.len() < 2 {
            continue;
        }

        let product_group = title_case(key);
        rows.extend(
            members
                .iter()
                .filter(|p| p.price_numeric > Decimal::ZERO)
                .map(|p| ComparisonRow {
                    product_group: product_group.clone(),
                    product_name: p.product_name.clone(),
                    store_name: p.store_name.clone(),
                    price: p.price_numeric,
                    size_weight: p.size_weight.clone(),
                    stores_selling: stores.len(),
                }),
        );
    }

    rows
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
