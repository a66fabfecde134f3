//! Tabular views derived from the flyer collection.
//!
//! Column names follow the exported sheet headers.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three views handed to export and display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTables {
    pub stores: Vec<StoreRow>,
    pub products: Vec<ProductRow>,
    pub comparisons: Vec<ComparisonRow>,
}

impl AggregatedTables {
    /// True when no flyer contributed any row.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Headline figures for each table.
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            stores: StoreSummary::from_rows(&self.stores),
            products: ProductSummary::from_rows(&self.products),
            comparisons: ComparisonSummary::from_rows(&self.comparisons),
        }
    }
}

/// Summary figures over the three tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSummary {
    pub stores: StoreSummary,
    pub products: ProductSummary,
    pub comparisons: ComparisonSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub total: usize,
    pub with_address: usize,
    pub with_website: usize,
}

impl StoreSummary {
    fn from_rows(rows: &[StoreRow]) -> Self {
        Self {
            total: rows.len(),
            with_address: rows.iter().filter(|r| !r.address.is_empty()).count(),
            with_website: rows.iter().filter(|r| !r.website.is_empty()).count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductSummary {
    pub total: usize,
    /// Products with a price above zero.
    pub with_prices: usize,
    /// Mean over priced products; `None` when nothing is priced.
    pub average_price: Option<Decimal>,
    pub unique_stores: usize,
}

impl ProductSummary {
    fn from_rows(rows: &[ProductRow]) -> Self {
        let priced: Vec<Decimal> = rows
            .iter()
            .map(|r| r.price_numeric)
            .filter(|price| *price > Decimal::ZERO)
            .collect();

        Self {
            total: rows.len(),
            with_prices: priced.len(),
            average_price: mean(&priced),
            unique_stores: rows
                .iter()
                .map(|r| r.store_name.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub rows: usize,
    pub groups: usize,
    /// Mean over groups of `max - min` price; `None` without rows.
    pub average_savings: Option<Decimal>,
}

impl ComparisonSummary {
    fn from_rows(rows: &[ComparisonRow]) -> Self {
        let mut ranges: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
        for row in rows {
            ranges
                .entry(row.product_group.as_str())
                .and_modify(|(min, max)| {
                    *min = (*min).min(row.price);
                    *max = (*max).max(row.price);
                })
                .or_insert((row.price, row.price));
        }

        let savings: Vec<Decimal> = ranges.values().map(|(min, max)| *max - *min).collect();

        Self {
            rows: rows.len(),
            groups: ranges.len(),
            average_savings: mean(&savings),
        }
    }
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().copied().sum();
    total.checked_div(Decimal::from(values.len()))
}

/// One row per analyzed flyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRow {
    #[serde(rename = "Store_Name")]
    pub store_name: String,
    #[serde(rename = "Slogan")]
    pub slogan: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Flyer_Source")]
    pub flyer_source: String,
    #[serde(rename = "Products_Count")]
    pub products_count: usize,
}

/// One row per product across all flyers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    /// 1-based position in flattening order.
    #[serde(rename = "Product_ID")]
    pub product_id: usize,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Store_Name")]
    pub store_name: String,
    #[serde(rename = "Price_Text")]
    pub price_text: String,
    #[serde(rename = "Price_Numeric")]
    pub price_numeric: Decimal,
    #[serde(rename = "Size_Weight")]
    pub size_weight: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Flyer_Source")]
    pub flyer_source: String,
}

/// A priced product in a group sold by more than one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Product_Group")]
    pub product_group: String,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Store_Name")]
    pub store_name: String,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "Size_Weight")]
    pub size_weight: String,
    /// Distinct stores in the product's group.
    #[serde(rename = "Stores_Selling")]
    pub stores_selling: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn store(name: &str, address: &str, website: &str) -> StoreRow {
        StoreRow {
            store_name: name.to_string(),
            slogan: String::new(),
            address: address.to_string(),
            website: website.to_string(),
            phone: String::new(),
            flyer_source: format!("{}.png", name),
            products_count: 0,
        }
    }

    fn product(id: usize, store: &str, price: &str) -> ProductRow {
        ProductRow {
            product_id: id,
            product_name: format!("Item {}", id),
            store_name: store.to_string(),
            price_text: format!("${}", price),
            price_numeric: dec(price),
            size_weight: String::new(),
            description: String::new(),
            flyer_source: format!("{}.png", store),
        }
    }

    fn comparison(group: &str, store: &str, price: &str) -> ComparisonRow {
        ComparisonRow {
            product_group: group.to_string(),
            product_name: group.to_string(),
            store_name: store.to_string(),
            price: dec(price),
            size_weight: String::new(),
            stores_selling: 2,
        }
    }

    #[test]
    fn test_summary() {
        let tables = AggregatedTables {
            stores: vec![store("Acme", "1 Main St", ""), store("Best", "", "best.example")],
            products: vec![
                product(1, "Acme", "2.00"),
                product(2, "Acme", "0"),
                product(3, "Best", "4.00"),
            ],
            comparisons: vec![
                comparison("Milk", "Acme", "2.00"),
                comparison("Milk", "Best", "3.50"),
                comparison("Milk", "Best", "3.00"),
                comparison("Eggs", "Acme", "4.00"),
                comparison("Eggs", "Best", "4.50"),
            ],
        };

        assert_eq!(
            tables.summary(),
            TableSummary {
                stores: StoreSummary {
                    total: 2,
                    with_address: 1,
                    with_website: 1,
                },
                products: ProductSummary {
                    total: 3,
                    with_prices: 2,
                    average_price: Some(dec("3.00")),
                    unique_stores: 2,
                },
                comparisons: ComparisonSummary {
                    rows: 5,
                    groups: 2,
                    average_savings: Some(dec("1.00")),
                },
            }
        );
    }

    #[test]
    fn test_summary_without_priced_rows() {
        let tables = AggregatedTables {
            stores: vec![store("Acme", "", "")],
            products: vec![product(1, "Acme", "0")],
            comparisons: Vec::new(),
        };
        let summary = tables.summary();

        assert_eq!(summary.products.with_prices, 0);
        assert_eq!(summary.products.average_price, None);
        assert_eq!(summary.comparisons.groups, 0);
        assert_eq!(summary.comparisons.average_savings, None);
        assert_eq!(AggregatedTables::default().summary(), TableSummary::default());
    }
}
