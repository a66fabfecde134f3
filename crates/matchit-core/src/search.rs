//! Product search across stores.
//!
//! A query is a comma-separated list of terms. Every term is matched on its
//! own against product names (case-insensitive substring), so a product can
//! show up under several terms.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::flyer::rules::numeric_price;
use crate::models::tables::ProductRow;

/// A product matching a search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub product_name: String,
    pub store_name: String,
    pub price_text: String,
    pub price_numeric: Decimal,
    pub size_weight: String,
}

/// Cheapest and most expensive priced hits for a term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSpread {
    pub cheapest: SearchHit,
    pub most_expensive: SearchHit,
    /// `most_expensive - cheapest`.
    pub savings: Decimal,
}

/// Results for one search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermResult {
    pub term: String,
    /// Every product whose name contains the term.
    pub matches: Vec<SearchHit>,
    /// Matches with a price above zero.
    pub priced: Vec<SearchHit>,
    /// Present when at least two matches are priced.
    pub spread: Option<PriceSpread>,
}

impl TermResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Split a query into trimmed, non-empty terms.
pub fn split_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search the products table; one result per term, in query order.
pub fn search(products: &[ProductRow], query: &str) -> Vec<TermResult> {
    split_terms(query)
        .into_iter()
        .map(|term| search_term(products, &term))
        .collect()
}

/// Search the products table for a single term.
pub fn search_term(products: &[ProductRow], term: &str) -> TermResult {
    let needle = term.to_lowercase();

    let matches: Vec<SearchHit> = products
        .iter()
        .filter(|p| p.product_name.to_lowercase().contains(&needle))
        .map(|p| SearchHit {
            product_name: p.product_name.clone(),
            store_name: p.store_name.clone(),
            price_text: p.price_text.clone(),
            price_numeric: numeric_price(&p.price_text),
            size_weight: p.size_weight.clone(),
        })
        .collect();

    let priced: Vec<SearchHit> = matches
        .iter()
        .filter(|hit| hit.price_numeric > Decimal::ZERO)
        .cloned()
        .collect();

    let spread = price_spread(&priced);

    TermResult {
        term: term.to_string(),
        matches,
        priced,
        spread,
    }
}

/// Min and max by price; on ties the earliest hit wins for both.
fn price_spread(priced: &[SearchHit]) -> Option<PriceSpread> {
    if priced.len() < 2 {
        return None;
    }

    let mut cheapest = &priced[0];
    let mut most_expensive = &priced[0];
    for hit in &priced[1..] {
        if hit.price_numeric < cheapest.price_numeric {
            cheapest = hit;
        }
        if hit.price_numeric > most_expensive.price_numeric {
            most_expensive = hit;
        }
    }

    Some(PriceSpread {
        savings: most_expensive.price_numeric - cheapest.price_numeric,
        cheapest: cheapest.clone(),
        most_expensive: most_expensive.clone(),
    })
}

/// Up to `limit` distinct lowercase product names, first-seen order.
pub fn available_product_names(products: &[ProductRow], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.product_name.to_lowercase())
        .filter(|name| seen.insert(name.clone()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flyer::PRICE_NOT_FOUND;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(id: usize, name: &str, store: &str, price_text: &str) -> ProductRow {
        ProductRow {
            product_id: id,
            product_name: name.to_string(),
            store_name: store.to_string(),
            price_text: price_text.to_string(),
            price_numeric: Decimal::ZERO,
            size_weight: String::new(),
            description: String::new(),
            flyer_source: format!("{}.png", store),
        }
    }

    fn catalog() -> Vec<ProductRow> {
        vec![
            row(1, "Whole Milk", "A", "$3.49"),
            row(2, "Milk Bread", "B", "$2.99"),
            row(3, "Sourdough Bread", "C", "$4.29"),
            row(4, "Chocolate Milk", "C", PRICE_NOT_FOUND),
            row(5, "Skim milk", "D", "$3.49"),
        ]
    }

    #[test]
    fn test_terms_processed_independently() {
        let results = search(&catalog(), "milk, bread");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].term, "milk");
        assert_eq!(results[1].term, "bread");

        // "Milk Bread" is reported under both terms
        assert!(results[0].matches.iter().any(|h| h.product_name == "Milk Bread"));
        assert!(results[1].matches.iter().any(|h| h.product_name == "Milk Bread"));
        assert_eq!(results[0].matches.len(), 4);
        assert_eq!(results[1].matches.len(), 2);
    }

    #[test]
    fn test_priced_matches_and_spread() {
        let result = search_term(&catalog(), "MILK");

        assert_eq!(result.priced.len(), 3);
        let spread = result.spread.unwrap();
        assert_eq!(spread.cheapest.product_name, "Milk Bread");
        // Tie at $3.49: the first seen is kept
        assert_eq!(spread.most_expensive.product_name, "Whole Milk");
        assert_eq!(spread.savings, dec("0.50"));
    }

    #[test]
    fn test_spread_needs_two_priced() {
        let products = vec![row(1, "Tea", "A", "$5"), row(2, "Iced Tea", "B", PRICE_NOT_FOUND)];
        let result = search_term(&products, "tea");

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.priced.len(), 1);
        assert!(result.spread.is_none());
    }

    #[test]
    fn test_price_rederived_from_text() {
        let result = search_term(&catalog(), "sourdough");
        assert_eq!(result.matches[0].price_numeric, dec("4.29"));
    }

    #[test]
    fn test_empty_query() {
        assert!(search(&catalog(), "").is_empty());
        assert!(search(&catalog(), " , ,  ").is_empty());
    }

    #[test]
    fn test_no_results() {
        let results = search(&catalog(), "caviar");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
        assert!(results[0].spread.is_none());
    }

    #[test]
    fn test_split_terms() {
        assert_eq!(split_terms(" eggs ,, cheddar cheese,"), vec!["eggs", "cheddar cheese"]);
    }

    #[test]
    fn test_available_product_names() {
        let mut products = catalog();
        products.push(row(6, "WHOLE MILK", "E", "$3"));

        let names = available_product_names(&products, 3);
        assert_eq!(names, vec!["whole milk", "milk bread", "sourdough bread"]);
        assert_eq!(available_product_names(&products, 100).len(), 5);
    }
}
