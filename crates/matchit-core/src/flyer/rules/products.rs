//! Product lines: locating them and turning each into a record.

use rust_decimal::Decimal;

use crate::models::flyer::{ProductRecord, PRICE_NOT_FOUND};

use super::description::clean_description;
use super::patterns::{HEADER_KEYWORDS, LINE_ITEM_RULES, LOOSE_PRICE, LOOSE_PRODUCT_LINE, LOOSE_SPLIT};
use super::price::{extract_price, parse_price_number, Price};
use super::size::extract_size;
use super::ExtractionMatch;

/// A raw `(name, details)` pair found in the products section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub details: String,
}

/// Find product lines using the first line shape that matches at all.
///
/// Returns the rule name with every pair it matched; pairs are not merged
/// across shapes.
pub fn extract_line_items(section: &str) -> Option<(&'static str, Vec<LineItem>)> {
    LINE_ITEM_RULES.iter().find_map(|rule| {
        let items: Vec<LineItem> = rule
            .pattern
            .captures_iter(section)
            .map(|caps| LineItem {
                name: caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                details: caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            })
            .collect();

        (!items.is_empty()).then_some((rule.name, items))
    })
}

/// Fields pulled out of one product's details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub price: Option<ExtractionMatch<Price>>,
    pub size: Option<ExtractionMatch<String>>,
    pub description: String,
}

impl ProductFields {
    /// `$<number>` or the not-found sentinel.
    pub fn price_text(&self) -> String {
        self.price
            .as_ref()
            .map(|p| p.value.text.clone())
            .unwrap_or_else(|| PRICE_NOT_FOUND.to_string())
    }

    pub fn price_numeric(&self) -> Decimal {
        self.price
            .as_ref()
            .map(|p| p.value.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn size_weight(&self) -> String {
        self.size.as_ref().map(|s| s.value.clone()).unwrap_or_default()
    }

    /// Build the product record for `name`.
    pub fn into_record(self, name: impl Into<String>) -> ProductRecord {
        ProductRecord {
            name: name.into(),
            price_text: self.price_text(),
            price_numeric: self.price_numeric(),
            size_weight: self.size_weight(),
            description: self.description,
        }
    }
}

/// Extract price, size and description from a product's details.
///
/// Never fails: anything not found is simply absent.
pub fn extract_product_fields(details: &str, name: &str) -> ProductFields {
    let price = extract_price(details);
    let size = extract_size(details, name);
    let description = clean_description(
        details,
        price.as_ref(),
        size.as_ref().map(|s| s.value.as_str()),
    );

    ProductFields {
        price,
        size,
        description,
    }
}

/// Recover products from free text with no usable products section.
///
/// Each line holding a word followed by a number becomes a product named by
/// the text before its first digit or `$`. Header lines are skipped.
pub fn scan_loose_lines(text: &str, min_name_len: usize) -> Vec<ProductRecord> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            !HEADER_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .filter(|line| LOOSE_PRODUCT_LINE.is_match(line))
        .filter_map(|line| {
            let head = match LOOSE_SPLIT.find(line) {
                Some(m) => &line[..m.start()],
                None => line,
            };
            let name = head.trim_matches(|c: char| c == ' ' || c == '-' || c == '*');
            if name.chars().count() < min_name_len {
                return None;
            }

            let (price_text, price_numeric) = match LOOSE_PRICE.captures(line).and_then(|c| c.get(1)) {
                Some(digits) => (
                    format!("${}", digits.as_str()),
                    parse_price_number(digits.as_str()).unwrap_or(Decimal::ZERO),
                ),
                None => (PRICE_NOT_FOUND.to_string(), Decimal::ZERO),
            };

            Some(ProductRecord {
                name: name.to_string(),
                price_text,
                price_numeric,
                size_weight: String::new(),
                description: line.trim().to_string(),
            })
        })
        .collect()
}
