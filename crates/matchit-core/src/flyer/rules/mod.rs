//! Rule-based field extractors for flyer analysis text.

pub mod patterns;
pub mod fields;
pub mod price;
pub mod size;
pub mod description;
pub mod products;

pub use fields::{extract_store_fields, StoreFields};
pub use price::{extract_price, numeric_price, parse_price_number, Price, PriceExtractor};
pub use size::{extract_size, SizeExtractor};
pub use description::clean_description;
pub use products::{extract_line_items, extract_product_fields, scan_loose_lines, LineItem, ProductFields};

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// One named step of an ordered fallback chain.
#[derive(Debug)]
pub struct Rule {
    /// Short identifier, reported with every match.
    pub name: &'static str,
    /// Pattern whose first capture group holds the value.
    pub pattern: Regex,
}

/// A value found by a [`Rule`], with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Full text matched by the rule.
    pub source: String,
    /// Byte span of `source` in the searched text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value,
            rule,
            source: source.into(),
            position: (start, end),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            source: self.source,
            position: self.position,
        }
    }
}

/// Try each rule in order; the first one that matches wins.
///
/// The value is capture group 1 when the rule has one, otherwise the whole match.
pub fn first_match(rules: &[Rule], text: &str) -> Option<ExtractionMatch<String>> {
    rules.iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        let full = caps.get(0)?;
        let value = caps.get(1).unwrap_or(full).as_str().trim().to_string();
        Some(ExtractionMatch::new(value, rule.name, full.as_str(), full.start(), full.end()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_rule_order() {
        let rules = vec![
            Rule { name: "word", pattern: Regex::new(r"(zzz)").unwrap() },
            Rule { name: "digits", pattern: Regex::new(r"(\d+)").unwrap() },
            Rule { name: "letters", pattern: Regex::new(r"([a-z]+)").unwrap() },
        ];

        let found = first_match(&rules, "abc 123").unwrap();
        assert_eq!(found.rule, "digits");
        assert_eq!(found.value, "123");
        assert_eq!(found.position, (4, 7));
    }

    #[test]
    fn test_first_match_none() {
        let rules = vec![Rule { name: "digits", pattern: Regex::new(r"(\d+)").unwrap() }];
        assert!(first_match(&rules, "no numbers here").is_none());
    }
}
