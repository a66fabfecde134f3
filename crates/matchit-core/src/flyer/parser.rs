//! Rule-based parser turning flyer analysis text into a [`FlyerRecord`].

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::flyer::{FlyerRecord, ProductRecord};

use super::rules::{
    extract_line_items, extract_product_fields, extract_store_fields, scan_loose_lines,
    patterns::PRODUCTS_SECTION,
};

/// Result of parsing one flyer analysis.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Extracted flyer data.
    pub record: FlyerRecord,
    /// Fields or sections that could not be extracted.
    pub warnings: Vec<String>,
    /// Rule that produced the products, if any did.
    pub product_rule: Option<&'static str>,
}

/// Trait for flyer parsing.
pub trait FlyerParser {
    /// Parse a flyer from analysis text. Never fails; missing data is reported as warnings.
    fn parse(&self, text: &str, source_id: &str) -> ParseResult;
}

/// Parser driven by ordered pattern rules.
#[derive(Debug, Clone)]
pub struct RuleFlyerParser {
    /// Minimum trimmed length of a structured product name.
    min_name_len: usize,
    /// Minimum length of a name recovered from a loose line.
    fallback_min_name_len: usize,
    /// Whether to scan loose lines when the products section yields nothing.
    line_fallback: bool,
}

impl RuleFlyerParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_name_len: config.min_name_len,
            fallback_min_name_len: config.fallback_min_name_len,
            line_fallback: config.line_fallback,
        }
    }

    /// Set minimum product name length.
    pub fn with_min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len;
        self
    }

    /// Set minimum loose-line product name length.
    pub fn with_fallback_min_name_len(mut self, len: usize) -> Self {
        self.fallback_min_name_len = len;
        self
    }

    /// Enable or disable the loose-line scan.
    pub fn with_line_fallback(mut self, enabled: bool) -> Self {
        self.line_fallback = enabled;
        self
    }

    fn products_section<'t>(&self, text: &'t str) -> Option<&'t str> {
        PRODUCTS_SECTION
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn structured_products(&self, section: &str) -> Option<(&'static str, Vec<ProductRecord>)> {
        let (rule, items) = extract_line_items(section)?;
        debug!("Matched {} product lines with rule {}", items.len(), rule);

        let products = items
            .into_iter()
            .filter(|item| {
                item.name.trim().chars().count() >= self.min_name_len && !item.details.is_empty()
            })
            .map(|item| {
                let name = item.name.trim();
                extract_product_fields(&item.details, name).into_record(name)
            })
            .collect();

        Some((rule, products))
    }
}

impl Default for RuleFlyerParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyerParser for RuleFlyerParser {
    fn parse(&self, text: &str, source_id: &str) -> ParseResult {
        let mut warnings = Vec::new();

        info!("Parsing flyer {} from {} characters of text", source_id, text.len());

        let fields = extract_store_fields(text);
        if fields.store_name.is_none() {
            warnings.push("Could not extract store name".to_string());
        }

        let mut product_rule = None;
        let mut products = Vec::new();

        match self.products_section(text) {
            Some(section) => {
                if let Some((rule, found)) = self.structured_products(section) {
                    if !found.is_empty() {
                        product_rule = Some(rule);
                        products = found;
                    }
                }
            }
            None => warnings.push("Could not find products section".to_string()),
        }

        if products.is_empty() && self.line_fallback {
            products = scan_loose_lines(text, self.fallback_min_name_len);
            if !products.is_empty() {
                product_rule = Some("loose_lines");
                warnings.push(format!(
                    "Recovered {} products from unstructured lines",
                    products.len()
                ));
            }
        }

        if products.is_empty() {
            warnings.push("Could not extract any products".to_string());
        }

        debug!(
            "Extracted {} products from {} ({} warnings)",
            products.len(),
            source_id,
            warnings.len()
        );

        ParseResult {
            record: FlyerRecord {
                source_id: source_id.to_string(),
                store_name: fields.store_name,
                slogan: fields.slogan,
                address: fields.address,
                website: fields.website,
                phone: fields.phone,
                products,
            },
            warnings,
            product_rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flyer::PRICE_NOT_FOUND;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const FULL_ANALYSIS: &str = r#"**Store Name:** FreshMart

**Slogan/Motto:** Fresh every day

**Featured Products & Prices:**
* **Whole Milk:** 1 gal for $3.49 (Vitamin D)
* **Sourdough Bread:** 24 oz loaf for $4.29
* **Bananas:** Sweet and ripe, $0.59 per lb
* **Greek Yogurt 32 oz:** Plain, $5.99
* **X:** $1.00

**Contact Information:**
* **Address:** 12 Main St, Springfield
* **Website:** www.freshmart.example
* **Phone Number:** (555) 123-4567

**Overall Impression:**
Bright green layout with 4 large photos.
"#;

    #[test]
    fn test_parse_full_analysis() {
        let result = RuleFlyerParser::new().parse(FULL_ANALYSIS, "freshmart.png");
        let record = &result.record;

        assert_eq!(record.source_id, "freshmart.png");
        assert_eq!(record.store_name.as_deref(), Some("FreshMart"));
        assert_eq!(record.slogan.as_deref(), Some("Fresh every day"));
        assert_eq!(record.address.as_deref(), Some("12 Main St, Springfield"));
        assert_eq!(record.website.as_deref(), Some("www.freshmart.example"));
        assert_eq!(record.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(result.product_rule, Some("bold_name"));
        assert!(result.warnings.is_empty());

        // The single-character name is rejected
        let names: Vec<&str> = record.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Whole Milk", "Sourdough Bread", "Bananas", "Greek Yogurt 32 oz"]);

        let milk = &record.products[0];
        assert_eq!(milk.price_text, "$3.49");
        assert_eq!(milk.size_weight, "1 gal");
        assert_eq!(milk.description, "Vitamin D");

        // Size comes from the name when the details have none
        assert_eq!(record.products[3].size_weight, "32 oz");
        assert_eq!(record.products[3].description, "Plain");
    }

    #[test]
    fn test_parse_minimal_analysis() {
        let text = "**Store Name:** Acme\n**Featured Products & Prices:**\n* **Eggs:** 12 pack for $2.99\n";
        let record = RuleFlyerParser::new().parse(text, "acme.jpg").record;

        assert_eq!(record.store_name.as_deref(), Some("Acme"));
        assert_eq!(record.products.len(), 1);

        let eggs = &record.products[0];
        assert_eq!(eggs.name, "Eggs");
        assert_eq!(eggs.price_text, "$2.99");
        assert_eq!(eggs.price_numeric, Decimal::from_str("2.99").unwrap());
        assert_eq!(eggs.size_weight, "12 pack");
    }

    #[test]
    fn test_parse_empty_and_malformed_text() {
        let parser = RuleFlyerParser::new();

        for text in ["", "   \n\n", "**Store Name:**", "{\"unexpected\": true}"] {
            let result = parser.parse(text, "broken.png");
            assert_eq!(result.record, FlyerRecord::new("broken.png"));
            assert!(!result.warnings.is_empty());
        }
    }

    #[test]
    fn test_products_section_ends_at_next_section() {
        let text = "**Featured Products & Prices:**\n* **Rice:** 5 lb for $6\n**Overall Impression:**\n* **Layout:** 3 columns\n";
        let record = RuleFlyerParser::new().parse(text, "a.png").record;

        assert_eq!(record.products.len(), 1);
        assert_eq!(record.products[0].name, "Rice");
    }

    #[test]
    fn test_loose_line_fallback() {
        let text = "**Store Name:** Corner Shop\nHere is what we found:\nApples $1.29 per lb\nOrange juice 3.99\n";
        let result = RuleFlyerParser::new().parse(text, "corner.png");

        assert_eq!(result.product_rule, Some("loose_lines"));
        assert_eq!(result.record.store_name.as_deref(), Some("Corner Shop"));

        let products = &result.record.products;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Apples");
        assert_eq!(products[0].price_text, "$1.29");
        assert_eq!(products[1].name, "Orange juice");
        assert_eq!(products[1].price_text, "$3.99");
        assert_eq!(products[1].description, "Orange juice 3.99");
    }

    #[test]
    fn test_loose_line_fallback_disabled() {
        let text = "Apples $1.29 per lb\n";
        let result = RuleFlyerParser::new().with_line_fallback(false).parse(text, "a.png");
        assert!(result.record.products.is_empty());
    }

    #[test]
    fn test_name_length_thresholds() {
        let section = "**Featured Products & Prices:**\n* **Tea:** 20 bags $3\n* **Honey:** 12 oz $6\n";
        let record = RuleFlyerParser::new()
            .with_min_name_len(4)
            .parse(section, "a.png")
            .record;
        assert_eq!(record.products.len(), 1);
        assert_eq!(record.products[0].name, "Honey");

        let loose = "Figs $3.50\nOrange juice 3.99\n";
        let record = RuleFlyerParser::new()
            .with_fallback_min_name_len(5)
            .parse(loose, "b.png")
            .record;
        assert_eq!(record.products.len(), 1);
        assert_eq!(record.products[0].name, "Orange juice");
    }

    #[test]
    fn test_product_without_price() {
        let text = "**Featured Products & Prices:**\n* **Croissants:** Baked fresh daily\n";
        let record = RuleFlyerParser::new().parse(text, "bakery.png").record;

        assert_eq!(record.products[0].price_text, PRICE_NOT_FOUND);
        assert_eq!(record.products[0].price_numeric, Decimal::ZERO);
    }
}
