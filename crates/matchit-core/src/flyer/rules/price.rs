//! Price extraction for product details.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::flyer::PRICE_NOT_FOUND;

use super::patterns::{BARE_NUMBER, PRICE_RULES};
use super::{first_match, ExtractionMatch, FieldExtractor};

/// A detected price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    /// Display form, always `$<number>`.
    pub text: String,
    /// Numeric value; zero if the number could not be represented.
    pub amount: Decimal,
}

impl Price {
    fn from_digits(digits: &str) -> Self {
        Self {
            text: format!("${}", digits),
            amount: parse_price_number(digits).unwrap_or(Decimal::ZERO),
        }
    }
}

/// Price field extractor.
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<Price>;

    /// Labeled forms are tried first (`$4.99`, `4.99 dollars`, `4.99 each`,
    /// `4.99$`); failing those, the first bare number in the text is used.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&PRICE_RULES, text)
            .or_else(|| {
                let m = BARE_NUMBER.find(text)?;
                Some(ExtractionMatch::new(
                    m.as_str().to_string(),
                    "bare_number",
                    m.as_str(),
                    m.start(),
                    m.end(),
                ))
            })
            .map(|found| found.map(|digits| Price::from_digits(&digits)))
    }
}

/// Extract the price from product details.
pub fn extract_price(details: &str) -> Option<ExtractionMatch<Price>> {
    PriceExtractor::new().extract(details)
}

/// Parse the digits captured for a price (`4.99`, `4.`, `12`).
///
/// Numbers too long for a `Decimal` go through `f64` and saturate at
/// `Decimal::MAX`.
pub fn parse_price_number(s: &str) -> Option<Decimal> {
    let digits = s.trim().trim_end_matches('.');
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(digits).ok().or_else(|| {
        let value: f64 = digits.parse().ok()?;
        Some(Decimal::from_f64(value).unwrap_or(Decimal::MAX))
    })
}

/// Best-effort numeric value of a price text: its first bare number, or zero.
pub fn numeric_price(price_text: &str) -> Decimal {
    if price_text.is_empty() || price_text == PRICE_NOT_FOUND {
        return Decimal::ZERO;
    }

    BARE_NUMBER
        .find(price_text)
        .and_then(|m| parse_price_number(m.as_str()))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_dollar_sign_price() {
        let found = extract_price("Large carton $4.99 while supplies last").unwrap();
        assert_eq!(found.rule, "dollar_sign");
        assert_eq!(found.value.text, "$4.99");
        assert_eq!(found.value.amount, dec("4.99"));
        assert_eq!(found.source, "$4.99");
    }

    #[test]
    fn test_price_rule_order() {
        assert_eq!(extract_price("only 3 dollars").unwrap().rule, "dollars_word");
        assert_eq!(extract_price("2.50 each").unwrap().value.text, "$2.50");
        assert_eq!(extract_price("7$ today").unwrap().rule, "trailing_symbol");
        // A dollar sign anywhere beats an earlier labeled number
        assert_eq!(extract_price("5 bucks or $6").unwrap().value.text, "$6");
    }

    #[test]
    fn test_bare_number_fallback() {
        let found = extract_price("Family size 3 loaves").unwrap();
        assert_eq!(found.rule, "bare_number");
        assert_eq!(found.value.text, "$3");
        assert_eq!(found.value.amount, dec("3"));
    }

    #[test]
    fn test_no_digits_no_price() {
        assert!(extract_price("Fresh and crunchy").is_none());
    }

    #[test]
    fn test_trailing_dot() {
        let found = extract_price("now $4. only").unwrap();
        assert_eq!(found.value.text, "$4.");
        assert_eq!(found.value.amount, dec("4"));
    }

    #[test]
    fn test_numeric_price() {
        assert_eq!(numeric_price("$2.99"), dec("2.99"));
        assert_eq!(numeric_price(PRICE_NOT_FOUND), Decimal::ZERO);
        assert_eq!(numeric_price(""), Decimal::ZERO);
        assert_eq!(numeric_price("2 for $5"), dec("2"));
    }

    #[test]
    fn test_oversized_price_saturates() {
        let digits = "123456789012345678901234567890";
        assert_eq!(parse_price_number(digits), Some(Decimal::MAX));

        let found = extract_price(&format!("Yacht ${}", digits)).unwrap();
        assert_eq!(found.value.text, format!("${}", digits));
        assert_eq!(found.value.amount, Decimal::MAX);
        assert_eq!(numeric_price(&found.value.text), Decimal::MAX);
    }
}
