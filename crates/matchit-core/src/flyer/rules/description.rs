//! Description cleanup once price and size have been pulled out.

use regex::Regex;

use super::patterns::{DESCRIPTION_FILLER, DOLLAR_AMOUNT, GENERIC_SIZE};
use super::price::Price;
use super::ExtractionMatch;

/// Strip the detected price and size from product details.
///
/// Every case-insensitive occurrence of `size` is removed first. The
/// `price` span (matched against `details`) goes next unless it falls
/// inside a size, followed by any other `$<number>` and size tokens.
/// Filler (`for`, parentheses, commas) is dropped and whitespace collapsed.
pub fn clean_description(
    details: &str,
    price: Option<&ExtractionMatch<Price>>,
    size: Option<&str>,
) -> String {
    let size = size.map(str::trim).filter(|s| !s.is_empty());

    let mut spans: Vec<(usize, usize)> = Vec::new();
    if let Some(size) = size {
        if let Ok(literal) = Regex::new(&format!("(?i){}", regex::escape(size))) {
            spans.extend(literal.find_iter(details).map(|m| (m.start(), m.end())));
        }
    }
    if let Some(price) = price {
        let (start, end) = price.position;
        let overlaps_size = spans.iter().any(|&(s, e)| start < e && s < end);
        if !overlaps_size && details.get(start..end) == Some(price.source.as_str()) {
            spans.push((start, end));
        }
    }
    spans.sort_unstable();

    let mut description = String::with_capacity(details.len());
    let mut last = 0;
    for (start, end) in spans {
        description.push_str(&details[last..start]);
        description.push(' ');
        last = end;
    }
    description.push_str(&details[last..]);

    if price.is_some() {
        description = DOLLAR_AMOUNT.replace_all(&description, " ").into_owned();
    }
    if size.is_some() {
        description = GENERIC_SIZE.replace_all(&description, " ").into_owned();
    }

    DESCRIPTION_FILLER
        .replace_all(&description, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::rules::price::extract_price;

    fn clean(details: &str, size: Option<&str>) -> String {
        let price = extract_price(details);
        clean_description(details, price.as_ref(), size)
    }

    #[test]
    fn test_price_and_size_removed() {
        let description = clean("Widget 12 oz for $3", Some("12 oz"));
        assert_eq!(description, "Widget");
        assert!(!description.contains("$3"));
        assert!(!description.contains("12 oz"));
    }

    #[test]
    fn test_filler_and_whitespace() {
        assert_eq!(
            clean("Large   eggs (dozen),  farm fresh $3.49", None),
            "Large eggs dozen farm fresh"
        );
    }

    #[test]
    fn test_size_removed_case_insensitive() {
        assert_eq!(clean("2 L Bottle of cola $1.99", Some("2 l")), "Bottle of cola");
    }

    #[test]
    fn test_labeled_price_span_removed() {
        assert_eq!(clean("Crisp apples 3 dollars", None), "Crisp apples");
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(clean("12 pack for $2.99", Some("12 pack")), "");
    }

    #[test]
    fn test_word_containing_for_is_kept() {
        assert_eq!(clean("Comfort fit $9", None), "Comfort fit");
        assert_eq!(clean("Great for breakfast", None), "Great breakfast");
    }

    #[test]
    fn test_size_wins_over_overlapping_price() {
        // Bare-number price "3" sits inside the size "3 lb"
        let price = extract_price("3 lb for 5").unwrap();
        assert_eq!(price.value.text, "$3");
        assert_eq!(clean_description("3 lb for 5", Some(&price), Some("3 lb")), "5");
    }
}
