//! Store-level fields (name, slogan, contact details).

use regex::Regex;

use super::patterns::{ADDRESS, PHONE, SLOGAN, STORE_NAME, WEBSITE};

/// Store fields found in an analysis, each absent when its label is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFields {
    pub store_name: Option<String>,
    pub slogan: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// Extract all labeled store fields from analysis text.
pub fn extract_store_fields(text: &str) -> StoreFields {
    StoreFields {
        store_name: labeled_value(&STORE_NAME, text),
        slogan: labeled_value(&SLOGAN, text),
        address: labeled_value(&ADDRESS, text),
        website: labeled_value(&WEBSITE, text),
        phone: labeled_value(&PHONE, text),
    }
}

fn labeled_value(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim_matches(|c: char| c == '*' || c.is_whitespace())
                .to_string()
        })
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_store_fields() {
        let text = r#"**Store Name:** FreshMart

**Slogan/Motto:** Fresh every day

**Contact Information:**
* **Address:** 12 Main St, Springfield
* **Website:** www.freshmart.example
* **Phone Number:** (555) 123-4567
"#;

        assert_eq!(
            extract_store_fields(text),
            StoreFields {
                store_name: Some("FreshMart".to_string()),
                slogan: Some("Fresh every day".to_string()),
                address: Some("12 Main St, Springfield".to_string()),
                website: Some("www.freshmart.example".to_string()),
                phone: Some("(555) 123-4567".to_string()),
            }
        );
    }

    #[test]
    fn test_labels_are_case_insensitive_and_bold_optional() {
        let fields = extract_store_fields("store name: Corner Shop\nWEBSITE: corner.example");
        assert_eq!(fields.store_name.as_deref(), Some("Corner Shop"));
        assert_eq!(fields.website.as_deref(), Some("corner.example"));
        assert_eq!(fields.phone, None);
    }

    #[test]
    fn test_value_stops_at_next_marker() {
        let fields = extract_store_fields("**Store Name:** Acme **Slogan/Motto:** Low prices");
        assert_eq!(fields.store_name.as_deref(), Some("Acme"));
        assert_eq!(fields.slogan.as_deref(), Some("Low prices"));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let fields = extract_store_fields("**Address:**\n**Website:** shop.example");
        assert_eq!(fields.address, None);
        assert_eq!(fields.website.as_deref(), Some("shop.example"));
    }

    #[test]
    fn test_label_inside_longer_label_is_ignored() {
        let text = "**Contact Information:**\n* **Email Address:** a@b.c\nEmail Address: a@b.c\n* **Address:** 1 Main\n";
        let fields = extract_store_fields(text);
        assert_eq!(fields.address.as_deref(), Some("1 Main"));

        let fields = extract_store_fields("Email Address: a@b.c\n**Address:** 1 Main\n");
        assert_eq!(fields.address.as_deref(), Some("1 Main"));
    }

    #[test]
    fn test_plain_label_in_bullet() {
        let fields = extract_store_fields("* Phone Number: 555 0100\n* Website: shop.example");
        assert_eq!(fields.phone.as_deref(), Some("555 0100"));
        assert_eq!(fields.website.as_deref(), Some("shop.example"));
    }
}
