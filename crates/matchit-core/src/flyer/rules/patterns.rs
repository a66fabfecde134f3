//! Common regex patterns for flyer analysis text.
//!
//! The analysis text follows a loose template:
//!
//! ```text
//! **Store Name:** ...
//! **Slogan/Motto:** ...
//! **Featured Products & Prices:**
//! * **Product Name:** Size/Weight for $Price (Description)
//! **Contact Information:**
//! * **Address:** ...
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::Rule;

/// Pattern for `**Label:** value` or a line starting with `Label: value`.
///
/// The value runs to the next bold marker or the end of the line. A label
/// that is only the tail of a longer one (`Email Address:`) does not match.
fn store_label(label: &str) -> String {
    format!(
        r"(?im)(?:\*\*{label}:\*\*|^[ \t]*(?:\*[ \t]+)?{label}:)[ \t]*(.+?)[ \t]*(?:\*\*|$)"
    )
}

lazy_static! {
    // Store fields: a bold label anywhere, or a plain label opening its line
    pub static ref STORE_NAME: Regex = Regex::new(&store_label(r"Store\s+Name")).unwrap();

    pub static ref SLOGAN: Regex = Regex::new(&store_label(r"Slogan/Motto")).unwrap();

    pub static ref ADDRESS: Regex = Regex::new(&store_label(r"Address")).unwrap();

    pub static ref WEBSITE: Regex = Regex::new(&store_label(r"Website")).unwrap();

    pub static ref PHONE: Regex = Regex::new(&store_label(r"Phone\s+Number")).unwrap();

    // Products section, up to the next known section or end of text
    pub static ref PRODUCTS_SECTION: Regex = Regex::new(
        r"(?is)\*{0,2}Featured Products & Prices:\*{0,2}(.*?)(?:\*\*Contact Information|\*\*Overall Impression|\*\*Address|\*\*Website|\*\*Phone|\z)"
    ).unwrap();

    // Product line shapes, highest priority first. Group 1 is the name, group 2 the details.
    pub static ref LINE_ITEM_RULES: Vec<Rule> = vec![
        Rule {
            name: "bold_name",
            pattern: Regex::new(r"(?im)\*[ \t]*\*\*(.+?):\*\*[ \t]*(.+?)[ \t]*$").unwrap(),
        },
        Rule {
            name: "colon",
            pattern: Regex::new(r"(?im)\*[ \t]*(.+?):[ \t]*(.+?)[ \t]*$").unwrap(),
        },
        Rule {
            name: "dash",
            pattern: Regex::new(r"(?im)^[ \t]*\*[ \t]*(.+?)[ \t]*[-–][ \t]*(.+?)[ \t]*$").unwrap(),
        },
        // Never fires: every line it matches is matched by "colon" first
        Rule {
            name: "spaced_colon",
            pattern: Regex::new(r"(?im)^[ \t]*\*[ \t]*(.+?)[ \t]*:[ \t]*(.+?)[ \t]*$").unwrap(),
        },
    ];

    // Prices, highest priority first
    pub static ref PRICE_RULES: Vec<Rule> = vec![
        Rule {
            name: "dollar_sign",
            pattern: Regex::new(r"\$(\d+\.?\d*)").unwrap(),
        },
        Rule {
            name: "dollars_word",
            pattern: Regex::new(r"(?i)(\d+\.?\d*)\s*(?:dollars?|bucks?)").unwrap(),
        },
        Rule {
            name: "unit_price",
            pattern: Regex::new(r"(?i)(\d+\.?\d*)\s*(?:for|each|ea)").unwrap(),
        },
        Rule {
            name: "trailing_symbol",
            pattern: Regex::new(r"(?i)(\d+\.?\d*)\s*(?:\$|dollars?)").unwrap(),
        },
    ];

    pub static ref BARE_NUMBER: Regex = Regex::new(r"(\d+\.?\d*)").unwrap();

    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(r"\$\d+\.?\d*").unwrap();

    // Sizes and weights, highest priority first
    pub static ref SIZE_RULES: Vec<Rule> = vec![
        Rule {
            name: "gallons",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:gal|gallon|gallons)\b)").unwrap(),
        },
        Rule {
            name: "liters",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:l|liter|liters|litre|litres)\b)").unwrap(),
        },
        Rule {
            name: "milliliters",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:ml|milliliter|milliliters|millilitre|millilitres)\b)").unwrap(),
        },
        Rule {
            name: "ounces",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:oz|ounce|ounces|fl\s*oz|fluid\s*ounce)\b)").unwrap(),
        },
        Rule {
            name: "pounds",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:lb|lbs|pound|pounds)\b)").unwrap(),
        },
        Rule {
            name: "kilograms",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:kg|kilogram|kilograms)\b)").unwrap(),
        },
        Rule {
            name: "grams",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:g|gram|grams)\b)").unwrap(),
        },
        Rule {
            name: "count",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:pack|count|ct|pieces?|pcs?)\b)").unwrap(),
        },
        Rule {
            name: "quarts",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:qt|quart|quarts)\b)").unwrap(),
        },
        Rule {
            name: "pints",
            pattern: Regex::new(r"(?i)(\d+\.?\d*\s*(?:pt|pint|pints)\b)").unwrap(),
        },
        Rule {
            name: "multi_pack",
            pattern: Regex::new(r"(?i)(\d+\s*x\s*\d+\.?\d*\s*(?:oz|ml|l|gal))").unwrap(),
        },
        Rule {
            name: "compact",
            pattern: Regex::new(r"(?i)(\d+\.?\d*(?:g|kg|ml|l|oz|lb|lbs|pack|count|ct|gal|qt|pt)\b)").unwrap(),
        },
    ];

    // Any size token, stripped from descriptions once a size was found
    pub static ref GENERIC_SIZE: Regex = Regex::new(
        r"(?i)\d+\.?\d*\s*(?:g|kg|ml|l|oz|lb|lbs|pack|count|ct|gal|gallon|gallons|liter|liters|litre|litres|milliliter|milliliters|quart|quarts|pint|pints|qt|pt|fl\s*oz|fluid\s*ounce|gram|grams|kilogram|kilograms|ounce|ounces|pound|pounds)\b"
    ).unwrap();

    pub static ref DESCRIPTION_FILLER: Regex = Regex::new(r"(?i)\bfor\b|\(|\)|,").unwrap();

    // Loose line scan
    pub static ref LOOSE_PRODUCT_LINE: Regex = Regex::new(r"[a-zA-Z]+.*\$?\d+\.?\d*").unwrap();

    pub static ref LOOSE_SPLIT: Regex = Regex::new(r"[\$\d]").unwrap();

    pub static ref LOOSE_PRICE: Regex = Regex::new(r"\$?(\d+\.?\d*)").unwrap();
}

/// Lines containing any of these (lowercased) are never read as products.
pub const HEADER_KEYWORDS: &[&str] = &[
    "store name",
    "slogan",
    "contact",
    "address",
    "website",
    "phone",
    "overall impression",
];
