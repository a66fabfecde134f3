//! Flyer and product records produced by the parser.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Price text used when no number could be found for a product.
pub const PRICE_NOT_FOUND: &str = "Price not found";

/// Store name shown when a flyer did not name its store.
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// Everything extracted from one analyzed flyer image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlyerRecord {
    /// Identifier of the originating image (usually the file name).
    pub source_id: String,

    /// Store or business name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// Tagline or motto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Products in extraction order.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl FlyerRecord {
    /// Create an empty record for the given source.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            ..Default::default()
        }
    }

    /// Store name, or the unknown-store placeholder.
    pub fn display_store_name(&self) -> &str {
        self.store_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STORE)
    }
}

/// A single product line detected in a flyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name as printed.
    pub name: String,

    /// `$<number>` or [`PRICE_NOT_FOUND`].
    pub price_text: String,

    /// Numeric price; zero when no usable price was found.
    pub price_numeric: Decimal,

    /// Quantity and unit such as `12 oz`; empty when none matched.
    #[serde(default)]
    pub size_weight: String,

    /// Remaining details with price and size removed.
    #[serde(default)]
    pub description: String,
}

impl ProductRecord {
    /// Whether the product carries a usable (positive) price.
    pub fn has_price(&self) -> bool {
        self.price_numeric > Decimal::ZERO
    }
}

/// Load parsed flyers previously written with [`save_records`].
pub fn load_records(path: &Path) -> Result<Vec<FlyerRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write parsed flyers as JSON.
pub fn save_records(path: &Path, records: &[FlyerRecord], pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    std::fs::write(path, content)?;
    Ok(())
}
