//! Core library for retail flyer price matching.
//!
//! This crate provides:
//! - Flyer analysis parsing (store details and featured products)
//! - Product field extraction (price, size/weight, description)
//! - Cross-store aggregation into stores, products and comparison tables
//! - Product search across stores with best/worst price per term
//! - A vision API client that turns flyer images into analysis text

pub mod error;
pub mod models;
pub mod flyer;
pub mod aggregate;
pub mod search;
pub mod client;
pub mod session;

pub use error::{ClientError, MatchitError, Result};
pub use models::flyer::{FlyerRecord, ProductRecord, PRICE_NOT_FOUND, UNKNOWN_STORE};
pub use models::tables::{
    AggregatedTables, ComparisonRow, ComparisonSummary, ProductRow, ProductSummary, StoreRow,
    StoreSummary, TableSummary,
};
pub use flyer::{FlyerParser, ParseResult, RuleFlyerParser};
pub use aggregate::aggregate;
pub use search::{search, PriceSpread, SearchHit, TermResult};
pub use client::{ExtractionClient, FlyerImage};
#[cfg(feature = "gemini")]
pub use client::GeminiClient;
pub use session::{BatchReport, FlyerOutcome, FlyerStatus, Session};
