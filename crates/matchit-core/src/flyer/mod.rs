//! Flyer analysis parsing.

mod parser;
pub mod rules;

pub use parser::{FlyerParser, ParseResult, RuleFlyerParser};
