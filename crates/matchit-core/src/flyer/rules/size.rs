//! Size and weight extraction (volume, weight, count, multi-packs).

use super::patterns::SIZE_RULES;
use super::{first_match, ExtractionMatch, FieldExtractor};

/// Size/weight field extractor.
pub struct SizeExtractor;

impl SizeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SizeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SizeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&SIZE_RULES, text)
    }
}

/// Extract a size from the details, falling back to the product name.
pub fn extract_size(details: &str, name: &str) -> Option<ExtractionMatch<String>> {
    let extractor = SizeExtractor::new();
    extractor
        .extract(details)
        .or_else(|| extractor.extract(name))
}
