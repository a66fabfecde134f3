//! Analysis session: the flyer collection behind tables and search.
//!
//! A session is passed explicitly to whatever needs the current flyers.
//! Re-analyzing replaces the whole collection once the new batch is done.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::client::{ExtractionClient, FlyerImage};
use crate::error::{MatchitError, Result};
use crate::flyer::{FlyerParser, RuleFlyerParser};
use crate::models::flyer::FlyerRecord;
use crate::models::tables::AggregatedTables;
use crate::search::{search, TermResult};

/// Final status of one flyer in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FlyerStatus {
    Success,
    Failed(String),
}

/// Outcome of analyzing one flyer.
#[derive(Debug, Clone, Serialize)]
pub struct FlyerOutcome {
    pub source_id: String,
    #[serde(flatten)]
    pub status: FlyerStatus,
    /// Parser warnings (empty for failed flyers).
    pub warnings: Vec<String>,
    pub products_found: usize,
}

impl FlyerOutcome {
    pub fn is_success(&self) -> bool {
        self.status == FlyerStatus::Success
    }
}

/// Summary of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<FlyerOutcome>,
}

impl BatchReport {
    pub fn successful(&self) -> impl Iterator<Item = &FlyerOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FlyerOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn total_products(&self) -> usize {
        self.successful().map(|o| o.products_found).sum()
    }

    /// At least one flyer was analyzed successfully.
    pub fn has_usable_data(&self) -> bool {
        self.successful().next().is_some()
    }
}

/// Session-scoped flyer state.
pub struct Session<P = RuleFlyerParser> {
    parser: P,
    records: Vec<FlyerRecord>,
    last_report: Option<BatchReport>,
}

impl Session<RuleFlyerParser> {
    /// Create an empty session with the default parser.
    pub fn new() -> Self {
        Self::with_parser(RuleFlyerParser::new())
    }
}

impl Default for Session<RuleFlyerParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FlyerParser> Session<P> {
    /// Create an empty session with a custom parser.
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            records: Vec::new(),
            last_report: None,
        }
    }

    /// Analyze images one after another.
    pub async fn analyze<C: ExtractionClient>(&mut self, client: &C, images: &[FlyerImage]) -> BatchReport {
        self.analyze_with_progress(client, images, |_, _| {}).await
    }

    /// Analyze images, calling `on_progress(index, name)` before each one.
    ///
    /// A failed flyer is recorded and skipped. The flyer collection is
    /// replaced only after the batch completes with at least one success;
    /// until then the previous collection stays in place.
    pub async fn analyze_with_progress<C, F>(
        &mut self,
        client: &C,
        images: &[FlyerImage],
        mut on_progress: F,
    ) -> BatchReport
    where
        C: ExtractionClient,
        F: FnMut(usize, &str),
    {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(images.len());
        let mut records = Vec::new();

        for (index, image) in images.iter().enumerate() {
            on_progress(index, &image.name);

            match client.analyze(image).await {
                Ok(text) => {
                    let (record, outcome) = self.parse_one(&text, &image.name);
                    records.push(record);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    warn!("Failed to analyze {}: {}", image.name, e);
                    outcomes.push(FlyerOutcome {
                        source_id: image.name.clone(),
                        status: FlyerStatus::Failed(e.to_string()),
                        warnings: Vec::new(),
                        products_found: 0,
                    });
                }
            }
        }

        self.finish_batch(started_at, records, outcomes)
    }

    /// Parse analysis texts obtained earlier, as `(source_id, text)` pairs.
    pub fn analyze_texts<I, S, T>(&mut self, texts: I) -> BatchReport
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let started_at = Utc::now();
        let mut outcomes = Vec::new();
        let mut records = Vec::new();

        for (source_id, text) in texts {
            let (record, outcome) = self.parse_one(text.as_ref(), source_id.as_ref());
            records.push(record);
            outcomes.push(outcome);
        }

        self.finish_batch(started_at, records, outcomes)
    }

    fn parse_one(&self, text: &str, source_id: &str) -> (FlyerRecord, FlyerOutcome) {
        let result = self.parser.parse(text, source_id);
        for warning in &result.warnings {
            warn!("{}: {}", source_id, warning);
        }

        let outcome = FlyerOutcome {
            source_id: source_id.to_string(),
            status: FlyerStatus::Success,
            warnings: result.warnings,
            products_found: result.record.products.len(),
        };
        (result.record, outcome)
    }

    fn finish_batch(
        &mut self,
        started_at: DateTime<Utc>,
        records: Vec<FlyerRecord>,
        outcomes: Vec<FlyerOutcome>,
    ) -> BatchReport {
        let report = BatchReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        if report.has_usable_data() {
            info!(
                "Analysis complete: {} products from {} flyers",
                report.total_products(),
                records.len()
            );
            self.records = records;
        } else {
            warn!("No successful analyses; keeping previous flyer data");
        }

        self.last_report = Some(report.clone());
        report
    }

    /// Current flyer collection.
    pub fn records(&self) -> &[FlyerRecord] {
        &self.records
    }

    /// Replace the collection with previously saved flyers.
    pub fn replace_records(&mut self, records: Vec<FlyerRecord>) {
        self.records = records;
    }

    /// Report of the most recent batch, if any ran.
    pub fn last_report(&self) -> Option<&BatchReport> {
        self.last_report.as_ref()
    }

    /// Aggregated tables over the current collection.
    pub fn tables(&self) -> Result<AggregatedTables> {
        if self.records.is_empty() {
            return Err(MatchitError::NoData);
        }
        Ok(aggregate(&self.records))
    }

    /// Search the current products.
    pub fn search(&self, query: &str) -> Result<Vec<TermResult>> {
        let tables = self.tables()?;
        if tables.products.is_empty() {
            return Err(MatchitError::NoData);
        }
        Ok(search(&tables.products, query))
    }

    /// Drop all flyers and the last report.
    pub fn reset(&mut self) {
        self.records.clear();
        self.last_report = None;
    }
}
