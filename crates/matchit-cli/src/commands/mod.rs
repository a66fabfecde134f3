//! Subcommand implementations.

pub mod analyze;
pub mod config;
pub mod parse;
pub mod search;

use std::path::Path;

use chrono::Local;
use console::style;

use matchit_core::models::config::MatchitConfig;
use matchit_core::{AggregatedTables, BatchReport, FlyerStatus};

/// Load the config given with `--config`, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MatchitConfig> {
    if let Some(path) = config_path {
        return Ok(MatchitConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(MatchitConfig::from_file(&default_path)?)
    } else {
        Ok(MatchitConfig::default())
    }
}

/// Print per-flyer warnings and failures followed by batch totals.
pub fn print_report(report: &BatchReport) {
    for outcome in report.successful() {
        for warning in &outcome.warnings {
            println!(
                "{} {}: {}",
                style("⚠").yellow(),
                outcome.source_id,
                warning
            );
        }
    }

    let failed: Vec<_> = report.failed().collect();
    let elapsed = report.finished_at - report.started_at;

    println!();
    println!(
        "{} Processed {} flyers in {}ms (started {})",
        style("✓").green(),
        report.outcomes.len(),
        elapsed.num_milliseconds(),
        report
            .started_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "   {} successful, {} failed, {} products found",
        style(report.successful().count()).green(),
        style(failed.len()).red(),
        report.total_products()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed flyers:").red());
        for outcome in &failed {
            if let FlyerStatus::Failed(message) = &outcome.status {
                println!("  - {}: {}", outcome.source_id, message);
            }
        }
    }
}

/// Print headline figures for the stores, products and comparisons tables.
pub fn print_summary(tables: &AggregatedTables) {
    let summary = tables.summary();

    println!();
    println!("{}", style("Stores").bold());
    println!(
        "   {} total, {} with address, {} with website",
        summary.stores.total, summary.stores.with_address, summary.stores.with_website
    );

    println!("{}", style("Products").bold());
    println!(
        "   {} total, {} with prices, average price {}, {} unique stores",
        summary.products.total,
        summary.products.with_prices,
        money(summary.products.average_price),
        summary.products.unique_stores
    );

    println!("{}", style("Price comparisons").bold());
    if summary.comparisons.rows == 0 {
        println!("   No comparable products found across multiple stores");
    } else {
        println!(
            "   {} comparable products in {} groups, average potential savings {}",
            summary.comparisons.rows,
            summary.comparisons.groups,
            money(summary.comparisons.average_savings)
        );
    }
}

fn money(value: Option<impl std::fmt::Display>) -> String {
    match value {
        Some(amount) => format!("${:.2}", amount),
        None => "N/A".to_string(),
    }
}
