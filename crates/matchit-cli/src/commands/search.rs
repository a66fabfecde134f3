//! Search command - compare prices for products across analyzed flyers.

use std::path::PathBuf;

use clap::Args;
use console::style;

use matchit_core::models::flyer::load_records;
use matchit_core::search::available_product_names;
use matchit_core::{MatchitError, Session, TermResult};

use crate::export::FLYERS_FILE;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Comma-separated search terms, e.g. "milk, eggs"
    #[arg(required = true)]
    query: String,

    /// Saved flyers file (default: flyers.json in the output directory)
    #[arg(short, long)]
    flyers: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON output
    Json,
}

pub fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let flyers_path = args
        .flyers
        .unwrap_or_else(|| config.export.output_dir.join(FLYERS_FILE));
    if !flyers_path.exists() {
        anyhow::bail!(
            "Flyer data not found: {}. Run 'matchit analyze' or 'matchit parse' first.",
            flyers_path.display()
        );
    }

    let mut session = Session::new();
    session.replace_records(load_records(&flyers_path)?);

    let results = match session.search(&args.query) {
        Ok(results) => results,
        Err(MatchitError::NoData) => {
            anyhow::bail!("No products available. Analyze some flyers first.")
        }
        Err(e) => return Err(e.into()),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            if results.is_empty() {
                println!("{} Enter at least one search term.", style("ℹ").blue());
            }
            for result in &results {
                print_term(result);
            }

            if results.iter().any(TermResult::is_empty) {
                let tables = session.tables()?;
                let names = available_product_names(&tables.products, config.search.hint_limit);
                println!();
                println!("{} {}", style("Available products:").dim(), names.join(", "));
            }
        }
    }

    Ok(())
}

fn print_term(result: &TermResult) {
    println!();
    if result.is_empty() {
        println!(
            "{} No results found for '{}'",
            style("✗").red(),
            result.term
        );
        return;
    }

    println!(
        "{} {} ({} found)",
        style("🔍").cyan(),
        style(&result.term).bold(),
        result.matches.len()
    );

    for hit in &result.matches {
        let size = if hit.size_weight.is_empty() {
            String::new()
        } else {
            format!(" ({})", hit.size_weight)
        };
        println!(
            "   {} at {}: {}{}",
            hit.product_name, hit.store_name, hit.price_text, size
        );
    }

    if let Some(spread) = &result.spread {
        println!(
            "   {} Best deal: {} at {} for ${}",
            style("✓").green(),
            spread.cheapest.product_name,
            spread.cheapest.store_name,
            spread.cheapest.price_numeric
        );
        println!(
            "   {} Highest price: {} at {} for ${}",
            style("↑").red(),
            spread.most_expensive.product_name,
            spread.most_expensive.store_name,
            spread.most_expensive.price_numeric
        );
        println!(
            "   {} Potential savings: ${:.2}",
            style("$").yellow(),
            spread.savings
        );
    }
}
