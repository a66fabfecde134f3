//! Parse command - build tables from saved analysis texts without the API.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use tracing::warn;

use matchit_core::{RuleFlyerParser, Session};

use crate::export::write_outputs;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Glob pattern matching analysis text files
    #[arg(required = true)]
    input: String,

    /// Output directory (default from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let mut texts = Vec::with_capacity(files.len());
    for path in &files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("flyer")
            .to_string();
        match fs::read_to_string(path) {
            Ok(text) => texts.push((name, text)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let mut session = Session::with_parser(RuleFlyerParser::from_config(&config.extraction));
    let report = session.analyze_texts(texts);

    super::print_report(&report);

    if !report.has_usable_data() {
        println!();
        println!("{}", style("No successful analyses found.").red());
        return Ok(());
    }

    let tables = session.tables()?;
    super::print_summary(&tables);
    let output_dir = args.output_dir.unwrap_or(config.export.output_dir);
    let paths = write_outputs(&output_dir, session.records(), &tables, config.export.pretty_json)?;

    println!();
    for path in &paths {
        println!("{} Wrote {}", style("✓").green(), path.display());
    }

    Ok(())
}
