//! Analyze command - send flyer images to the vision API and export tables.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use matchit_core::client::is_image_path;
use matchit_core::{FlyerImage, GeminiClient, RuleFlyerParser, Session};

use crate::export::write_outputs;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Glob pattern matching flyer images (png, jpg, jpeg, gif, bmp)
    #[arg(required = true)]
    input: String,

    /// Output directory (default from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Model override
    #[arg(short, long)]
    model: Option<String>,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(model) = args.model {
        config.client.model = model;
    }

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image_path(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching images found for pattern: {}", args.input);
    }

    // Unreadable files are skipped, not fatal
    let mut images = Vec::with_capacity(files.len());
    for path in &files {
        match FlyerImage::from_path(path) {
            Ok(image) => images.push(image),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    if images.is_empty() {
        anyhow::bail!("None of the {} matching files could be read", files.len());
    }

    println!(
        "{} Found {} flyers to analyze",
        style("ℹ").blue(),
        images.len()
    );

    let client = GeminiClient::from_env(&config.client)?;
    let mut session = Session::with_parser(RuleFlyerParser::from_config(&config.extraction));

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let report = session
        .analyze_with_progress(&client, &images, |index, name| {
            pb.set_position(index as u64);
            pb.set_message(format!("Processing {}", name));
        })
        .await;

    pb.set_position(images.len() as u64);
    pb.finish_with_message("Complete");

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

    info!("Analyze finished in {:?}", start.elapsed());
    Ok(())
}
