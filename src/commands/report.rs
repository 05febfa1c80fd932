// src/commands/report.rs

//! Progress report command

use crate::cli::ReportArgs;
use anyhow::{Context, Result};
use bazel_progress::TrackerConfig;
use bazel_progress::report::RenderOutcome;
use bazel_progress::tracker::{analyze, write_reports};
use tracing::info;

/// Merge defaults, the optional config file and command-line overrides
pub fn resolve_config(args: &ReportArgs) -> Result<TrackerConfig> {
    let mut config = match &args.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => TrackerConfig::default(),
    };

    if let Some(dir) = &args.source_dir {
        config.source_dir = dir.clone();
    }
    if let Some(package) = &args.root_package {
        config.root_package = Some(package.clone());
    }
    if let Some(path) = &args.csv_output {
        config.csv_output = path.clone();
    }
    if let Some(path) = &args.graph_output {
        config.graph_output = path.clone();
    }
    if let Some(open) = args.open_viewer {
        config.open_viewer = open;
    }
    if let Some(first_party) = args.first_party_only {
        config.first_party_only = first_party;
    }
    if let Some(include_dev) = args.include_dev {
        config.include_dev = include_dev;
    }

    config.gradient().context("Invalid gradient colors")?;
    Ok(config)
}

/// Scan, analyze and write all reports, then print the summary line
pub fn cmd_report(args: &ReportArgs) -> Result<()> {
    let config = resolve_config(args)?;

    match config.target() {
        Some(target) => info!("Reporting subtree of {}", target),
        None => info!("Reporting all packages"),
    }

    let analysis = analyze(&config)
        .with_context(|| format!("Failed to analyze {}", config.source_dir.display()))?;
    let paths = write_reports(&analysis, &config)?;

    println!("{}", analysis.summary_line());
    println!("CSV report: {}", paths.csv.display());
    match &paths.graph {
        RenderOutcome::Rendered(path) => println!("Graph: {}", path.display()),
        RenderOutcome::SourceOnly(path) => println!("Graph source: {}", path.display()),
    }

    Ok(())
}
