// src/cli/mod.rs
//! CLI definitions for bazel-progress
//!
//! Running without a subcommand produces the progress report. Every report
//! option is optional here: unset options fall back to the `--config` file
//! and then to built-in defaults.
//!
//! - `rules` - Show what the rule extractor sees in one BUILD file

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bazel-progress")]
#[command(version)]
#[command(about = "Track migration of Cargo packages to Bazel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the rule records extracted from a BUILD file
    Rules {
        /// Path to a BUILD.bazel / BUILD file
        path: PathBuf,

        /// Also classify the records against this Cargo package name
        #[arg(long)]
        package: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReportArgs {
    /// TOML file with tracker settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root of the source tree to scan
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Limit the report to this package's subtree ("all" for everything)
    #[arg(short = 'p', long)]
    pub root_package: Option<String>,

    /// Where to write the CSV table
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Where to write the rendered graph (format from extension)
    #[arg(short, long)]
    pub graph_output: Option<PathBuf>,

    /// Open the rendered graph in the desktop viewer
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub open_viewer: Option<bool>,

    /// Only track packages with the first-party name prefix
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub first_party_only: Option<bool>,

    /// Track dev-dependencies and test targets
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub include_dev: Option<bool>,
}
