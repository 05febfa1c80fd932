// src/config.rs

//! Tracker configuration
//!
//! Settings come from built-in defaults, an optional TOML file, and
//! command-line overrides, in that order. Example file:
//!
//! ```toml
//! source_dir = "rs"
//! root_package = "ic-replica"
//! graph_output = "reports/replica.svg"
//! include_dev = true
//! ```

use crate::error::Result;
use crate::graph::{BuildOptions, Gradient, Rgb, is_all_packages};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Root of the source tree to scan
    pub source_dir: PathBuf,
    /// Package whose subtree is reported; `None` or an alias means all
    pub root_package: Option<String>,
    pub csv_output: PathBuf,
    /// Rendered graph; the format follows the extension
    pub graph_output: PathBuf,
    pub open_viewer: bool,
    /// Restrict the graph to packages named with `first_party_prefix`
    pub first_party_only: bool,
    pub first_party_prefix: String,
    /// Track dev-dependencies and test targets instead of plain packages
    pub include_dev: bool,
    pub manifest_name: String,
    pub rule_file_names: Vec<String>,
    pub low_color: String,
    pub high_color: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            root_package: None,
            csv_output: PathBuf::from("bazel_progress.csv"),
            graph_output: PathBuf::from("bazel_progress.svg"),
            open_viewer: false,
            first_party_only: true,
            first_party_prefix: "ic-".to_string(),
            include_dev: false,
            manifest_name: "Cargo.toml".to_string(),
            rule_file_names: vec!["BUILD.bazel".to_string(), "BUILD".to_string()],
            low_color: "#fff7bc".to_string(),
            high_color: "#d73027".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.gradient()?;
        Ok(config)
    }

    /// Color gradient from `low_color` to `high_color`
    pub fn gradient(&self) -> Result<Gradient> {
        Ok(Gradient::new(
            self.low_color.parse::<Rgb>()?,
            self.high_color.parse::<Rgb>()?,
        ))
    }

    /// Subtree target, with whole-graph aliases mapped to `None`
    pub fn target(&self) -> Option<&str> {
        let target = self.root_package.as_deref();
        if is_all_packages(target) {
            None
        } else {
            target.map(str::trim)
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            manifest_name: self.manifest_name.clone(),
            rule_file_names: self.rule_file_names.clone(),
            first_party_prefix: self
                .first_party_only
                .then(|| self.first_party_prefix.clone()),
            include_dev: self.include_dev,
        }
    }
}
