// src/graph/builder.rs

//! Build the package graph from a source tree
//!
//! Every `Cargo.toml` with a package name becomes a node. A sibling
//! `BUILD.bazel` (or `BUILD`) file, when present, is run through the rule
//! extractor and classifier to decide whether the package is converted.
//! No rule file simply means "not converted yet".

use super::manifest::Manifest;
use super::{DependencyGraph, PackageNode};
use crate::error::Result;
use crate::rules::{RuleRecord, is_already_primary, is_already_tested, parse_rules};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Options controlling which manifests and edges end up in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Manifest file name to look for
    pub manifest_name: String,
    /// Rule file names tried next to each manifest, in order
    pub rule_file_names: Vec<String>,
    /// Keep only packages (and edges) whose name starts with this prefix
    pub first_party_prefix: Option<String>,
    /// Add a `-[dev]` node per package for its dev-dependencies
    pub include_dev: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            manifest_name: "Cargo.toml".to_string(),
            rule_file_names: vec!["BUILD.bazel".to_string(), "BUILD".to_string()],
            first_party_prefix: Some("ic-".to_string()),
            include_dev: false,
        }
    }
}

/// Incremental graph construction
#[derive(Debug)]
pub struct GraphBuilder {
    options: BuildOptions,
    graph: DependencyGraph,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            graph: DependencyGraph::new(),
        }
    }

    /// Scan `source_dir` and build the complete graph
    pub fn scan(options: BuildOptions, source_dir: &Path) -> Result<DependencyGraph> {
        let mut builder = Self::new(options);

        let manifests = builder.find_manifests(source_dir)?;
        info!(
            "Found {} {} files under {}",
            manifests.len(),
            builder.options.manifest_name,
            source_dir.display()
        );

        for path in &manifests {
            let content = match String::from_utf8(std::fs::read(path)?) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping non-UTF-8 manifest {}: {}", path.display(), e);
                    continue;
                }
            };
            let manifest = match Manifest::parse(&content) {
                Ok(manifest) => manifest,
                Err(e) => {
                    warn!("Skipping unparseable manifest {}: {}", path.display(), e);
                    continue;
                }
            };

            let rules = match builder.find_rule_file(path) {
                Some(rule_path) => {
                    let bytes = std::fs::read(&rule_path)?;
                    let records = parse_rules(&String::from_utf8_lossy(&bytes));
                    debug!("{}: {} rule(s)", rule_path.display(), records.len());
                    Some(records)
                }
                None => None,
            };

            builder.add_package(&manifest, rules.as_deref());
        }

        Ok(builder.finish())
    }

    /// All manifest files below `dir`, in sorted path order
    ///
    /// Hidden directories and `target/` build output are skipped.
    pub fn find_manifests(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut manifests = Vec::new();
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.file_name() == self.options.manifest_name.as_str()
            {
                manifests.push(entry.into_path());
            }
        }

        Ok(manifests)
    }

    /// First configured rule file that exists next to the manifest
    pub fn find_rule_file(&self, manifest_path: &Path) -> Option<PathBuf> {
        self.options
            .rule_file_names
            .iter()
            .map(|name| manifest_path.with_file_name(name))
            .find(|candidate| candidate.is_file())
    }

    fn is_first_party(&self, name: &str) -> bool {
        self.options
            .first_party_prefix
            .as_deref()
            .is_none_or(|prefix| name.starts_with(prefix))
    }

    /// Add one manifest (and its parsed rules, if it has a rule file)
    ///
    /// Returns `false` when the manifest was skipped.
    pub fn add_package(&mut self, manifest: &Manifest, rules: Option<&[RuleRecord]>) -> bool {
        let Some(name) = manifest.name() else {
            return false;
        };
        if !self.is_first_party(name) {
            return false;
        }
        if self.graph.contains(name) {
            warn!("Package {} declared by more than one manifest; keeping the last", name);
        }

        let rules = rules.unwrap_or_default();

        let mut node = PackageNode::new(name)
            .with_children(manifest.dependency_names().filter(|d| self.is_first_party(d)));
        node.has_primary_target = is_already_primary(name, rules);
        self.graph.insert(node);

        if self.options.include_dev {
            let mut dev = PackageNode::dev(name).with_children(
                manifest
                    .dev_dependency_names()
                    .filter(|d| self.is_first_party(d))
                    .chain(std::iter::once(name)),
            );
            dev.has_test_target = is_already_tested(name, rules);
            self.graph.insert(dev);
        }

        true
    }

    /// Finish construction, dropping edges to packages outside the tree
    pub fn finish(mut self) -> DependencyGraph {
        let dropped = self.graph.prune_dangling_edges();
        if dropped > 0 {
            debug!("Dropped {} edge(s) to packages outside the source tree", dropped);
        }
        self.graph
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}
