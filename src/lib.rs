// src/lib.rs

//! Bazel migration progress tracker
//!
//! Scans a Cargo workspace, builds the package dependency graph and
//! reports how much of it already builds with Bazel.
//!
//! # Architecture
//!
//! - Rules: line-oriented extraction of rule declarations from BUILD files
//! - Graph: packages keyed by name, synthetic root, cycle-checked traversal
//! - Metrics: height of unconverted work, parent fan-in, gradient colors
//! - Reports: console summary, CSV table, Graphviz rendering

pub mod config;
mod error;
pub mod graph;
pub mod report;
pub mod rules;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{CyclePath, Error, Result};
pub use graph::{DependencyGraph, NodeKind, NodeRef, PackageNode};
pub use report::Progress;
pub use rules::{RuleKind, RuleRecord};
pub use tracker::{Analysis, analyze, write_reports};
