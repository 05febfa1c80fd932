// src/commands/mod.rs
//! Command handlers for the bazel-progress CLI

mod report;
mod rules;

pub use report::{cmd_report, resolve_config};
pub use rules::cmd_rules;
