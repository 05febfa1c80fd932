// src/error.rs

//! Error types for the migration tracker
//!
//! Parse leniency is the rule for rule files and manifests, so the only
//! data-integrity failure is a dependency cycle. Everything else here is
//! I/O, configuration, or rendering trouble.

use std::fmt;
use thiserror::Error;

/// Errors produced by the tracker library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the tree or writing reports
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),

    /// Color setting is not a `#rrggbb` value
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// Dependency declarations form a cycle
    #[error("Unexpected graph cycle, see path: {0}")]
    Cycle(CyclePath),

    /// Requested package is not part of the scanned tree
    #[error("Package '{0}' not found in dependency graph")]
    PackageNotFound(String),

    /// Graph rendering collaborator failed
    #[error("Graph rendering failed: {0}")]
    Render(String),
}

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Path from the synthetic root down to the node that closed a cycle
///
/// The synthetic root is implicit at the head of the path; the last entry
/// is the repeated node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath {
    /// Package names in traversal order, root excluded
    pub packages: Vec<String>,
    /// Whether the traversal that found the cycle started at the synthetic root
    pub from_root: bool,
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.from_root {
            write!(f, "(root)")?;
            first = false;
        }
        for name in &self.packages {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{}", name)?;
            first = false;
        }
        Ok(())
    }
}
