// src/report/mod.rs

//! Migration progress reports
//!
//! - [`Progress`]: converted / total counts for the console summary
//! - [`csv`]: one row per package, ordered by migration priority
//! - [`dot`]: Graphviz projection of the annotated graph
//! - [`render`]: runs Graphviz on the projection and optionally opens it

pub mod csv;
pub mod dot;
pub mod render;

pub use csv::{CsvRow, csv_rows, write_csv};
pub use dot::to_dot;
pub use render::{GraphvizRenderer, RenderOutcome};

use crate::graph::DependencyGraph;
use std::fmt;

/// Converted vs. total package counts
///
/// The synthetic root is not a package node, so it never contributes to
/// either count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub converted: usize,
    pub total: usize,
    /// `converted / total`, or 0.0 for an empty graph
    pub ratio: f64,
}

impl Progress {
    /// Count converted nodes of a graph
    pub fn of(graph: &DependencyGraph) -> Self {
        let converted = graph.nodes().filter(|n| n.is_converted()).count();
        let total = graph.len();
        let ratio = if total == 0 {
            0.0
        } else {
            converted as f64 / total as f64
        };
        Self {
            converted,
            total,
            ratio,
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} ({:>5.1}%)", self.converted, self.total, self.percent())
    }
}
