// src/tracker.rs

//! End-to-end tracking pipeline
//!
//! Scanning, scoping and annotation all finish before any report is
//! written, so a cycle aborts the run with no partial output on disk.

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::graph::metrics::MetricsSummary;
use crate::graph::{DependencyGraph, GraphBuilder, annotate, extract_subtree};
use crate::report::{GraphvizRenderer, Progress, RenderOutcome, csv_rows, to_dot, write_csv};
use std::path::PathBuf;
use tracing::info;

/// Annotated graph plus the figures derived from it
#[derive(Debug)]
pub struct Analysis {
    pub graph: DependencyGraph,
    pub progress: Progress,
    pub metrics: MetricsSummary,
    /// Whether `-[dev]` nodes (test targets) were tracked
    pub include_dev: bool,
}

impl Analysis {
    /// One-line console summary
    pub fn summary_line(&self) -> String {
        let qualifier = if self.include_dev { " (tests)" } else { "" };
        format!("Packages converted to Bazel{}: {}", qualifier, self.progress)
    }
}

/// Files written by [`write_reports`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub graph: RenderOutcome,
}

/// Scan the tree, scope it to the configured package and annotate it
pub fn analyze(config: &TrackerConfig) -> Result<Analysis> {
    let gradient = config.gradient()?;

    let graph = GraphBuilder::scan(config.build_options(), &config.source_dir)?;
    info!("Dependency graph has {} nodes", graph.len());

    let mut graph = extract_subtree(graph, config.target())?;
    let metrics = annotate(&mut graph, &gradient)?;
    if let Some(max) = metrics.max_height {
        info!("Maximum height of unconverted work: {}", max);
    }

    let progress = Progress::of(&graph);

    Ok(Analysis {
        graph,
        progress,
        metrics,
        include_dev: config.include_dev,
    })
}

/// Write the CSV table and the rendered graph
pub fn write_reports(analysis: &Analysis, config: &TrackerConfig) -> Result<ReportPaths> {
    write_csv(&config.csv_output, &csv_rows(&analysis.graph))?;
    info!("Wrote CSV report to {}", config.csv_output.display());

    let renderer = GraphvizRenderer::new(config.open_viewer);
    let graph = renderer.render(&to_dot(&analysis.graph), &config.graph_output)?;

    Ok(ReportPaths {
        csv: config.csv_output.clone(),
        graph,
    })
}
