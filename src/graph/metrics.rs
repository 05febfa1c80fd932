// src/graph/metrics.rs

//! Derived per-node metrics
//!
//! - `height`: how many layers of still-unconverted work sit below a node.
//!   Converted nodes have no height; an unconverted leaf has height 0.
//! - `parent_count`: fan-in from other nodes of the same graph (the
//!   synthetic root never counts).
//! - `color`: linear gradient keyed by `height / max_height`.
//!
//! Migration order follows height: convert the height-0 packages first.

use super::traverse::Traversal;
use super::{DependencyGraph, NodeRef};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Two-stop color gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub low: Rgb,
    pub high: Rgb,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            low: Rgb::new(0xff, 0xf7, 0xbc),
            high: Rgb::new(0xd7, 0x30, 0x27),
        }
    }
}

impl Gradient {
    pub fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    /// Interpolate each channel; `t` is clamped to `0.0..=1.0`
    pub fn at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |lo: u8, hi: u8| {
            let value = f64::from(lo) + (f64::from(hi) - f64::from(lo)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.low.r, self.high.r),
            mix(self.low.g, self.high.g),
            mix(self.low.b, self.high.b),
        )
    }
}

/// Summary of one annotation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSummary {
    /// Largest stored height, `None` when every node is converted
    pub max_height: Option<u32>,
    /// Whether gradient colors were assigned
    pub colored: bool,
}

/// Compute height, parent count and color for every node in place
///
/// Fails with [`Error::Cycle`] instead of looping if the graph is cyclic.
pub fn annotate(graph: &mut DependencyGraph, gradient: &Gradient) -> Result<MetricsSummary> {
    let heights = compute_heights(graph)?;
    let parents = count_parents(graph);

    for node in graph.nodes_mut() {
        node.height = heights.get(&node.name).copied().flatten();
        node.parent_count = parents.get(&node.name).copied().unwrap_or(0);
        node.color = None;
    }

    let max_height = graph.nodes().filter_map(|n| n.height).max();
    let colored = match max_height {
        Some(max) if max > 0 => {
            for node in graph.nodes_mut() {
                node.color = node
                    .height
                    .map(|h| gradient.at(f64::from(h) / f64::from(max)));
            }
            true
        }
        _ => false,
    };

    debug!(
        "Annotated {} nodes, max height {:?}, colored: {}",
        graph.len(),
        max_height,
        colored
    );

    Ok(MetricsSummary { max_height, colored })
}

/// Height per node name; `None` for converted nodes
fn compute_heights(graph: &DependencyGraph) -> Result<HashMap<String, Option<u32>>> {
    let mut traversal = Traversal::new(graph);
    if graph.root_children().is_some() {
        traversal.visit(NodeRef::Root)?;
    }
    // Nodes the root does not reach (e.g. ancestors kept by a subtree)
    for name in graph.names() {
        if !traversal.is_done(name) {
            traversal.visit(NodeRef::Package(name))?;
        }
    }

    // -1 marks "converted, not counted"
    let mut raw: HashMap<&str, i64> = HashMap::new();
    for name in traversal.finish() {
        let Some(node) = graph.get(name) else {
            continue;
        };
        let height = if node.is_converted() {
            -1
        } else {
            1 + graph
                .children_of(NodeRef::Package(name))
                .map(|child| raw.get(child).copied().unwrap_or(-1))
                .max()
                .unwrap_or(-1)
        };
        raw.insert(name, height);
    }

    Ok(raw
        .into_iter()
        .map(|(name, h)| (name.to_string(), u32::try_from(h).ok()))
        .collect())
}

/// Number of distinct parents per node, root excluded
fn count_parents(graph: &DependencyGraph) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in graph.names() {
        for child in graph.children_of(NodeRef::Package(name)) {
            *counts.entry(child.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
