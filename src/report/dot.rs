// src/report/dot.rs

//! Graphviz DOT projection of an annotated package graph

use crate::graph::{DependencyGraph, PackageNode};
use std::fmt::Write as _;

/// Fill for packages that already build with Bazel
pub const CONVERTED_FILL: &str = "palegreen";

/// Fill for unconverted packages when no gradient was applied
pub const DEFAULT_FILL: &str = "white";

/// Render the graph as a `digraph`
///
/// The synthetic root is not drawn. Each node label lists the package name,
/// its height (when it has one), its parent count and its Bazel status.
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut dot = String::new();

    dot.push_str("digraph BazelProgress {\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str("    node [shape=box, style=filled, fontname=\"Courier\", fontsize=10];\n\n");

    for node in graph.nodes() {
        let _ = writeln!(
            dot,
            "    \"{}\" [label=\"{}\", fillcolor=\"{}\"];",
            escape_dot(&node.name),
            node_label(node),
            fill_color(node),
        );
    }

    dot.push('\n');

    for node in graph.nodes() {
        for child in node.children.iter().filter(|c| graph.contains(c)) {
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\";",
                escape_dot(&node.name),
                escape_dot(child)
            );
        }
    }

    dot.push_str("}\n");
    dot
}

fn node_label(node: &PackageNode) -> String {
    let mut lines = vec![escape_dot(&node.name)];
    if let Some(height) = node.height {
        lines.push(format!("height: {height}"));
    }
    lines.push(format!("parents: {}", node.parent_count));
    lines.push(format!(
        "bazel: {}",
        if node.is_converted() { "yes" } else { "no" }
    ));
    lines.join("\\n")
}

fn fill_color(node: &PackageNode) -> String {
    if node.is_converted() {
        CONVERTED_FILL.to_string()
    } else {
        node.color
            .map_or_else(|| DEFAULT_FILL.to_string(), |c| c.to_string())
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
