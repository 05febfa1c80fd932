// src/graph/subtree.rs

//! Scope a dependency graph to one package
//!
//! The result keeps every node that lies on a path from the synthetic root
//! through the target: the target's ancestors, the target itself and
//! everything the target transitively depends on. The synthetic root of
//! the result points only at the target.

use super::traverse::Traversal;
use super::{DependencyGraph, NodeRef};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Root-package values that mean "the whole graph"
pub const ALL_PACKAGES_ALIASES: [&str; 5] = ["none", "default", ".", "all", ""];

/// Is this root-package selection one of the whole-graph aliases?
pub fn is_all_packages(target: Option<&str>) -> bool {
    match target {
        None => true,
        Some(target) => ALL_PACKAGES_ALIASES.contains(&target.trim()),
    }
}

/// Link the synthetic root, then optionally isolate `target`'s subtree
///
/// In whole-graph mode the input comes back unchanged apart from the
/// attached root. Otherwise every node is walked first, starting from the
/// synthetic root, so any cycle fails with [`Error::Cycle`] whatever the
/// target is.
pub fn extract_subtree(
    mut graph: DependencyGraph,
    target: Option<&str>,
) -> Result<DependencyGraph> {
    graph.link_root();

    let target = match target {
        Some(target) if !is_all_packages(Some(target)) => target.trim(),
        _ => return Ok(graph),
    };

    let mut traversal = Traversal::new(&graph);
    traversal.visit(NodeRef::Root)?;
    // Nodes only reachable through a cycle have no true root above them
    for name in graph.names() {
        if !traversal.is_done(name) {
            traversal.visit(NodeRef::Package(name))?;
        }
    }
    let order = traversal.finish();

    if !graph.contains(target) {
        return Err(Error::PackageNotFound(target.to_string()));
    }

    // Post-order: children are settled before their parents
    let mut reaches_target: HashSet<&str> = HashSet::new();
    for &name in &order {
        if name == target
            || graph
                .children_of(NodeRef::Package(name))
                .any(|child| reaches_target.contains(child))
        {
            reaches_target.insert(name);
        }
    }

    let mut below = Traversal::new(&graph);
    below.visit(NodeRef::Package(target))?;
    let descendants = below.finish();

    let keep: BTreeSet<&str> = reaches_target.into_iter().chain(descendants).collect();
    debug!(
        "Subtree of {} keeps {} ancestor/descendant nodes",
        target,
        keep.len()
    );

    let mut subtree = graph.retain_copy(&keep);
    subtree.attach_root([target]);
    info!(
        "Extracted subtree for {}: {} of {} packages",
        target,
        subtree.len(),
        graph.len()
    );

    Ok(subtree)
}
