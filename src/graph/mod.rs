// src/graph/mod.rs

//! Package dependency graph
//!
//! Nodes are Cargo packages keyed by name; an edge `a -> b` means `a`
//! depends on `b`. When dev-dependencies are tracked, every package also
//! gets a virtual `<name>-[dev]` node for its test-only closure.
//!
//! The synthetic root that links all true roots is not a package and is
//! never stored in the node map. It lives in its own field so it cannot
//! collide with a real package name; traversal code addresses it through
//! [`NodeRef::Root`].
//!
//! Pipeline:
//!
//! ```text
//! GraphBuilder::scan  ->  link_root  ->  extract_subtree  ->  annotate
//!   (builder.rs)                         (subtree.rs)        (metrics.rs)
//! ```

pub mod builder;
pub mod manifest;
pub mod metrics;
pub mod subtree;
mod traverse;

pub use builder::{BuildOptions, GraphBuilder};
pub use manifest::Manifest;
pub use metrics::{Gradient, Rgb, annotate};
pub use subtree::{ALL_PACKAGES_ALIASES, extract_subtree, is_all_packages};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::info;

/// Suffix appended to a package name for its dev-dependency node
pub const DEV_SUFFIX: &str = "-[dev]";

/// What a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// A Cargo package and its normal dependencies
    #[default]
    Package,
    /// A package's test-only dependency closure
    Dev,
}

/// One package in the dependency graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageNode {
    pub name: String,
    pub kind: NodeKind,
    /// A matching library/binary/proc-macro/canister rule exists
    pub has_primary_target: bool,
    /// A matching test rule exists (computed for dev nodes only)
    pub has_test_target: bool,
    /// Names of dependencies, sorted and deduplicated
    pub children: BTreeSet<String>,
    /// Longest chain of unconverted dependencies below this node
    pub height: Option<u32>,
    /// Number of nodes in the graph that list this node as a child
    pub parent_count: usize,
    /// Gradient fill derived from `height`
    pub color: Option<Rgb>,
}

impl PackageNode {
    /// Create an unconverted package node with no dependencies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create the dev node paired with `package`
    pub fn dev(package: &str) -> Self {
        Self {
            name: format!("{}{}", package, DEV_SUFFIX),
            kind: NodeKind::Dev,
            ..Default::default()
        }
    }

    /// Builder-style helper to set the children
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Has this node already been migrated?
    ///
    /// Package nodes count their primary target, dev nodes their tests.
    pub fn is_converted(&self) -> bool {
        match self.kind {
            NodeKind::Package => self.has_primary_target,
            NodeKind::Dev => self.has_test_target,
        }
    }
}

/// Reference to either the synthetic root or a package node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef<'g> {
    Root,
    Package(&'g str),
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("(root)"),
            Self::Package(name) => f.write_str(name),
        }
    }
}

/// Package name to node map plus the synthetic root's children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, PackageNode>,
    root: Option<BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any node with the same name
    pub fn insert(&mut self, node: PackageNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    pub fn get(&self, name: &str) -> Option<&PackageNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of package nodes (the synthetic root is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Package nodes in name order
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut PackageNode> {
        self.nodes.values_mut()
    }

    /// Package names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Children of the synthetic root, if it has been attached
    pub fn root_children(&self) -> Option<&BTreeSet<String>> {
        self.root.as_ref()
    }

    /// Attach the synthetic root with exactly these children
    pub fn attach_root<I, S>(&mut self, children: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root = Some(children.into_iter().map(Into::into).collect());
    }

    /// Names that no other node lists as a child
    ///
    /// Self-loops count as an incoming edge.
    pub fn compute_roots(&self) -> BTreeSet<String> {
        let mut roots: BTreeSet<String> = self.nodes.keys().cloned().collect();
        for node in self.nodes.values() {
            for child in &node.children {
                roots.remove(child);
            }
        }
        roots
    }

    /// Link the synthetic root to every true root and return the root count
    pub fn link_root(&mut self) -> usize {
        let roots = self.compute_roots();
        let count = roots.len();
        self.root = Some(roots);
        info!("Root nodes linked to synthetic root: {}", count);
        count
    }

    /// Children of a node in stored (sorted) order
    ///
    /// Children naming packages outside the graph are skipped.
    pub fn children_of<'g>(&'g self, node: NodeRef<'g>) -> impl Iterator<Item = &'g str> + 'g {
        let children = match node {
            NodeRef::Root => self.root.as_ref(),
            NodeRef::Package(name) => self.nodes.get(name).map(|n| &n.children),
        };
        children
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(move |child| self.nodes.contains_key(*child))
    }

    /// Drop edges pointing at names that are not nodes; returns how many were dropped
    pub(crate) fn prune_dangling_edges(&mut self) -> usize {
        let known: BTreeSet<String> = self.nodes.keys().cloned().collect();
        let mut dropped = 0;
        for node in self.nodes.values_mut() {
            let before = node.children.len();
            node.children.retain(|child| known.contains(child));
            dropped += before - node.children.len();
        }
        dropped
    }

    /// Copy of this graph keeping only the named nodes, root unset
    pub(crate) fn retain_copy(&self, keep: &BTreeSet<&str>) -> Self {
        let nodes = self
            .nodes
            .iter()
            .filter(|(name, _)| keep.contains(name.as_str()))
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect();
        Self { nodes, root: None }
    }
}
