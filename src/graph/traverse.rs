// src/graph/traverse.rs

//! Cycle-checked depth-first traversal
//!
//! Uses an explicit frame stack instead of recursion so very deep
//! dependency chains cannot overflow the call stack. Marks live in a
//! side table owned by the traversal; the graph itself is never touched.

use super::{DependencyGraph, NodeRef};
use crate::error::{CyclePath, Error, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct Frame<'g> {
    node: NodeRef<'g>,
    children: Vec<&'g str>,
    next: usize,
}

/// Post-order DFS over one graph, reusable across several start nodes
///
/// A node already finished is never re-entered, so shared dependencies are
/// walked once. Reaching a node that is still on the current path is a
/// cycle and fails with the full path.
pub(crate) struct Traversal<'g> {
    graph: &'g DependencyGraph,
    marks: HashMap<&'g str, Mark>,
    order: Vec<&'g str>,
}

impl<'g> Traversal<'g> {
    pub(crate) fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            marks: HashMap::new(),
            order: Vec::with_capacity(graph.len()),
        }
    }

    pub(crate) fn is_done(&self, name: &str) -> bool {
        self.marks.get(name) == Some(&Mark::Done)
    }

    /// Walk everything reachable from `start`
    pub(crate) fn visit(&mut self, start: NodeRef<'g>) -> Result<()> {
        if let NodeRef::Package(name) = start
            && (!self.graph.contains(name) || self.is_done(name))
        {
            return Ok(());
        }

        let mut stack = vec![self.enter(start)];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            match frame.children.get(frame.next).copied() {
                Some(child) => {
                    frame.next += 1;
                    match self.marks.get(child).copied() {
                        Some(Mark::Done) => {}
                        Some(Mark::InProgress) => return Err(cycle_error(&stack, child)),
                        None => {
                            let frame = self.enter(NodeRef::Package(child));
                            stack.push(frame);
                        }
                    }
                }
                None => {
                    if let Some(Frame {
                        node: NodeRef::Package(name),
                        ..
                    }) = stack.pop()
                    {
                        self.marks.insert(name, Mark::Done);
                        self.order.push(name);
                    }
                }
            }
        }

        Ok(())
    }

    /// Finished package names, every child before its parents
    pub(crate) fn finish(self) -> Vec<&'g str> {
        self.order
    }

    fn enter(&mut self, node: NodeRef<'g>) -> Frame<'g> {
        if let NodeRef::Package(name) = node {
            self.marks.insert(name, Mark::InProgress);
        }
        Frame {
            node,
            children: self.graph.children_of(node).collect(),
            next: 0,
        }
    }
}

fn cycle_error(stack: &[Frame<'_>], repeated: &str) -> Error {
    let from_root = matches!(stack.first().map(|f| f.node), Some(NodeRef::Root));
    let mut packages: Vec<String> = stack
        .iter()
        .filter_map(|f| match f.node {
            NodeRef::Package(name) => Some(name.to_string()),
            NodeRef::Root => None,
        })
        .collect();
    packages.push(repeated.to_string());
    Error::Cycle(CyclePath { packages, from_root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PackageNode;

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (name, children) in edges {
            graph.insert(PackageNode::new(*name).with_children(children.iter().copied()));
        }
        graph
    }

    #[test]
    fn test_post_order_diamond() {
        let mut graph = graph_of(&[("d", &["b", "c"]), ("b", &["a"]), ("c", &["a"]), ("a", &[])]);
        graph.link_root();

        let mut traversal = Traversal::new(&graph);
        traversal.visit(NodeRef::Root).unwrap();
        let order = traversal.finish();

        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shared_node_visited_once() {
        let graph = graph_of(&[("x", &["s"]), ("y", &["s"]), ("s", &[])]);
        let mut traversal = Traversal::new(&graph);
        traversal.visit(NodeRef::Package("x")).unwrap();
        traversal.visit(NodeRef::Package("y")).unwrap();
        traversal.visit(NodeRef::Package("s")).unwrap();
        assert_eq!(traversal.finish(), vec!["s", "x", "y"]);
    }

    #[test]
    fn test_cycle_reports_full_path() {
        let mut graph = graph_of(&[("top", &["a"]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        graph.link_root();

        let mut traversal = Traversal::new(&graph);
        let err = traversal.visit(NodeRef::Root).unwrap_err();
        match err {
            Error::Cycle(path) => {
                assert!(path.from_root);
                assert_eq!(path.packages, vec!["top", "a", "b", "c", "a"]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let graph = graph_of(&[("top", &["x"]), ("x", &["x"])]);
        let mut traversal = Traversal::new(&graph);
        let err = traversal.visit(NodeRef::Package("top")).unwrap_err();
        assert!(matches!(
            err,
            Error::Cycle(ref p) if p.packages == vec!["top", "x", "x"] && !p.from_root
        ));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut graph = DependencyGraph::new();
        let depth = 50_000;
        for i in 0..depth {
            let node = PackageNode::new(format!("n{i}"));
            let node = if i + 1 < depth {
                node.with_children([format!("n{}", i + 1)])
            } else {
                node
            };
            graph.insert(node);
        }
        let mut traversal = Traversal::new(&graph);
        traversal.visit(NodeRef::Package("n0")).unwrap();
        let order = traversal.finish();
        assert_eq!(order.len(), depth);
        assert_eq!(order[0], format!("n{}", depth - 1));
    }
}
