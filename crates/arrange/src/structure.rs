//! Filtered graph view used by every layout algorithm.
//!
//! [`LayoutGraph`] borrows the caller's [`Graph`] and keeps only the
//! entries that can be laid out: nodes with an id (first occurrence wins)
//! and edges with an id whose endpoints both resolve. Everything else is
//! dropped without reporting an error.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use log::trace;

use arrange_core::graph::{Edge, Graph, Node};

/// A validated, borrowed view of a [`Graph`].
#[derive(Debug, Clone)]
pub struct LayoutGraph<'a> {
    nodes: IndexMap<&'a str, &'a Node>,
    edges: IndexMap<&'a str, &'a Edge>,
}

impl<'a> LayoutGraph<'a> {
    /// Builds the view, dropping invalid nodes and edges.
    pub fn new(graph: &'a Graph) -> Self {
        let mut nodes = IndexMap::with_capacity(graph.nodes().len());
        for node in graph.nodes() {
            match node.id() {
                Some(id) if !nodes.contains_key(id) => {
                    nodes.insert(id, node);
                }
                Some(id) => trace!(node_id = id; "Dropping duplicate node"),
                None => trace!(kind = node.kind().as_str(); "Dropping node without id"),
            }
        }

        let mut edges = IndexMap::with_capacity(graph.edges().len());
        for edge in graph.edges() {
            let Some(id) = edge.id() else {
                trace!(source = edge.source(), target = edge.target(); "Dropping edge without id");
                continue;
            };
            if !nodes.contains_key(edge.source()) || !nodes.contains_key(edge.target()) {
                trace!(edge_id = id; "Dropping edge with dangling endpoint");
                continue;
            }
            if edges.contains_key(id) {
                trace!(edge_id = id; "Dropping duplicate edge");
                continue;
            }
            edges.insert(id, edge);
        }

        Self { nodes, edges }
    }

    /// Number of retained nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of retained edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Retained nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = (&'a str, &'a Node)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, *node))
    }

    /// Retained edges in input order.
    pub fn edges(&self) -> impl Iterator<Item = (&'a str, &'a Edge)> + '_ {
        self.edges.iter().map(|(id, edge)| (*id, *edge))
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Position of a node in input order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Maps each node to its successors, in edge order.
    ///
    /// Every retained node has an entry, even without outgoing edges.
    pub fn adjacency_list(&self) -> IndexMap<&'a str, Vec<&'a str>> {
        let mut adjacency: IndexMap<&'a str, Vec<&'a str>> =
            self.nodes.keys().map(|id| (*id, Vec::new())).collect();
        for edge in self.edges.values() {
            if let Some(targets) = adjacency.get_mut(edge.source()) {
                targets.push(edge.target());
            }
        }
        adjacency
    }

    /// Maps each node to its predecessors, in edge order.
    pub fn reverse_adjacency_list(&self) -> IndexMap<&'a str, Vec<&'a str>> {
        let mut adjacency: IndexMap<&'a str, Vec<&'a str>> =
            self.nodes.keys().map(|id| (*id, Vec::new())).collect();
        for edge in self.edges.values() {
            if let Some(sources) = adjacency.get_mut(edge.target()) {
                sources.push(edge.source());
            }
        }
        adjacency
    }

    /// Nodes without incoming edges, in input order.
    pub fn root_nodes(&self) -> Vec<&'a str> {
        let targets: IndexSet<&str> = self.edges.values().map(|edge| edge.target()).collect();
        self.nodes
            .keys()
            .filter(|id| !targets.contains(**id))
            .copied()
            .collect()
    }

    /// Orders nodes so that every edge points forward (Kahn's algorithm).
    ///
    /// Nodes with no incoming edges are queued first in input order. Nodes
    /// that sit on a cycle, or are reachable only through one, are absent
    /// from the returned order.
    pub fn topological_sort(&self) -> Vec<&'a str> {
        let adjacency = self.adjacency_list();
        let mut in_degree: IndexMap<&str, usize> =
            self.nodes.keys().map(|id| (*id, 0)).collect();
        for edge in self.edges.values() {
            if let Some(degree) = in_degree.get_mut(edge.target()) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<&'a str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(id) = queue.pop_front() {
            order.push(id);
            let Some(targets) = adjacency.get(id) else {
                continue;
            };
            for target in targets {
                if let Some(degree) = in_degree.get_mut(*target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*target);
                    }
                }
            }
        }

        order
    }
}
