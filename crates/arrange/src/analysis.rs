//! Structural classification of graphs.
//!
//! The engine asks a [`StructureAnalyzer`] what kind of graph it is dealing
//! with before ranking layout suggestions. [`TopologyAnalyzer`] is the
//! default implementation, built on `petgraph`.

use indexmap::IndexMap;
use petgraph::{
    algo::{connected_components, is_cyclic_directed},
    graph::DiGraph,
};

use arrange_core::graph::{Graph, NodeKind};

use crate::{config::Direction, structure::LayoutGraph};

/// Structural facts about a graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAnalysis {
    pub node_count: usize,
    pub edge_count: usize,
    /// At least one root and no cycles.
    pub is_hierarchical: bool,
    /// Connected, acyclic and exactly `node_count - 1` edges.
    pub is_tree: bool,
    pub has_cycles: bool,
    /// Cyclic with at most 20 nodes.
    pub has_circular_pattern: bool,
    /// Longest chain of edges starting from a root.
    pub max_depth: usize,
    /// Largest number of nodes sharing a level.
    pub max_width: usize,
    pub average_branching: f32,
    /// Weakly connected components.
    pub connected_components: usize,
    pub preferred_direction: Option<Direction>,
    /// Size, density, depth and branching combined into `[0, 1]`.
    pub complexity_score: f32,
    pub kind_distribution: IndexMap<NodeKind, usize>,
}

/// Classifies a graph for layout selection.
pub trait StructureAnalyzer {
    fn analyze(&self, graph: &Graph) -> GraphAnalysis;
}

/// Default analyzer based on topological measures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyAnalyzer;

/// Largest node count that still reads well as a circle.
const CIRCULAR_PATTERN_LIMIT: usize = 20;

impl TopologyAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

/// Longest-path level of every node reachable in topological order.
fn levels(graph: &LayoutGraph<'_>) -> IndexMap<String, usize> {
    let predecessors = graph.reverse_adjacency_list();
    let mut levels: IndexMap<String, usize> = IndexMap::new();
    for id in graph.topological_sort() {
        let level = predecessors
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|pred| levels.get(*pred))
            .map(|level| level + 1)
            .max()
            .unwrap_or(0);
        levels.insert(id.to_string(), level);
    }
    levels
}

fn complexity_score(node_count: usize, edge_count: usize, depth: usize, branching: f32) -> f32 {
    let nodes = node_count as f32;
    let max_edges = nodes * (nodes - 1.0);
    let density = if max_edges > 0.0 {
        edge_count as f32 / max_edges
    } else {
        0.0
    };
    let score = (nodes / 50.0).min(1.0) * 0.3
        + density * 0.3
        + (depth as f32 / 10.0).min(1.0) * 0.2
        + (branching / 5.0).min(1.0) * 0.2;
    score.min(1.0)
}

impl StructureAnalyzer for TopologyAnalyzer {
    fn analyze(&self, graph: &Graph) -> GraphAnalysis {
        let view = LayoutGraph::new(graph);
        let node_count = view.node_count();
        let edge_count = view.edge_count();

        let mut digraph = DiGraph::<&str, ()>::with_capacity(node_count, edge_count);
        let indices: IndexMap<&str, _> = view
            .nodes()
            .map(|(id, _)| (id, digraph.add_node(id)))
            .collect();
        for (_, edge) in view.edges() {
            if let (Some(source), Some(target)) =
                (indices.get(edge.source()), indices.get(edge.target()))
            {
                digraph.add_edge(*source, *target, ());
            }
        }

        let has_cycles = is_cyclic_directed(&digraph);
        let components = if node_count == 0 {
            0
        } else {
            connected_components(&digraph)
        };
        let roots = view.root_nodes().len();

        let levels = levels(&view);
        let max_depth = levels.values().copied().max().unwrap_or(0);
        let mut widths: IndexMap<usize, usize> = IndexMap::new();
        for level in levels.values() {
            *widths.entry(*level).or_default() += 1;
        }
        let max_width = widths.values().copied().max().unwrap_or(0);

        let average_branching = if node_count == 0 {
            0.0
        } else {
            edge_count as f32 / node_count as f32
        };

        let mut kind_distribution = IndexMap::new();
        for (_, node) in view.nodes() {
            *kind_distribution.entry(node.kind()).or_default() += 1;
        }

        let preferred_direction = (node_count > 0).then(|| {
            if max_depth > max_width {
                Direction::TopBottom
            } else {
                Direction::LeftRight
            }
        });

        GraphAnalysis {
            node_count,
            edge_count,
            is_hierarchical: roots >= 1 && !has_cycles,
            is_tree: node_count > 0
                && edge_count + 1 == node_count
                && components == 1
                && !has_cycles,
            has_cycles,
            has_circular_pattern: has_cycles && node_count <= CIRCULAR_PATTERN_LIMIT,
            max_depth,
            max_width,
            average_branching,
            connected_components: components,
            preferred_direction,
            complexity_score: complexity_score(node_count, edge_count, max_depth, average_branching),
            kind_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use arrange_core::graph::{Edge, Node};

    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::new(
            nodes.iter().map(|id| Node::new(*id, NodeKind::Process)).collect(),
            edges
                .iter()
                .map(|(source, target)| Edge::new(format!("{source}-{target}"), *source, *target))
                .collect(),
        )
    }

    #[test]
    fn test_tree() {
        let analysis = TopologyAnalyzer::new().analyze(&graph(
            &["root", "a", "b", "c"],
            &[("root", "a"), ("root", "b"), ("a", "c")],
        ));
        assert!(analysis.is_tree);
        assert!(analysis.is_hierarchical);
        assert!(!analysis.has_cycles);
        assert_eq!(analysis.connected_components, 1);
        assert_eq!(analysis.max_depth, 2);
        assert_eq!(analysis.max_width, 2);
        assert_eq!(analysis.preferred_direction, Some(Direction::LeftRight));
    }

    #[test]
    fn test_dag_that_is_not_a_tree() {
        let analysis = TopologyAnalyzer::new().analyze(&graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        ));
        assert!(!analysis.is_tree);
        assert!(analysis.is_hierarchical);
    }

    #[test]
    fn test_disconnected_forest_is_not_a_tree() {
        let analysis = TopologyAnalyzer::new().analyze(&graph(&["a", "b", "c"], &[("a", "b")]));
        assert_eq!(analysis.connected_components, 2);
        assert!(!analysis.is_tree);
    }

    #[test]
    fn test_cycle_is_circular_pattern() {
        let analysis = TopologyAnalyzer::new().analyze(&graph(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        ));
        assert!(analysis.has_cycles);
        assert!(analysis.has_circular_pattern);
        assert!(!analysis.is_hierarchical);
        assert!(!analysis.is_tree);
    }

    #[test]
    fn test_large_cycle_is_not_circular_pattern() {
        let ids: Vec<String> = (0..25).map(|i| format!("n{i}")).collect();
        let names: Vec<&str> = ids.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str)> = (0..25)
            .map(|i| (names[i], names[(i + 1) % 25]))
            .collect();
        let analysis = TopologyAnalyzer::new().analyze(&graph(&names, &edges));
        assert!(analysis.has_cycles);
        assert!(!analysis.has_circular_pattern);
    }

    #[test]
    fn test_chain_prefers_top_bottom() {
        let analysis = TopologyAnalyzer::new().analyze(&graph(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c")],
        ));
        assert_eq!(analysis.preferred_direction, Some(Direction::TopBottom));
        // 3 nodes: 0.3 * 3/50 + 0.3 * 2/6 + 0.2 * 2/10 + 0.2 * (2/3)/5
        assert_approx_eq!(
            f32,
            analysis.complexity_score,
            0.018 + 0.1 + 0.04 + 0.2 * (2.0 / 3.0) / 5.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_empty_graph() {
        let analysis = TopologyAnalyzer::new().analyze(&Graph::default());
        assert_eq!(analysis.node_count, 0);
        assert!(!analysis.is_tree);
        assert!(!analysis.is_hierarchical);
        assert_eq!(analysis.preferred_direction, None);
        assert_eq!(analysis.complexity_score, 0.0);
    }

    #[test]
    fn test_kind_distribution() {
        let graph = Graph::new(
            vec![
                Node::new("a", NodeKind::Start),
                Node::new("b", NodeKind::Process),
                Node::new("c", NodeKind::Process),
            ],
            vec![],
        );
        let analysis = TopologyAnalyzer::new().analyze(&graph);
        assert_eq!(analysis.kind_distribution[&NodeKind::Process], 2);
        assert_eq!(analysis.kind_distribution[&NodeKind::Start], 1);
    }
}
