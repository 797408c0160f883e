//! Tidy tree layout for hierarchies.
//!
//! A spanning forest is taken from the graph by depth-first search from the
//! root nodes; a node reached through several parents belongs to the first
//! one expanded. Leaves take consecutive slots on the cross axis and every
//! parent is centered over its first and last child. Depth maps to the main
//! axis the same way levels do in the hierarchical layout.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use arrange_core::geometry::Point;

use crate::{
    config::{Direction, LayoutConfig},
    error::LayoutError,
    layout::algorithm::{LayoutAlgorithm, LayoutRng, Placement},
    structure::LayoutGraph,
};

/// Parent-centered tree layout.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout;

impl TreeLayout {
    /// Registry name of this algorithm.
    pub const NAME: &'static str = "tree";

    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Default)]
struct SpanningForest<'a> {
    /// Nodes in depth-first preorder.
    order: Vec<&'a str>,
    depth: IndexMap<&'a str, usize>,
    children: IndexMap<&'a str, Vec<&'a str>>,
}

fn spanning_forest<'a>(graph: &LayoutGraph<'a>) -> SpanningForest<'a> {
    let adjacency = graph.adjacency_list();
    let mut forest = SpanningForest::default();
    let mut claimed: IndexSet<&'a str> = IndexSet::with_capacity(graph.node_count());

    let starts = graph
        .root_nodes()
        .into_iter()
        .chain(graph.nodes().map(|(id, _)| id));

    for start in starts {
        if !claimed.insert(start) {
            continue;
        }
        let mut stack = vec![(start, 0)];
        while let Some((id, depth)) = stack.pop() {
            forest.order.push(id);
            forest.depth.insert(id, depth);

            let mut children = Vec::new();
            for &next in adjacency.get(id).into_iter().flatten() {
                if claimed.insert(next) {
                    children.push(next);
                }
            }
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
            forest.children.insert(id, children);
        }
    }
    forest
}

/// Cross-axis slot of every node, in units of node spacing.
fn assign_slots<'a>(forest: &SpanningForest<'a>) -> IndexMap<&'a str, f32> {
    let mut slots = IndexMap::with_capacity(forest.order.len());
    let mut next_leaf = 0.0;
    for &id in &forest.order {
        if forest.children.get(id).is_none_or(Vec::is_empty) {
            slots.insert(id, next_leaf);
            next_leaf += 1.0;
        }
    }

    for &id in forest.order.iter().rev() {
        let Some(children) = forest.children.get(id) else {
            continue;
        };
        if let (Some(first), Some(last)) = (children.first(), children.last()) {
            let first = slots.get(first).copied().unwrap_or_default();
            let last = slots.get(last).copied().unwrap_or_default();
            slots.insert(id, (first + last) / 2.0);
        }
    }
    slots
}

impl LayoutAlgorithm for TreeLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Centers each parent over its subtree"
    }

    fn compute_positions(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        _rng: &mut LayoutRng,
    ) -> Result<Placement, LayoutError> {
        let forest = spanning_forest(graph);
        let slots = assign_slots(&forest);
        let deepest = forest.depth.values().copied().max().unwrap_or_default();

        let direction = config.direction();
        let spacing = config.node_spacing();
        let cross_spacing = if direction.is_horizontal() {
            spacing.vertical
        } else {
            spacing.horizontal
        };

        let mut positions = IndexMap::with_capacity(graph.node_count());
        for (id, _) in graph.nodes() {
            let depth = forest.depth.get(id).copied().unwrap_or_default();
            let rank = match direction {
                Direction::TopBottom | Direction::LeftRight => depth,
                Direction::BottomTop | Direction::RightLeft => deepest - depth,
            };
            let main = rank as f32 * config.level_spacing();
            let cross = slots.get(id).copied().unwrap_or_default() * cross_spacing;
            let position = if direction.is_horizontal() {
                Point::new(main, cross)
            } else {
                Point::new(cross, main)
            };
            positions.insert(id.to_string(), position);
        }

        debug!(depth = deepest, direction:? = direction; "Tree layout computed");
        Ok(Placement::new(positions, 1))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::SeedableRng;

    use arrange_core::graph::{Edge, Graph, Node, NodeKind};

    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::new(
            nodes
                .iter()
                .map(|id| Node::new(*id, NodeKind::Process))
                .collect(),
            edges
                .iter()
                .map(|(source, target)| Edge::new(format!("{source}{target}"), *source, *target))
                .collect(),
        )
    }

    fn place(graph: &Graph, direction: Direction) -> Placement {
        let config = LayoutConfig::new(TreeLayout::NAME).with_direction(direction);
        TreeLayout::new()
            .compute_positions(&LayoutGraph::new(graph), &config, &mut LayoutRng::seed_from_u64(0))
            .expect("layout succeeds")
    }

    fn org_chart() -> Graph {
        graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("b", "e")],
        )
    }

    #[test]
    fn test_parents_centered_over_children() {
        let placement = place(&org_chart(), Direction::TopBottom);
        let positions = placement.positions();
        assert_eq!(positions["d"], Point::new(0.0, 240.0));
        assert_eq!(positions["e"], Point::new(150.0, 240.0));
        assert_eq!(positions["c"], Point::new(300.0, 120.0));
        assert_eq!(positions["b"], Point::new(75.0, 120.0));
        assert_approx_eq!(f32, positions["a"].x(), 187.5);
        assert_approx_eq!(f32, positions["a"].y(), 0.0);
    }

    #[test]
    fn test_shared_child_belongs_to_first_parent() {
        let diamond = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let view = LayoutGraph::new(&diamond);
        let forest = spanning_forest(&view);
        assert_eq!(forest.order, vec!["a", "b", "d", "c"]);
        assert_eq!(forest.children["b"], vec!["d"]);
        assert!(forest.children["c"].is_empty());
        assert_eq!(forest.depth["d"], 2);
    }

    #[test]
    fn test_cycles_and_islands_are_placed() {
        let tangled = graph(&["x", "y", "z"], &[("x", "y"), ("y", "x")]);
        let placement = place(&tangled, Direction::TopBottom);
        assert_eq!(placement.positions().len(), 3);
        // `z` is the only root and forms its own tree.
        assert_eq!(placement.positions()["z"], Point::new(0.0, 0.0));
        assert_eq!(placement.positions()["y"], Point::new(150.0, 120.0));
    }

    #[test]
    fn test_left_right_uses_horizontal_depth() {
        let placement = place(&org_chart(), Direction::LeftRight);
        let positions = placement.positions();
        assert_eq!(positions["d"], Point::new(240.0, 0.0));
        assert_eq!(positions["e"], Point::new(240.0, 100.0));
    }

    #[test]
    fn test_bottom_top_reverses_depth() {
        let result = TreeLayout::new()
            .layout(
                &org_chart(),
                &LayoutConfig::new(TreeLayout::NAME).with_direction(Direction::BottomTop),
                &mut LayoutRng::seed_from_u64(0),
            )
            .expect("layout succeeds");
        let root = result.position("a").expect("root placed");
        let leaf = result.position("d").expect("leaf placed");
        assert!(root.y() > leaf.y());
        assert_approx_eq!(f32, leaf.y(), 50.0);
        assert_approx_eq!(f32, leaf.x(), 50.0);
    }
}
