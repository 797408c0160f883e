//! Layered layout for directed flows.
//!
//! Nodes are assigned to levels by longest path from a root, so every edge
//! of an acyclic graph points to a later level. Each level is centered on
//! the cross axis and levels are separated by the configured level spacing.

use indexmap::IndexMap;
use log::debug;

use arrange_core::geometry::Point;

use crate::{
    config::{Direction, LayoutConfig},
    error::LayoutError,
    layout::algorithm::{LayoutAlgorithm, LayoutRng, Placement},
    structure::LayoutGraph,
};

/// Deterministic level-by-level layout.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalLayout;

impl HierarchicalLayout {
    /// Registry name of this algorithm.
    pub const NAME: &'static str = "hierarchical";

    pub fn new() -> Self {
        Self
    }
}

/// Assigns a level to every node.
///
/// Nodes in topological order get one more than their deepest predecessor.
/// Nodes on cycles are then handled in input order, using whichever of
/// their predecessors already have a level.
fn assign_levels<'a>(graph: &LayoutGraph<'a>) -> IndexMap<&'a str, usize> {
    let predecessors = graph.reverse_adjacency_list();
    let mut levels: IndexMap<&'a str, usize> = IndexMap::with_capacity(graph.node_count());

    let next_level = |id: &str, levels: &IndexMap<&'a str, usize>| {
        predecessors
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|pred| levels.get(*pred))
            .map(|level| level + 1)
            .max()
            .unwrap_or(0)
    };

    for id in graph.topological_sort() {
        let level = next_level(id, &levels);
        levels.insert(id, level);
    }
    for (id, _) in graph.nodes() {
        if !levels.contains_key(id) {
            let level = next_level(id, &levels);
            levels.insert(id, level);
        }
    }
    levels
}

impl LayoutAlgorithm for HierarchicalLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Arranges nodes in levels following edge direction"
    }

    fn compute_positions(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        _rng: &mut LayoutRng,
    ) -> Result<Placement, LayoutError> {
        let levels = assign_levels(graph);

        let mut rows: Vec<Vec<&str>> = Vec::new();
        for (id, _) in graph.nodes() {
            let level = levels.get(id).copied().unwrap_or_default();
            if rows.len() <= level {
                rows.resize_with(level + 1, Vec::new);
            }
            rows[level].push(id);
        }
        let deepest = rows.len().saturating_sub(1);

        let direction = config.direction();
        let spacing = config.node_spacing();
        let cross_spacing = if direction.is_horizontal() {
            spacing.vertical
        } else {
            spacing.horizontal
        };

        let mut positions = IndexMap::with_capacity(graph.node_count());
        for (level, row) in rows.iter().enumerate() {
            let rank = match direction {
                Direction::TopBottom | Direction::LeftRight => level,
                Direction::BottomTop | Direction::RightLeft => deepest - level,
            };
            let main = rank as f32 * config.level_spacing();
            let half_span = (row.len().saturating_sub(1)) as f32 / 2.0;

            for (index, id) in row.iter().enumerate() {
                let cross = (index as f32 - half_span) * cross_spacing;
                let position = if direction.is_horizontal() {
                    Point::new(main, cross)
                } else {
                    Point::new(cross, main)
                };
                positions.insert(id.to_string(), position);
            }
        }

        debug!(levels = rows.len(), direction:? = direction; "Hierarchical levels assigned");
        Ok(Placement::new(positions, 1))
    }
}
