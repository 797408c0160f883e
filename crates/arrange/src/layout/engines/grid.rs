//! Regular grid layout for large graphs.
//!
//! Nodes fill rows left to right in input order. The column count defaults
//! to the smallest square that holds every node; cells are separated by the
//! configured node spacing.

use indexmap::IndexMap;
use log::debug;

use arrange_core::geometry::Point;

use crate::{
    config::{AlgorithmOptions, LayoutConfig},
    error::LayoutError,
    layout::algorithm::{LayoutAlgorithm, LayoutRng, Placement},
    structure::LayoutGraph,
};

const COLUMNS: &str = "columns";

/// Places nodes on a fixed grid, ignoring edges.
#[derive(Debug, Clone, Default)]
pub struct GridLayout;

impl GridLayout {
    /// Registry name of this algorithm.
    pub const NAME: &'static str = "grid";

    pub fn new() -> Self {
        Self
    }
}

fn column_count(node_count: usize, options: &AlgorithmOptions) -> usize {
    options
        .get_usize(COLUMNS)
        .unwrap_or_else(|| (node_count as f32).sqrt().ceil() as usize)
        .max(1)
}

impl LayoutAlgorithm for GridLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Fills a regular grid row by row"
    }

    fn validate_options(&self, options: &AlgorithmOptions) -> Result<(), String> {
        match options.get(COLUMNS) {
            Some(columns) if !(columns.is_finite() && columns >= 1.0 && columns.fract() == 0.0) => {
                Err(format!("`{COLUMNS}` must be a whole number of at least 1, got {columns}"))
            }
            _ => Ok(()),
        }
    }

    fn compute_positions(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        _rng: &mut LayoutRng,
    ) -> Result<Placement, LayoutError> {
        let columns = column_count(graph.node_count(), config.options());
        let spacing = config.node_spacing();

        let positions: IndexMap<String, Point> = graph
            .nodes()
            .enumerate()
            .map(|(index, (id, _))| {
                let (row, column) = (index / columns, index % columns);
                let position = Point::new(
                    column as f32 * spacing.horizontal,
                    row as f32 * spacing.vertical,
                );
                (id.to_string(), position)
            })
            .collect();

        debug!(nodes = graph.node_count(), columns = columns; "Grid layout computed");
        Ok(Placement::new(positions, 1))
    }
}
