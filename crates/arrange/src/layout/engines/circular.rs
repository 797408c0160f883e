//! Ring layout for cyclic flows.
//!
//! Nodes are spaced evenly around a single circle in input order, starting
//! at angle zero and turning clockwise in screen coordinates.

use std::f32::consts::TAU;

use indexmap::IndexMap;
use log::debug;

use arrange_core::geometry::Point;

use crate::{
    config::{AlgorithmOptions, LayoutConfig},
    error::LayoutError,
    layout::algorithm::{LayoutAlgorithm, LayoutRng, Placement},
    structure::LayoutGraph,
};

const RADIUS: &str = "radius";
const DEFAULT_RADIUS: f32 = 200.0;

/// Places every node on one circle.
#[derive(Debug, Clone, Default)]
pub struct CircularLayout;

impl CircularLayout {
    /// Registry name of this algorithm.
    pub const NAME: &'static str = "circular";

    pub fn new() -> Self {
        Self
    }
}

impl LayoutAlgorithm for CircularLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Spaces nodes evenly around a circle"
    }

    fn default_options(&self) -> AlgorithmOptions {
        AlgorithmOptions::new().with(RADIUS, DEFAULT_RADIUS)
    }

    fn validate_options(&self, options: &AlgorithmOptions) -> Result<(), String> {
        match options.get(RADIUS) {
            Some(radius) if !(radius.is_finite() && radius > 0.0) => {
                Err(format!("`{RADIUS}` must be a positive number, got {radius}"))
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
        let radius = config.options().get(RADIUS).unwrap_or(DEFAULT_RADIUS);
        let count = graph.node_count();

        let positions: IndexMap<String, Point> = graph
            .nodes()
            .enumerate()
            .map(|(index, (id, _))| {
                let angle = TAU * index as f32 / count as f32;
                (
                    id.to_string(),
                    Point::new(radius * angle.cos(), radius * angle.sin()),
                )
            })
            .collect();

        debug!(nodes = count, radius = radius; "Circular layout computed");
        Ok(Placement::new(positions, 1))
    }
}
