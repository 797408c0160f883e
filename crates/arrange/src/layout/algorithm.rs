//! The layout algorithm plugin contract.
//!
//! Implementors only provide [`LayoutAlgorithm::compute_positions`]; the
//! provided [`LayoutAlgorithm::layout`] method runs the fixed pipeline around
//! it:
//!
//! 1. validate the configuration,
//! 2. build the filtered [`LayoutGraph`] view,
//! 3. compute raw positions,
//! 4. normalize positions to the configured margin,
//! 5. compute bounds from node footprints,
//! 6. draw edge paths.

use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, trace};
use rand::rngs::StdRng;

use arrange_core::{geometry::Point, graph::Graph};

use crate::{
    config::{AlgorithmOptions, LayoutConfig},
    error::LayoutError,
    layout::{self, EdgePath, LayoutResult, LayoutStats},
    structure::LayoutGraph,
};

/// Random source threaded through every algorithm.
pub type LayoutRng = StdRng;

/// Raw output of an algorithm before post-processing.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    positions: IndexMap<String, Point>,
    iterations: usize,
}

impl Placement {
    pub fn new(positions: IndexMap<String, Point>, iterations: usize) -> Self {
        Self {
            positions,
            iterations,
        }
    }

    pub fn positions(&self) -> &IndexMap<String, Point> {
        &self.positions
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// A pluggable layout algorithm.
pub trait LayoutAlgorithm {
    /// Registry name, e.g. `force-directed`.
    fn name(&self) -> &str;

    /// Short human readable description.
    fn description(&self) -> &str;

    /// Computes a position for every node in `graph`.
    ///
    /// Positions may be arbitrary (negative, non-finite); the pipeline
    /// normalizes them afterwards. A node missing from the returned map
    /// fails the run.
    fn compute_positions(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        rng: &mut LayoutRng,
    ) -> Result<Placement, LayoutError>;

    /// Parameters the algorithm reads from [`LayoutConfig::options`], with
    /// their default values.
    fn default_options(&self) -> AlgorithmOptions {
        AlgorithmOptions::default()
    }

    fn supports_animation(&self) -> bool {
        false
    }

    fn supports_constraints(&self) -> bool {
        false
    }

    /// Checks algorithm-specific options, returning the reason on failure.
    fn validate_options(&self, _options: &AlgorithmOptions) -> Result<(), String> {
        Ok(())
    }

    /// Returns true when `config` selects this algorithm with valid options.
    fn validate_config(&self, config: &LayoutConfig) -> bool {
        config.algorithm() == Some(self.name()) && self.validate_options(config.options()).is_ok()
    }

    /// Draws edge paths once final positions are known.
    fn edge_paths(
        &self,
        graph: &LayoutGraph<'_>,
        positions: &IndexMap<String, Point>,
    ) -> IndexMap<String, EdgePath> {
        layout::straight_edge_paths(graph, positions)
    }

    /// Runs the full layout pipeline.
    ///
    /// The returned statistics carry the measured duration and the
    /// algorithm's iteration count; quality and crossings are left at zero
    /// for the caller to score.
    fn layout(
        &self,
        graph: &Graph,
        config: &LayoutConfig,
        rng: &mut LayoutRng,
    ) -> Result<LayoutResult, LayoutError> {
        let started = Instant::now();

        if config.algorithm() != Some(self.name()) {
            return Err(LayoutError::InvalidConfig {
                algorithm: self.name().to_string(),
                reason: format!(
                    "configuration selects `{}`",
                    config.algorithm().unwrap_or_default()
                ),
            });
        }
        self.validate_options(config.options())
            .map_err(|reason| LayoutError::InvalidConfig {
                algorithm: self.name().to_string(),
                reason,
            })?;

        let view = LayoutGraph::new(graph);
        trace!(
            algorithm = self.name(),
            nodes = view.node_count(),
            edges = view.edge_count();
            "Prepared layout graph"
        );

        let placement = self.compute_positions(&view, config, rng)?;

        let mut positions = IndexMap::with_capacity(view.node_count());
        for (id, _) in view.nodes() {
            let position = placement.positions().get(id).ok_or_else(|| {
                LayoutError::Computation(format!("no position computed for node `{id}`"))
            })?;
            positions.insert(id.to_string(), *position);
        }
        layout::normalize_positions(&mut positions, config.margin());

        let edge_paths = self.edge_paths(&view, &positions);
        let footprints = layout::footprints(&view);
        let stats = LayoutStats::new(started.elapsed(), placement.iterations(), 0.0, 0);
        let result = LayoutResult::new(positions, edge_paths, footprints, stats);

        debug!(
            algorithm = self.name(),
            nodes = result.node_positions().len(),
            iterations = placement.iterations();
            "Layout computed"
        );
        Ok(result)
    }
}
