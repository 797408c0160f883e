//! Layout results and the shared post-processing steps.
//!
//! Every algorithm produces raw positions; the helpers here turn them into
//! a [`LayoutResult`]: coordinates are sanitized and shifted so the layout
//! keeps its margin, bounds are computed from node footprints, and edges
//! receive straight two-point paths.

pub mod algorithm;
pub mod engines;

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use arrange_core::geometry::{Bounds, Point, Segment, Size};

use crate::structure::LayoutGraph;

/// Route of one edge through the layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePath {
    source: String,
    target: String,
    points: Vec<Point>,
}

impl EdgePath {
    pub fn new(source: impl Into<String>, target: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            points,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Straight segment between the first and last point, if there are two.
    pub fn chord(&self) -> Option<Segment> {
        match (self.points.first(), self.points.last()) {
            (Some(start), Some(end)) if self.points.len() >= 2 => Some(Segment::new(*start, *end)),
            _ => None,
        }
    }
}

/// Statistics describing a layout run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LayoutStats {
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    duration: Duration,
    iterations: usize,
    quality_score: f32,
    crossings: usize,
}

impl LayoutStats {
    pub fn new(duration: Duration, iterations: usize, quality_score: f32, crossings: usize) -> Self {
        Self {
            duration,
            iterations,
            quality_score,
            crossings,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Overall quality in `[0, 1]`.
    pub fn quality_score(&self) -> f32 {
        self.quality_score
    }

    pub fn crossings(&self) -> usize {
        self.crossings
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Positions, edge paths, bounds and statistics for a laid-out graph.
///
/// Results are immutable; the optimizer and the engine derive new results
/// instead of editing one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    node_positions: IndexMap<String, Point>,
    edge_paths: IndexMap<String, EdgePath>,
    footprints: IndexMap<String, Size>,
    bounds: Bounds,
    stats: LayoutStats,
}

impl LayoutResult {
    pub(crate) fn new(
        node_positions: IndexMap<String, Point>,
        edge_paths: IndexMap<String, EdgePath>,
        footprints: IndexMap<String, Size>,
        stats: LayoutStats,
    ) -> Self {
        let bounds = compute_bounds(&node_positions, &footprints);
        Self {
            node_positions,
            edge_paths,
            footprints,
            bounds,
            stats,
        }
    }

    /// Top-left position of every laid-out node, in input order.
    pub fn node_positions(&self) -> &IndexMap<String, Point> {
        &self.node_positions
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node_positions.get(id).copied()
    }

    pub fn edge_paths(&self) -> &IndexMap<String, EdgePath> {
        &self.edge_paths
    }

    /// Footprint assumed for each node when computing bounds.
    pub fn footprints(&self) -> &IndexMap<String, Size> {
        &self.footprints
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    /// Derives a result with new positions.
    ///
    /// Edge paths are redrawn as straight lines and bounds are recomputed.
    pub(crate) fn with_positions(&self, node_positions: IndexMap<String, Point>) -> Self {
        let edge_paths = self
            .edge_paths
            .iter()
            .filter_map(|(id, path)| {
                let start = node_positions.get(path.source())?;
                let end = node_positions.get(path.target())?;
                let redrawn = EdgePath::new(path.source(), path.target(), vec![*start, *end]);
                Some((id.clone(), redrawn))
            })
            .collect();
        Self::new(node_positions, edge_paths, self.footprints.clone(), self.stats)
    }

    /// Derives a result with replaced statistics.
    pub(crate) fn with_stats(mut self, stats: LayoutStats) -> Self {
        self.stats = stats;
        self
    }
}

/// Replaces non-finite coordinates with zero and shifts each axis so its
/// minimum is at least `margin`.
///
/// Axes already at or beyond the margin are left untouched, so a layout
/// that satisfies the margin is a fixed point.
pub(crate) fn normalize_positions(positions: &mut IndexMap<String, Point>, margin: f32) {
    if positions.is_empty() {
        return;
    }
    for position in positions.values_mut() {
        *position = position.finite_or_zero();
    }

    let min_x = positions.values().map(|p| p.x()).fold(f32::INFINITY, f32::min);
    let min_y = positions.values().map(|p| p.y()).fold(f32::INFINITY, f32::min);
    let shift = Point::new(
        if min_x < margin { margin - min_x } else { 0.0 },
        if min_y < margin { margin - min_y } else { 0.0 },
    );
    if shift.is_zero() {
        return;
    }
    for position in positions.values_mut() {
        *position = position.add_point(shift);
    }
}

/// Smallest rectangle enclosing every node footprint.
///
/// Nodes without a recorded footprint contribute only their position.
pub(crate) fn compute_bounds(
    positions: &IndexMap<String, Point>,
    footprints: &IndexMap<String, Size>,
) -> Bounds {
    positions
        .iter()
        .map(|(id, position)| {
            let size = footprints.get(id).copied().unwrap_or_default();
            position.to_bounds(size)
        })
        .reduce(|acc, bounds| acc.merge(&bounds))
        .unwrap_or_default()
}

/// Footprints of every node in the view, keyed by id.
pub(crate) fn footprints(graph: &LayoutGraph<'_>) -> IndexMap<String, Size> {
    graph
        .nodes()
        .map(|(id, node)| (id.to_string(), node.kind().footprint()))
        .collect()
}

/// Straight two-point paths for every edge whose endpoints were placed.
pub(crate) fn straight_edge_paths(
    graph: &LayoutGraph<'_>,
    positions: &IndexMap<String, Point>,
) -> IndexMap<String, EdgePath> {
    graph
        .edges()
        .filter_map(|(id, edge)| {
            let start = positions.get(edge.source())?;
            let end = positions.get(edge.target())?;
            let path = EdgePath::new(edge.source(), edge.target(), vec![*start, *end]);
            Some((id.to_string(), path))
        })
        .collect()
}
