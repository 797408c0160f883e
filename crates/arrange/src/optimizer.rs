//! Scoring and post-hoc refinement of layout results.
//!
//! [`LayoutOptimizer`] holds no state between calls. Its read-only scoring
//! functions are what the engine uses to fill in result statistics, and
//! [`LayoutOptimizer::optimize`] derives an improved result by applying a
//! list of [`Objective`]s in order.

use indexmap::IndexMap;
use log::{debug, trace};
use rand::Rng;

use arrange_core::geometry::{Point, Segment, count_crossings};

use crate::{
    config::{Objective, OptimizationOptions},
    layout::{self, EdgePath, LayoutResult, LayoutStats, algorithm::LayoutRng},
};

/// Footprint assumed per node when judging area efficiency.
const IDEAL_CELL_AREA: f32 = 100.0 * 100.0;
/// Edge length at which the length penalty saturates.
const EDGE_LENGTH_SCALE: f32 = 200.0;
/// Tolerance for two nodes to count as mirrored around the centroid.
const SYMMETRY_TOLERANCE: f32 = 10.0;
/// Distance from a centroid axis within which nodes snap onto it.
const SNAP_DISTANCE: f32 = 20.0;
const COMPACTION_FACTOR: f32 = 0.8;
const EDGE_JITTER: f32 = 5.0;
const MIN_READABLE_SPACING: f32 = 120.0;

/// Stateless layout scorer and refiner.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOptimizer;

impl LayoutOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Overall quality of a result in `[0, 1]`.
    ///
    /// Starts from 1, loses 0.1 per crossing, is scaled by area efficiency,
    /// gains 0.1 times the symmetry score and loses up to 0.2 for long edges.
    pub fn calculate_quality(&self, result: &LayoutResult) -> f32 {
        let mut quality = 1.0 - 0.1 * self.detect_crossings(result) as f32;
        quality *= self.area_efficiency(result);
        quality += 0.1 * self.evaluate_symmetry(result);
        quality -= 0.2 * (self.average_edge_length(result) / EDGE_LENGTH_SCALE).min(1.0);

        if quality.is_finite() {
            quality.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Number of crossing edge pairs, each unordered pair counted once.
    ///
    /// Each edge is reduced to the segment between the first and last point
    /// of its path. Segments that touch count as crossing, including edges
    /// meeting at a shared node.
    pub fn detect_crossings(&self, result: &LayoutResult) -> usize {
        let chords: Vec<Segment> = result
            .edge_paths()
            .values()
            .filter_map(EdgePath::chord)
            .collect();
        count_crossings(&chords)
    }

    /// Area of the result's bounding box.
    pub fn calculate_area(&self, result: &LayoutResult) -> f32 {
        result.bounds().area()
    }

    /// Ratio of the ideal area (100×100 per node) to the actual area, at most 1.
    pub fn area_efficiency(&self, result: &LayoutResult) -> f32 {
        let ideal = result.node_positions().len() as f32 * IDEAL_CELL_AREA;
        if ideal <= 0.0 {
            return 1.0;
        }
        ideal / self.calculate_area(result).max(ideal)
    }

    /// Mean straight-line length of all edge paths, 0 without edges.
    pub fn average_edge_length(&self, result: &LayoutResult) -> f32 {
        let lengths: Vec<f32> = result
            .edge_paths()
            .values()
            .filter_map(EdgePath::chord)
            .map(Segment::length)
            .collect();
        if lengths.is_empty() {
            return 0.0;
        }
        lengths.iter().sum::<f32>() / lengths.len() as f32
    }

    /// Fraction of node pairs that mirror each other around the centroid.
    ///
    /// A pair scores when both nodes share a row (within 10 units) and sit
    /// at the same horizontal distance from the centroid, or share a column
    /// and sit at the same vertical distance.
    pub fn evaluate_symmetry(&self, result: &LayoutResult) -> f32 {
        let positions: Vec<Point> = result.node_positions().values().copied().collect();
        let Some(center) = centroid(&positions) else {
            return 0.0;
        };

        let mut pairs = 0usize;
        let mut symmetric = 0usize;
        for (i, first) in positions.iter().enumerate() {
            for second in &positions[i + 1..] {
                pairs += 1;
                if mirrored(*first, *second, center) {
                    symmetric += 1;
                }
            }
        }
        if pairs == 0 {
            0.0
        } else {
            symmetric as f32 / pairs as f32
        }
    }

    /// Central scoring used to fill in result statistics.
    pub(crate) fn rescore(&self, result: LayoutResult, stats: LayoutStats) -> LayoutResult {
        let scored = LayoutStats::new(
            stats.duration(),
            stats.iterations(),
            self.calculate_quality(&result),
            self.detect_crossings(&result),
        );
        result.with_stats(scored)
    }

    /// Applies each objective in order and returns the refined result.
    ///
    /// Edge paths are redrawn as straight lines, positions are shifted back
    /// inside the margin, and quality and crossings are recomputed.
    pub fn optimize(
        &self,
        result: &LayoutResult,
        options: &OptimizationOptions,
        rng: &mut LayoutRng,
    ) -> LayoutResult {
        let mut current = result.clone();
        for objective in options.objectives() {
            let positions = match objective {
                Objective::MinimizeCrossings => {
                    let (best, trials) = self.search_crossings(&current, options, rng);
                    trace!(trials = trials; "Crossing search finished");
                    best
                }
                Objective::MinimizeArea => compact(current.node_positions()),
                Objective::MaximizeSymmetry => snap_to_axes(current.node_positions()),
                Objective::MinimizeEdgeLength => jitter(current.node_positions(), rng),
                Objective::MaximizeReadability => spread_apart(current.node_positions()),
            };
            current = current.with_positions(positions);
        }

        let mut positions = current.node_positions().clone();
        layout::normalize_positions(&mut positions, options.margin());
        let optimized = current.with_positions(positions);
        let optimized = self.rescore(optimized, *result.stats());

        debug!(
            objectives = options.objectives().len(),
            crossings = optimized.stats().crossings(),
            quality = optimized.stats().quality_score();
            "Layout optimized"
        );
        optimized
    }

    /// Randomly swaps node positions, keeping swaps that do not add crossings.
    ///
    /// Returns the best positions and the number of trials run. Stops when
    /// no crossings remain, after `max_iterations` trials, or, if
    /// `stop_on_equal_trial` is set, as soon as a later trial ties the best
    /// count within the convergence threshold.
    fn search_crossings(
        &self,
        result: &LayoutResult,
        options: &OptimizationOptions,
        rng: &mut LayoutRng,
    ) -> (IndexMap<String, Point>, usize) {
        let mut best = result.node_positions().clone();
        let mut best_crossings = self.detect_crossings(result);
        let mut trials = 0;

        for iteration in 0..options.max_iterations() {
            if best_crossings == 0 || best.len() < 2 {
                break;
            }
            trials += 1;

            let mut trial = best.clone();
            let first = rng.random_range(0..trial.len());
            let mut second = rng.random_range(0..trial.len() - 1);
            if second >= first {
                second += 1;
            }
            swap_positions(&mut trial, first, second);

            let trial_crossings = self.detect_crossings(&result.with_positions(trial.clone()));
            if trial_crossings <= best_crossings {
                best = trial;
                best_crossings = trial_crossings;
            }

            let gap = best_crossings.abs_diff(trial_crossings) as f32;
            if options.stop_on_equal_trial()
                && iteration > 0
                && gap < options.convergence_threshold()
            {
                break;
            }
        }
        (best, trials)
    }
}

fn centroid(positions: &[Point]) -> Option<Point> {
    if positions.is_empty() {
        return None;
    }
    let sum = positions
        .iter()
        .fold(Point::default(), |acc, position| acc.add_point(*position));
    Some(sum.scale(1.0 / positions.len() as f32))
}

fn mirrored(first: Point, second: Point, center: Point) -> bool {
    let horizontal = (first.y() - second.y()).abs() < SYMMETRY_TOLERANCE
        && ((first.x() - center.x()).abs() - (second.x() - center.x()).abs()).abs()
            < SYMMETRY_TOLERANCE;
    let vertical = (first.x() - second.x()).abs() < SYMMETRY_TOLERANCE
        && ((first.y() - center.y()).abs() - (second.y() - center.y()).abs()).abs()
            < SYMMETRY_TOLERANCE;
    horizontal || vertical
}

fn swap_positions(positions: &mut IndexMap<String, Point>, first: usize, second: usize) {
    let (Some(a), Some(b)) = (
        positions.get_index(first).map(|(_, position)| *position),
        positions.get_index(second).map(|(_, position)| *position),
    ) else {
        return;
    };
    if let Some((_, slot)) = positions.get_index_mut(first) {
        *slot = b;
    }
    if let Some((_, slot)) = positions.get_index_mut(second) {
        *slot = a;
    }
}

/// Scales all positions by 80% toward their top-left extreme.
fn compact(positions: &IndexMap<String, Point>) -> IndexMap<String, Point> {
    let Some(origin) = positions
        .values()
        .copied()
        .reduce(|a, b| Point::new(a.x().min(b.x()), a.y().min(b.y())))
    else {
        return positions.clone();
    };
    positions
        .iter()
        .map(|(id, position)| {
            let offset = position.sub_point(origin).scale(COMPACTION_FACTOR);
            (id.clone(), origin.add_point(offset))
        })
        .collect()
}

/// Snaps nodes close to the centroid row or column exactly onto it.
fn snap_to_axes(positions: &IndexMap<String, Point>) -> IndexMap<String, Point> {
    let points: Vec<Point> = positions.values().copied().collect();
    let Some(center) = centroid(&points) else {
        return positions.clone();
    };
    positions
        .iter()
        .map(|(id, position)| {
            let mut snapped = *position;
            if (position.x() - center.x()).abs() < SNAP_DISTANCE {
                snapped = snapped.with_x(center.x());
            }
            if (position.y() - center.y()).abs() < SNAP_DISTANCE {
                snapped = snapped.with_y(center.y());
            }
            (id.clone(), snapped)
        })
        .collect()
}

/// Nudges every node by a small random offset.
// TODO: replace with a gradient step along connected edges once edge weights are available.
fn jitter(positions: &IndexMap<String, Point>, rng: &mut LayoutRng) -> IndexMap<String, Point> {
    positions
        .iter()
        .map(|(id, position)| {
            let offset = Point::new(
                rng.random_range(-EDGE_JITTER..EDGE_JITTER),
                rng.random_range(-EDGE_JITTER..EDGE_JITTER),
            );
            (id.clone(), position.add_point(offset))
        })
        .collect()
}

/// Pushes node pairs closer than the readable spacing apart.
///
/// Pairs are processed in order and each push sees the positions left by
/// the previous ones.
fn spread_apart(positions: &IndexMap<String, Point>) -> IndexMap<String, Point> {
    let mut spread = positions.clone();
    let count = spread.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (Some((_, first)), Some((_, second))) = (spread.get_index(i), spread.get_index(j))
            else {
                continue;
            };
            let (first, second) = (*first, *second);
            let delta = second.sub_point(first);
            let distance = delta.hypot();
            if distance <= 0.0 || distance >= MIN_READABLE_SPACING {
                continue;
            }
            let push = delta.scale((MIN_READABLE_SPACING - distance) / 2.0 / distance);
            if let Some((_, slot)) = spread.get_index_mut(i) {
                *slot = first.sub_point(push);
            }
            if let Some((_, slot)) = spread.get_index_mut(j) {
                *slot = second.add_point(push);
            }
        }
    }
    spread
}
