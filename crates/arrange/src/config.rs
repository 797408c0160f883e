//! Configuration types for layout and optimization runs.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! external sources; every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and optimization settings.
//! - [`LayoutConfig`] - Selects an algorithm and carries spacing, direction and constraints.
//! - [`Constraints`] - Caller-supplied restrictions an algorithm may honor.
//! - [`AlgorithmOptions`] - Open, algorithm-specific numeric parameters.
//! - [`OptimizationOptions`] - Objectives and limits for [`LayoutOptimizer`](crate::LayoutOptimizer).
//!
//! # Example
//!
//! ```
//! # use arrange::config::{Direction, LayoutConfig};
//! let config = LayoutConfig::new("force-directed")
//!     .with_direction(Direction::LeftRight)
//!     .with_option("iterations", 150.0);
//! assert_eq!(config.algorithm(), Some("force-directed"));
//! assert_eq!(config.options().get_usize("iterations"), Some(150));
//! ```

use std::{collections::BTreeSet, time::Duration};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use arrange_core::geometry::Bounds;

/// Default distance kept between the layout and the top-left origin.
pub const DEFAULT_MARGIN: f32 = 50.0;

/// Top-level configuration combining layout and optimization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Optimization configuration section.
    #[serde(default)]
    optimization: OptimizationOptions,

    /// Seed for the engine's random source; unseeded when absent.
    #[serde(default)]
    seed: Option<u64>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, optimization: OptimizationOptions) -> Self {
        Self {
            layout,
            optimization,
            seed: None,
        }
    }

    /// Sets the random seed (builder style).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the optimization configuration.
    pub fn optimization(&self) -> &OptimizationOptions {
        &self.optimization
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Flow direction of a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB", alias = "top-bottom")]
    TopBottom,
    #[serde(rename = "BT", alias = "bottom-top")]
    BottomTop,
    #[serde(rename = "LR", alias = "left-right")]
    LeftRight,
    #[serde(rename = "RL", alias = "right-left")]
    RightLeft,
}

impl Direction {
    /// Returns true when levels advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }
}

/// Spacing between neighbouring nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for NodeSpacing {
    fn default() -> Self {
        Self {
            horizontal: 150.0,
            vertical: 100.0,
        }
    }
}

/// Axis shared by the members of an [`AlignmentGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Nodes that should share a row or column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGroup {
    pub axis: Axis,
    pub nodes: Vec<String>,
}

/// Nodes that belong together visually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGroup {
    pub id: String,
    pub nodes: Vec<String>,
}

/// Pairwise distance limits between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    pub first: String,
    pub second: String,
    #[serde(default)]
    pub min: Option<f32>,
    #[serde(default)]
    pub max: Option<f32>,
}

/// Whether a boundary keeps nodes inside or outside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Inclusion,
    Exclusion,
}

/// A rectangle that constrains where nodes may be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConstraint {
    pub kind: BoundaryKind,
    pub bounds: Bounds,
    /// Nodes affected; empty means every node.
    #[serde(default)]
    pub nodes: Vec<String>,
}

/// Caller-supplied restrictions a layout algorithm may honor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    fixed_nodes: BTreeSet<String>,
    alignment: Vec<AlignmentGroup>,
    groups: Vec<NodeGroup>,
    distances: Vec<DistanceConstraint>,
    boundaries: Vec<BoundaryConstraint>,
}

impl Constraints {
    /// Marks the given nodes as fixed (builder style).
    pub fn with_fixed_nodes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fixed_nodes.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_alignment(mut self, group: AlignmentGroup) -> Self {
        self.alignment.push(group);
        self
    }

    pub fn with_group(mut self, group: NodeGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_distance(mut self, constraint: DistanceConstraint) -> Self {
        self.distances.push(constraint);
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryConstraint) -> Self {
        self.boundaries.push(boundary);
        self
    }

    pub fn is_fixed(&self, id: &str) -> bool {
        self.fixed_nodes.contains(id)
    }

    pub fn fixed_nodes(&self) -> &BTreeSet<String> {
        &self.fixed_nodes
    }

    pub fn alignment(&self) -> &[AlignmentGroup] {
        &self.alignment
    }

    pub fn groups(&self) -> &[NodeGroup] {
        &self.groups
    }

    pub fn distances(&self) -> &[DistanceConstraint] {
        &self.distances
    }

    pub fn boundaries(&self) -> &[BoundaryConstraint] {
        &self.boundaries
    }

    /// Returns true when no constraint of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.fixed_nodes.is_empty()
            && self.alignment.is_empty()
            && self.groups.is_empty()
            && self.distances.is_empty()
            && self.boundaries.is_empty()
    }
}

/// Open bag of algorithm-specific numeric parameters.
///
/// Keys are snake_case parameter names such as `iterations` or
/// `spring_length`; each algorithm documents the keys it reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgorithmOptions(IndexMap<String, f32>);

impl AlgorithmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter (builder style).
    pub fn with(mut self, key: impl Into<String>, value: f32) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f32) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.0.get(key).copied()
    }

    /// Reads a parameter as a count; negative or non-finite values yield `None`.
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value.round() as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// Configuration for a single layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    algorithm: Option<String>,
    direction: Direction,
    node_spacing: NodeSpacing,
    level_spacing: f32,
    animate: bool,
    #[serde(with = "duration_millis")]
    animation_duration: Duration,
    preserve_positions: bool,
    margin: f32,
    constraints: Constraints,
    options: AlgorithmOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: None,
            direction: Direction::default(),
            node_spacing: NodeSpacing::default(),
            level_spacing: 120.0,
            animate: false,
            animation_duration: Duration::from_millis(300),
            preserve_positions: false,
            margin: DEFAULT_MARGIN,
            constraints: Constraints::default(),
            options: AlgorithmOptions::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a configuration selecting the named algorithm.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            ..Self::default()
        }
    }

    /// Selects a different algorithm, keeping every other setting.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_node_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.node_spacing = NodeSpacing {
            horizontal,
            vertical,
        };
        self
    }

    pub fn with_level_spacing(mut self, spacing: f32) -> Self {
        self.level_spacing = spacing;
        self
    }

    pub fn with_animation(mut self, duration: Duration) -> Self {
        self.animate = true;
        self.animation_duration = duration;
        self
    }

    pub fn with_preserve_positions(mut self, preserve: bool) -> Self {
        self.preserve_positions = preserve;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets a single algorithm-specific parameter.
    pub fn with_option(mut self, key: impl Into<String>, value: f32) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn with_options(mut self, options: AlgorithmOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the selected algorithm, if any.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref().filter(|name| !name.is_empty())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node_spacing(&self) -> NodeSpacing {
        self.node_spacing
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn animate(&self) -> bool {
        self.animate
    }

    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    pub fn preserve_positions(&self) -> bool {
        self.preserve_positions
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn options(&self) -> &AlgorithmOptions {
        &self.options
    }

    /// Returns true when the node keeps its incoming position.
    ///
    /// A node is pinned only if it is listed as fixed *and* positions are
    /// being preserved.
    pub fn is_pinned(&self, id: &str) -> bool {
        self.preserve_positions && self.constraints.is_fixed(id)
    }
}

/// A refinement strategy applied by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    MinimizeCrossings,
    MinimizeArea,
    MaximizeSymmetry,
    MinimizeEdgeLength,
    MaximizeReadability,
}

/// Objectives and limits for a layout optimization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationOptions {
    objectives: Vec<Objective>,
    max_iterations: usize,
    convergence_threshold: f32,
    /// Stop the crossing search as soon as a trial ties the best count.
    stop_on_equal_trial: bool,
    margin: f32,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            objectives: Vec::new(),
            max_iterations: 100,
            convergence_threshold: 0.01,
            stop_on_equal_trial: true,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl OptimizationOptions {
    pub fn new(objectives: Vec<Objective>) -> Self {
        Self {
            objectives,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f32) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_stop_on_equal_trial(mut self, stop: bool) -> Self {
        self.stop_on_equal_trial = stop;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn convergence_threshold(&self) -> f32 {
        self.convergence_threshold
    }

    pub fn stop_on_equal_trial(&self) -> bool {
        self.stop_on_equal_trial
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

/// (De)serializes a [`Duration`] as whole milliseconds.
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.algorithm(), None);
        assert_eq!(config.direction(), Direction::TopBottom);
        assert_eq!(config.margin(), DEFAULT_MARGIN);
        assert_eq!(config.animation_duration(), Duration::from_millis(300));
        assert!(!config.preserve_positions());
        assert!(config.constraints().is_empty());
        assert!(config.options().is_empty());
    }

    #[test]
    fn test_empty_algorithm_name_is_missing() {
        let config = LayoutConfig::new("");
        assert_eq!(config.algorithm(), None);
    }

    #[test]
    fn test_pinned_requires_preserve_positions() {
        let constraints = Constraints::default().with_fixed_nodes(["a"]);
        let config = LayoutConfig::new("force-directed").with_constraints(constraints);
        assert!(!config.is_pinned("a"));

        let config = config.with_preserve_positions(true);
        assert!(config.is_pinned("a"));
        assert!(!config.is_pinned("b"));
    }

    #[test]
    fn test_algorithm_options_accessors() {
        let options = AlgorithmOptions::new()
            .with("iterations", 42.4)
            .with("damping", 0.5)
            .with("negative", -3.0);
        assert_eq!(options.get_usize("iterations"), Some(42));
        assert_eq!(options.get("damping"), Some(0.5));
        assert_eq!(options.get_usize("negative"), None);
        assert_eq!(options.get("missing"), None);
        assert_eq!(options.iter().count(), 3);
    }

    #[test]
    fn test_layout_config_deserialize() {
        let json = r#"{
            "algorithm": "force-directed",
            "direction": "LR",
            "node_spacing": {"horizontal": 80.0},
            "animation_duration": 500,
            "preserve_positions": true,
            "constraints": {
                "fixed_nodes": ["start"],
                "boundaries": [
                    {"kind": "inclusion", "bounds": {"x": 0.0, "y": 0.0, "width": 800.0, "height": 600.0}}
                ]
            },
            "options": {"iterations": 120, "spring_length": 80.5}
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).expect("config parses");
        assert_eq!(config.algorithm(), Some("force-directed"));
        assert_eq!(config.direction(), Direction::LeftRight);
        assert_eq!(config.node_spacing().horizontal, 80.0);
        assert_eq!(config.node_spacing().vertical, 100.0);
        assert_eq!(config.level_spacing(), 120.0);
        assert_eq!(config.animation_duration(), Duration::from_millis(500));
        assert!(config.is_pinned("start"));
        assert_eq!(config.constraints().boundaries().len(), 1);
        assert_eq!(config.options().get_usize("iterations"), Some(120));
        assert_eq!(config.options().get("spring_length"), Some(80.5));
    }

    #[test]
    fn test_direction_aliases() {
        let direction: Direction = serde_json::from_str(r#""right-left""#).expect("alias parses");
        assert_eq!(direction, Direction::RightLeft);
        assert!(direction.is_horizontal());
        assert!(!Direction::BottomTop.is_horizontal());
    }

    #[test]
    fn test_optimization_options_deserialize() {
        let json = r#"{"objectives": ["minimize-crossings", "maximize-readability"], "max_iterations": 10}"#;
        let options: OptimizationOptions = serde_json::from_str(json).expect("options parse");
        assert_eq!(
            options.objectives(),
            &[Objective::MinimizeCrossings, Objective::MaximizeReadability]
        );
        assert_eq!(options.max_iterations(), 10);
        assert_eq!(options.convergence_threshold(), 0.01);
        assert!(options.stop_on_equal_trial());
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().algorithm(), None);
        assert!(config.optimization().objectives().is_empty());
        assert_eq!(config.seed(), None);
        assert_eq!(AppConfig::default().with_seed(7).seed(), Some(7));
    }
}
