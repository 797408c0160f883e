//! The layout orchestrator.
//!
//! [`AutoLayoutEngine`] is the single entry point hosts use: it validates a
//! configuration, dispatches to the registered algorithm, scores the result
//! centrally, records it in the history and notifies listeners. Engines are
//! plain values owned by the caller; nothing is shared between instances.

use std::{fmt, time::Instant};

use log::{debug, info, warn};
use rand::SeedableRng;

use arrange_core::graph::{Graph, NodeKind};

use crate::{
    analysis::{GraphAnalysis, StructureAnalyzer, TopologyAnalyzer},
    config::{Direction, LayoutConfig, OptimizationOptions},
    error::LayoutError,
    events::{EventBus, LayoutEvent},
    history::{DEFAULT_HISTORY_CAPACITY, LayoutHistory},
    layout::{
        LayoutResult, LayoutStats,
        algorithm::{LayoutAlgorithm, LayoutRng},
        engines::{AlgorithmRegistry, BuiltinAlgorithm, HierarchicalLayout},
    },
    optimizer::LayoutOptimizer,
    templates::{LayoutTemplate, TemplateLibrary},
};

/// A candidate configuration ranked for a particular graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSuggestion {
    algorithm: BuiltinAlgorithm,
    config: LayoutConfig,
    score: f32,
    reason: String,
}

impl LayoutSuggestion {
    fn new(algorithm: BuiltinAlgorithm, config: LayoutConfig, score: f32, reason: &str) -> Self {
        Self {
            algorithm,
            config,
            score,
            reason: reason.to_string(),
        }
    }

    pub fn algorithm(&self) -> BuiltinAlgorithm {
        self.algorithm
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Suitability in `[0, 1]`.
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Builder for configuring an [`AutoLayoutEngine`].
///
/// The built engine always starts with every builtin algorithm registered.
pub struct EngineBuilder {
    seed: Option<u64>,
    analyzer: Box<dyn StructureAnalyzer>,
    history_capacity: usize,
    registry: AlgorithmRegistry,
    templates: TemplateLibrary,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            seed: None,
            analyzer: Box::new(TopologyAnalyzer::new()),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            registry: AlgorithmRegistry::with_builtins(),
            templates: TemplateLibrary::default(),
        }
    }

    /// Seed the random source so runs are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the structural analyzer used for suggestions
    pub fn with_analyzer(mut self, analyzer: impl StructureAnalyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Set how many committed layouts the history keeps
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Register an additional algorithm
    pub fn with_algorithm(mut self, algorithm: impl LayoutAlgorithm + 'static) -> Self {
        self.registry.register(Box::new(algorithm));
        self
    }

    /// Replace the template library
    pub fn with_templates(mut self, templates: TemplateLibrary) -> Self {
        self.templates = templates;
        self
    }

    pub fn build(self) -> AutoLayoutEngine {
        let rng = match self.seed {
            Some(seed) => LayoutRng::seed_from_u64(seed),
            None => LayoutRng::from_os_rng(),
        };
        AutoLayoutEngine {
            registry: self.registry,
            optimizer: LayoutOptimizer::new(),
            history: LayoutHistory::with_capacity(self.history_capacity),
            templates: self.templates,
            analyzer: self.analyzer,
            events: EventBus::new(),
            rng,
        }
    }
}

/// Selects, runs and scores layout algorithms.
pub struct AutoLayoutEngine {
    registry: AlgorithmRegistry,
    optimizer: LayoutOptimizer,
    history: LayoutHistory,
    templates: TemplateLibrary,
    analyzer: Box<dyn StructureAnalyzer>,
    events: EventBus,
    rng: LayoutRng,
}

impl Default for AutoLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoLayoutEngine {
    /// Creates an engine with the built-in algorithms and templates and an
    /// unseeded random source.
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Registers `algorithm`, replacing any algorithm with the same name.
    pub fn register_algorithm(&mut self, algorithm: impl LayoutAlgorithm + 'static) {
        self.registry.register(Box::new(algorithm));
    }

    pub fn algorithm(&self, name: &str) -> Option<&dyn LayoutAlgorithm> {
        self.registry.get(name)
    }

    pub fn algorithm_names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Returns true when `config` names a registered algorithm that accepts it.
    pub fn validate_config(&self, config: &LayoutConfig) -> bool {
        self.check_config(config).is_ok()
    }

    fn check_config(&self, config: &LayoutConfig) -> Result<&dyn LayoutAlgorithm, LayoutError> {
        let name = config.algorithm().ok_or(LayoutError::MissingAlgorithm)?;
        let algorithm = self
            .registry
            .get(name)
            .ok_or_else(|| LayoutError::UnknownAlgorithm(name.to_string()))?;
        algorithm
            .validate_options(config.options())
            .map_err(|reason| LayoutError::InvalidConfig {
                algorithm: name.to_string(),
                reason,
            })?;
        if !algorithm.validate_config(config) {
            return Err(LayoutError::InvalidConfig {
                algorithm: name.to_string(),
                reason: "rejected by the algorithm".to_string(),
            });
        }
        Ok(algorithm)
    }

    /// Lays out `graph` and commits the result to the history.
    ///
    /// Configuration errors are returned before any work is done. Failures
    /// inside the algorithm are wrapped in [`LayoutError::Execution`] and
    /// reported to `Failed` listeners; no partial result is returned.
    pub fn apply_layout(
        &mut self,
        graph: &Graph,
        config: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError> {
        let name = self.check_config(config)?.name().to_string();
        self.events.emit(LayoutEvent::Started(config));

        match run_layout(&self.registry, &self.optimizer, &mut self.rng, graph, config) {
            Ok(result) => {
                info!(
                    algorithm = name.as_str(),
                    nodes = result.node_positions().len(),
                    quality = result.stats().quality_score(),
                    crossings = result.stats().crossings();
                    "Layout applied"
                );
                self.history.record(config.clone(), result.clone());
                self.events.emit(LayoutEvent::Completed(&result));
                Ok(result)
            }
            Err(err) => {
                let err = LayoutError::execution(name, err);
                warn!(err:% = err; "Layout failed");
                self.events.emit(LayoutEvent::Failed(&err));
                Err(err)
            }
        }
    }

    /// Lays out a copy of `graph` without touching history or listeners.
    pub fn preview_layout(
        &mut self,
        graph: &Graph,
        config: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError> {
        let name = self.check_config(config)?.name().to_string();
        let snapshot = graph.clone();
        run_layout(&self.registry, &self.optimizer, &mut self.rng, &snapshot, config)
            .map_err(|err| LayoutError::execution(name, err))
    }

    /// Lays out `graph` top to bottom with the hierarchical algorithm, then
    /// refines the result with the optimizer.
    pub fn optimize_layout(
        &mut self,
        graph: &Graph,
        options: &OptimizationOptions,
    ) -> Result<LayoutResult, LayoutError> {
        let baseline = LayoutConfig::new(HierarchicalLayout::NAME)
            .with_direction(Direction::TopBottom)
            .with_margin(options.margin());
        let base = self.apply_layout(graph, &baseline)?;
        let optimized = self.optimizer.optimize(&base, options, &mut self.rng);
        debug!(
            before = base.stats().quality_score(),
            after = optimized.stats().quality_score();
            "Baseline layout optimized"
        );
        self.events.emit(LayoutEvent::Optimized(&optimized));
        Ok(optimized)
    }

    /// Ranks candidate configurations for `graph`, best first.
    ///
    /// Candidates with equal scores keep the order in which they were
    /// considered.
    pub fn layout_suggestions(&self, graph: &Graph) -> Vec<LayoutSuggestion> {
        let analysis = self.analyzer.analyze(graph);
        let mut suggestions = rank_suggestions(&analysis);
        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions
    }

    /// Applies the template with id `template_id` to `graph`.
    pub fn apply_template(
        &mut self,
        graph: &Graph,
        template_id: &str,
    ) -> Result<LayoutResult, LayoutError> {
        let config = self
            .templates
            .get(template_id)
            .ok_or_else(|| LayoutError::UnknownTemplate(template_id.to_string()))?
            .config()
            .clone();
        self.apply_layout(graph, &config)
    }

    pub fn history(&self) -> &LayoutHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&LayoutTemplate> {
        self.templates.get(id)
    }

    pub fn templates_for_kind(&self, kind: NodeKind) -> Vec<&LayoutTemplate> {
        self.templates.for_kind(kind).collect()
    }

    pub fn add_template(&mut self, template: LayoutTemplate) {
        self.templates.insert(template);
    }

    pub fn optimizer(&self) -> &LayoutOptimizer {
        &self.optimizer
    }

    /// Event bus for subscribing to layout notifications.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }
}

impl fmt::Debug for AutoLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoLayoutEngine")
            .field("registry", &self.registry)
            .field("history", &self.history.len())
            .field("templates", &self.templates.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Runs the configured algorithm and replaces its statistics with centrally
/// computed ones.
fn run_layout(
    registry: &AlgorithmRegistry,
    optimizer: &LayoutOptimizer,
    rng: &mut LayoutRng,
    graph: &Graph,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let name = config.algorithm().ok_or(LayoutError::MissingAlgorithm)?;
    let algorithm = registry
        .get(name)
        .ok_or_else(|| LayoutError::UnknownAlgorithm(name.to_string()))?;

    let started = Instant::now();
    let result = algorithm.layout(graph, config, rng)?;
    let stats = LayoutStats::new(started.elapsed(), result.stats().iterations(), 0.0, 0);
    Ok(optimizer.rescore(result, stats))
}

fn rank_suggestions(analysis: &GraphAnalysis) -> Vec<LayoutSuggestion> {
    let mut suggestions = Vec::new();
    if analysis.is_hierarchical {
        let direction = analysis.preferred_direction.unwrap_or_default();
        suggestions.push(LayoutSuggestion::new(
            BuiltinAlgorithm::Hierarchical,
            LayoutConfig::new(BuiltinAlgorithm::Hierarchical.as_str()).with_direction(direction),
            0.9,
            "Graph has a clear hierarchy",
        ));
    }
    if analysis.is_tree {
        suggestions.push(LayoutSuggestion::new(
            BuiltinAlgorithm::Tree,
            LayoutConfig::new(BuiltinAlgorithm::Tree.as_str()),
            0.85,
            "Graph is a tree",
        ));
    }
    if analysis.node_count < 20 {
        suggestions.push(LayoutSuggestion::new(
            BuiltinAlgorithm::ForceDirected,
            LayoutConfig::new(BuiltinAlgorithm::ForceDirected.as_str()),
            0.7,
            "Small graph suits a physics-based arrangement",
        ));
    }
    if analysis.has_circular_pattern {
        suggestions.push(LayoutSuggestion::new(
            BuiltinAlgorithm::Circular,
            LayoutConfig::new(BuiltinAlgorithm::Circular.as_str()),
            0.75,
            "Graph contains a small cycle",
        ));
    }
    if analysis.node_count > 50 {
        suggestions.push(LayoutSuggestion::new(
            BuiltinAlgorithm::Grid,
            LayoutConfig::new(BuiltinAlgorithm::Grid.as_str()),
            0.6,
            "Large graph benefits from a regular grid",
        ));
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use arrange_core::{
        geometry::Point,
        graph::{Edge, Node},
    };

    use super::*;
    use crate::{
        config::{Constraints, Objective},
        events::LayoutEventKind,
        layout::algorithm::Placement,
        structure::LayoutGraph,
    };

    fn flow() -> Graph {
        Graph::new(
            vec![
                Node::new("start", NodeKind::Start),
                Node::new("review", NodeKind::Approval),
                Node::new("check", NodeKind::Condition),
                Node::new("done", NodeKind::End),
            ],
            vec![
                Edge::new("e1", "start", "review"),
                Edge::new("e2", "review", "check"),
                Edge::new("e3", "check", "done"),
            ],
        )
    }

    fn engine() -> AutoLayoutEngine {
        AutoLayoutEngine::builder().with_seed(11).build()
    }

    /// Always fails during position computation.
    struct Failing;

    impl LayoutAlgorithm for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Fails every run"
        }

        fn compute_positions(
            &self,
            _graph: &LayoutGraph<'_>,
            _config: &LayoutConfig,
            _rng: &mut LayoutRng,
        ) -> Result<Placement, LayoutError> {
            Err(LayoutError::Computation("solver diverged".to_string()))
        }
    }

    /// Reports an analysis fixed at construction.
    struct FixedAnalyzer(GraphAnalysis);

    impl StructureAnalyzer for FixedAnalyzer {
        fn analyze(&self, _graph: &Graph) -> GraphAnalysis {
            self.0.clone()
        }
    }

    #[test]
    fn test_validate_config() {
        let engine = engine();
        assert!(engine.validate_config(&LayoutConfig::new("hierarchical")));
        assert!(engine.validate_config(&LayoutConfig::new("force-directed")));
        assert!(!engine.validate_config(&LayoutConfig::new("nonexistent-algo")));
        assert!(!engine.validate_config(&LayoutConfig::default()));
        assert!(
            !engine.validate_config(&LayoutConfig::new("force-directed").with_option("damping", 2.0))
        );
    }

    #[test]
    fn test_apply_layout_records_history_and_scores() {
        let mut engine = engine();
        let result = engine
            .apply_layout(&flow(), &LayoutConfig::new("hierarchical"))
            .expect("layout succeeds");

        assert_eq!(result.node_positions().len(), 4);
        let quality = result.stats().quality_score();
        assert!((0.0..=1.0).contains(&quality));
        assert_eq!(quality, engine.optimizer().calculate_quality(&result));
        assert_eq!(engine.history().len(), 1);
        assert_eq!(
            engine.history().latest().map(|entry| entry.result()),
            Some(&result)
        );
    }

    #[test]
    fn test_config_errors_do_no_work() {
        let mut engine = engine();
        let started = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&started);
        engine
            .events_mut()
            .subscribe(LayoutEventKind::Started, move |_| *sink.borrow_mut() += 1);

        let err = engine
            .apply_layout(&flow(), &LayoutConfig::new("nonexistent-algo"))
            .expect_err("unknown algorithm");
        assert!(matches!(err, LayoutError::UnknownAlgorithm(_)));
        let err = engine
            .apply_layout(&flow(), &LayoutConfig::default())
            .expect_err("missing algorithm");
        assert!(matches!(err, LayoutError::MissingAlgorithm));

        assert_eq!(*started.borrow(), 0);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_execution_errors_are_wrapped_and_reported() {
        let mut engine = AutoLayoutEngine::builder()
            .with_seed(1)
            .with_algorithm(Failing)
            .build();
        let failures = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&failures);
        engine.events_mut().subscribe(LayoutEventKind::Failed, move |event| {
            if let LayoutEvent::Failed(err) = event {
                sink.borrow_mut().push(err.to_string());
            }
        });

        let err = engine
            .apply_layout(&flow(), &LayoutConfig::new("failing"))
            .expect_err("algorithm fails");
        match &err {
            LayoutError::Execution { algorithm, source } => {
                assert_eq!(algorithm, "failing");
                assert!(matches!(**source, LayoutError::Computation(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(failures.borrow().len(), 1);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_events_in_order() {
        let mut engine = engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            LayoutEventKind::Started,
            LayoutEventKind::Completed,
            LayoutEventKind::Optimized,
        ] {
            let sink = Rc::clone(&seen);
            engine
                .events_mut()
                .subscribe(kind, move |event| sink.borrow_mut().push(event.kind()));
        }

        let options = OptimizationOptions::new(vec![Objective::MaximizeReadability]);
        engine.optimize_layout(&flow(), &options).expect("optimize succeeds");

        assert_eq!(
            *seen.borrow(),
            vec![
                LayoutEventKind::Started,
                LayoutEventKind::Completed,
                LayoutEventKind::Optimized
            ]
        );
    }

    #[test]
    fn test_preview_is_isolated() {
        let mut engine = engine();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        engine
            .events_mut()
            .subscribe(LayoutEventKind::Completed, move |_| *sink.borrow_mut() += 1);

        let graph = flow();
        let preview = engine
            .preview_layout(&graph, &LayoutConfig::new("hierarchical"))
            .expect("preview succeeds");
        assert_eq!(preview.node_positions().len(), 4);
        assert_eq!(*seen.borrow(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(graph, flow());
    }

    #[test]
    fn test_empty_graph_layout() {
        let mut engine = engine();
        let result = engine
            .apply_layout(&Graph::default(), &LayoutConfig::new("force-directed"))
            .expect("layout succeeds");
        assert!(result.node_positions().is_empty());
        let bounds = result.bounds();
        assert_eq!(
            (bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height()),
            (0.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_silent_filtering() {
        let mut engine = engine();
        let graph = Graph::new(
            vec![
                Node::new("a", NodeKind::Start),
                Node::without_id(NodeKind::Process),
                Node::new("b", NodeKind::End),
            ],
            vec![
                Edge::new("ab", "a", "b"),
                Edge::without_id("a", "b"),
                Edge::new("ghost", "a", "missing"),
            ],
        );
        let result = engine
            .apply_layout(&graph, &LayoutConfig::new("hierarchical"))
            .expect("invalid entries are dropped, not rejected");
        let ids: Vec<_> = result.node_positions().keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        let edges: Vec<_> = result.edge_paths().keys().map(String::as_str).collect();
        assert_eq!(edges, vec!["ab"]);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let config = LayoutConfig::new("force-directed");
        let first = AutoLayoutEngine::builder()
            .with_seed(99)
            .build()
            .apply_layout(&flow(), &config)
            .expect("layout succeeds");
        let second = AutoLayoutEngine::builder()
            .with_seed(99)
            .build()
            .apply_layout(&flow(), &config)
            .expect("layout succeeds");
        assert_eq!(first.node_positions(), second.node_positions());
    }

    #[test]
    fn test_fully_pinned_force_layout() {
        let graph = Graph::new(
            vec![
                Node::new("a", NodeKind::Start).with_position(Point::new(80.0, 90.0)),
                Node::new("b", NodeKind::End).with_position(Point::new(300.0, 90.0)),
            ],
            vec![Edge::new("ab", "a", "b")],
        );
        let config = LayoutConfig::new("force-directed")
            .with_preserve_positions(true)
            .with_constraints(Constraints::default().with_fixed_nodes(["a", "b"]));
        let result = engine().apply_layout(&graph, &config).expect("layout succeeds");
        assert_eq!(result.position("a"), Some(Point::new(80.0, 90.0)));
        assert_eq!(result.position("b"), Some(Point::new(300.0, 90.0)));
    }

    #[test]
    fn test_optimize_layout_starts_from_hierarchical_baseline() {
        let mut engine = engine();
        let options = OptimizationOptions::new(vec![Objective::MinimizeCrossings]);
        let optimized = engine.optimize_layout(&flow(), &options).expect("optimize succeeds");

        assert_eq!(optimized.node_positions().len(), 4);
        let baseline = engine.history().latest().expect("baseline recorded");
        assert_eq!(baseline.config().algorithm(), Some("hierarchical"));
        assert_eq!(baseline.config().direction(), Direction::TopBottom);
        assert!(optimized.stats().crossings() <= baseline.result().stats().crossings());
    }

    #[test]
    fn test_suggestions_follow_rubric() {
        let analysis = GraphAnalysis {
            node_count: 10,
            is_hierarchical: true,
            is_tree: true,
            preferred_direction: Some(Direction::LeftRight),
            ..GraphAnalysis::default()
        };
        let engine = AutoLayoutEngine::builder()
            .with_analyzer(FixedAnalyzer(analysis))
            .build();
        let suggestions = engine.layout_suggestions(&Graph::default());

        let ranked: Vec<_> = suggestions
            .iter()
            .map(|s| (s.algorithm(), s.score()))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (BuiltinAlgorithm::Hierarchical, 0.9),
                (BuiltinAlgorithm::Tree, 0.85),
                (BuiltinAlgorithm::ForceDirected, 0.7),
            ]
        );
        assert_eq!(suggestions[0].config().direction(), Direction::LeftRight);
    }

    #[test]
    fn test_suggestions_sort_circular_above_force() {
        let analysis = GraphAnalysis {
            node_count: 5,
            has_circular_pattern: true,
            ..GraphAnalysis::default()
        };
        let engine = AutoLayoutEngine::builder()
            .with_analyzer(FixedAnalyzer(analysis))
            .build();
        let algorithms: Vec<_> = engine
            .layout_suggestions(&Graph::default())
            .iter()
            .map(LayoutSuggestion::algorithm)
            .collect();
        assert_eq!(
            algorithms,
            vec![BuiltinAlgorithm::Circular, BuiltinAlgorithm::ForceDirected]
        );
    }

    #[test]
    fn test_suggestions_for_large_graph() {
        let analysis = GraphAnalysis {
            node_count: 80,
            ..GraphAnalysis::default()
        };
        let engine = AutoLayoutEngine::builder()
            .with_analyzer(FixedAnalyzer(analysis))
            .build();
        let suggestions = engine.layout_suggestions(&Graph::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].algorithm(), BuiltinAlgorithm::Grid);
        assert!(!suggestions[0].reason().is_empty());
    }

    #[test]
    fn test_apply_template() {
        let mut engine = engine();
        let result = engine
            .apply_template(&flow(), "hierarchical-left-right")
            .expect("template applies");
        let start = result.position("start").expect("placed");
        let review = result.position("review").expect("placed");
        assert!(review.x() > start.x());

        let err = engine
            .apply_template(&flow(), "missing")
            .expect_err("unknown template");
        assert!(matches!(err, LayoutError::UnknownTemplate(_)));
    }

    #[test]
    fn test_templates_for_kind() {
        let mut engine = engine();
        engine.add_template(
            LayoutTemplate::new("checks", "Checks", LayoutConfig::new("hierarchical"))
                .with_node_kinds([NodeKind::Condition]),
        );
        assert!(engine.template("checks").is_some());
        assert_eq!(engine.templates_for_kind(NodeKind::Condition).len(), 4);
        assert_eq!(engine.templates_for_kind(NodeKind::Other).len(), 1);
    }

    #[test]
    fn test_history_capacity() {
        let mut engine = AutoLayoutEngine::builder()
            .with_seed(2)
            .with_history_capacity(2)
            .build();
        for _ in 0..3 {
            engine
                .apply_layout(&flow(), &LayoutConfig::new("hierarchical"))
                .expect("layout succeeds");
        }
        assert_eq!(engine.history().len(), 2);
        engine.clear_history();
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_registered_algorithms() {
        let mut engine = engine();
        engine.register_algorithm(Failing);
        let names: Vec<_> = engine.algorithm_names().collect();
        assert_eq!(
            names,
            vec!["hierarchical", "force-directed", "circular", "grid", "tree", "failing"]
        );
        assert!(engine.algorithm("failing").is_some());
    }
}
