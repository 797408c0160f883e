//! Layout algorithm registry
//!
//! Algorithms are registered under their [`LayoutAlgorithm::name`] and looked
//! up by the name a [`LayoutConfig`](crate::config::LayoutConfig) selects.
//! Registration order is preserved so listings are stable.

mod circular;
mod force;
mod grid;
mod hierarchical;
mod tree;

use std::fmt;

use indexmap::IndexMap;
use log::debug;

pub use circular::CircularLayout;
pub use force::{ForceDirectedLayout, ForceParameters, NodeSimulationState, SimulationPhase};
pub use grid::GridLayout;
pub use hierarchical::HierarchicalLayout;
pub use tree::TreeLayout;

use crate::layout::algorithm::LayoutAlgorithm;

/// Names of the algorithm families the engine knows how to suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinAlgorithm {
    Hierarchical,
    ForceDirected,
    Circular,
    Grid,
    Tree,
}

impl BuiltinAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinAlgorithm::Hierarchical => HierarchicalLayout::NAME,
            BuiltinAlgorithm::ForceDirected => ForceDirectedLayout::NAME,
            BuiltinAlgorithm::Circular => CircularLayout::NAME,
            BuiltinAlgorithm::Grid => GridLayout::NAME,
            BuiltinAlgorithm::Tree => TreeLayout::NAME,
        }
    }
}

impl fmt::Display for BuiltinAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-keyed collection of layout algorithms.
#[derive(Default)]
pub struct AlgorithmRegistry {
    algorithms: IndexMap<String, Box<dyn LayoutAlgorithm>>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every [`BuiltinAlgorithm`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HierarchicalLayout::new()));
        registry.register(Box::new(ForceDirectedLayout::new()));
        registry.register(Box::new(CircularLayout::new()));
        registry.register(Box::new(GridLayout::new()));
        registry.register(Box::new(TreeLayout::new()));
        registry
    }

    /// Registers `algorithm`, replacing any algorithm with the same name.
    pub fn register(&mut self, algorithm: Box<dyn LayoutAlgorithm>) {
        let name = algorithm.name().to_string();
        debug!(algorithm = name.as_str(); "Registering layout algorithm");
        self.algorithms.insert(name, algorithm);
    }

    pub fn get(&self, name: &str) -> Option<&dyn LayoutAlgorithm> {
        self.algorithms.get(name).map(|algorithm| &**algorithm)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.algorithms.keys().collect::<Vec<_>>())
            .finish()
    }
}
