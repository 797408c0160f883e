//! Arrange - automatic layout for directed diagram graphs.
//!
//! Given nodes and edges, Arrange computes node positions and edge paths
//! with a pluggable set of layout algorithms, scores the result, optionally
//! improves it with an optimizer, and suggests configurations suited to the
//! graph's structure.
//!
//! # Examples
//!
//! ```rust,no_run
//! use arrange::{AutoLayoutEngine, config::LayoutConfig};
//! use arrange_core::graph::{Edge, Graph, Node, NodeKind};
//!
//! let graph = Graph::new(
//!     vec![
//!         Node::new("start", NodeKind::Start),
//!         Node::new("end", NodeKind::End),
//!     ],
//!     vec![Edge::new("e1", "start", "end")],
//! );
//!
//! let mut engine = AutoLayoutEngine::builder().with_seed(7).build();
//! let result = engine
//!     .apply_layout(&graph, &LayoutConfig::new("hierarchical"))
//!     .expect("layout succeeds");
//! println!("quality: {}", result.stats().quality_score());
//! ```

pub mod analysis;
pub mod config;
pub mod events;
pub mod history;
pub mod layout;
pub mod structure;
pub mod templates;

mod engine;
mod error;
mod optimizer;

pub use arrange_core::{geometry, graph};

pub use engine::{AutoLayoutEngine, EngineBuilder, LayoutSuggestion};
pub use error::LayoutError;
pub use layout::{EdgePath, LayoutResult, LayoutStats};
pub use optimizer::LayoutOptimizer;
