//! CLI logic for the Arrange layout tool.
//!
//! Reads a graph from JSON, lays it out with an [`AutoLayoutEngine`] and
//! writes the resulting [`LayoutResult`](arrange::LayoutResult) as JSON.

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::{debug, info};

use arrange::{AutoLayoutEngine, config::LayoutConfig, graph::Graph};

/// Run the Arrange CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph input
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let graph: Graph = serde_json::from_str(&source).map_err(CliError::Graph)?;
    debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Graph loaded"
    );

    let mut builder = AutoLayoutEngine::builder();
    if let Some(seed) = args.seed.or(app_config.seed()) {
        builder = builder.with_seed(seed);
    }
    let mut engine = builder.build();

    let result = if args.optimize {
        engine.optimize_layout(&graph, app_config.optimization())?
    } else {
        let config = select_config(&engine, &graph, app_config.layout(), args.algorithm.as_deref());
        engine.apply_layout(&graph, &config)?
    };

    let json = serde_json::to_string_pretty(&result).map_err(CliError::Output)?;
    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        quality = result.stats().quality_score(),
        crossings = result.stats().crossings();
        "Layout exported successfully"
    );

    Ok(())
}

/// Picks the configuration to run: an explicit algorithm wins, then the
/// configured one, then the best suggestion the engine can execute.
fn select_config(
    engine: &AutoLayoutEngine,
    graph: &Graph,
    configured: &LayoutConfig,
    algorithm: Option<&str>,
) -> LayoutConfig {
    if let Some(name) = algorithm {
        return configured.clone().with_algorithm(name);
    }
    if configured.algorithm().is_some() {
        return configured.clone();
    }

    let suggestion = engine.layout_suggestions(graph).into_iter().find(|suggestion| {
        engine
            .algorithm(suggestion.algorithm().as_str())
            .is_some()
    });
    match suggestion {
        Some(suggestion) => {
            info!(
                algorithm = suggestion.algorithm().as_str(),
                score = suggestion.score(),
                reason = suggestion.reason();
                "Using suggested layout"
            );
            configured
                .clone()
                .with_algorithm(suggestion.algorithm().as_str())
                .with_direction(suggestion.config().direction())
        }
        None => configured.clone().with_algorithm("hierarchical"),
    }
}
