//! Errors reported by the CLI.
//!
//! [`CliError`] implements [`miette::Diagnostic`] so `main` can render it
//! with codes and help text.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use arrange::LayoutError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(arrange::io))]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(arrange::config),
        help("Check the TOML file passed with --config or found in the config directory")
    )]
    Config(#[from] ConfigError),

    #[error("Invalid graph file: {0}")]
    #[diagnostic(
        code(arrange::graph),
        help("The input must be a JSON object with `nodes` and `edges` arrays")
    )]
    Graph(#[source] serde_json::Error),

    #[error("Layout failed: {0}")]
    #[diagnostic(code(arrange::layout))]
    Layout(#[from] LayoutError),

    #[error("Failed to encode layout: {0}")]
    #[diagnostic(code(arrange::output))]
    Output(#[source] serde_json::Error),
}

impl CliError {
    /// Returns true when the run failed before any layout work started.
    pub fn is_input_error(&self) -> bool {
        match self {
            CliError::Config(_) | CliError::Graph(_) => true,
            CliError::Layout(err) => err.is_config_error(),
            CliError::Io(_) | CliError::Output(_) => false,
        }
    }
}
