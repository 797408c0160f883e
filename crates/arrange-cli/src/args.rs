//! Command-line argument definitions for the Arrange CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the random seed and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Arrange layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph (JSON with `nodes` and `edges`)
    #[arg(help = "Path to the input graph file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout algorithm, overriding the configuration file.
    /// When neither names one, the best suggestion for the graph is used.
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Seed for reproducible layouts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optimize a hierarchical baseline with the configured objectives
    #[arg(long)]
    pub optimize: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
