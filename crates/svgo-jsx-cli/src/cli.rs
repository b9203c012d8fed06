//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Convert a directory of SVG icons into JSX components.
#[derive(Debug, Parser)]
#[command(name = "svgo-jsx")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to svgo-jsx.config.json or svgo-jsx.config.js
    /// in the current directory)
    pub config: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Override the target from the config file
    #[arg(long)]
    pub target: Option<String>,

    /// Print the generated JSX of every file to stderr (for debugging)
    #[arg(long = "emit-jsx")]
    pub emit_jsx: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON report
    Json,
}
