//! svgo-jsx: convert a directory of SVG icons into JSX components.

mod cli;
mod config;
mod orchestrator;
mod output;
mod template;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};
use output::Reporter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let summary = orchestrator::run(&args).into_diagnostic()?;

    print!("{}", Reporter::new(args.output).format(&summary));

    if summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
