//! Main orchestration logic.

use crate::cli::Args;
use crate::config::{Config, ConfigError, CONFIG_FILES};
use crate::output::{CompiledTarget, FileFailure, RunSummary};
use crate::template::{component_name, output_file_name, render_template, TemplateContext};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;
use std::time::Instant;
use svgo_jsx::{convert, ConversionRequest};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use xast_optimizer::builtin;

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No config path was given and none of the default names exist.
    #[error("no config file found in {dir} (looked for {})", CONFIG_FILES.join(", "))]
    ConfigNotFound { dir: Utf8PathBuf },

    /// The current directory is not valid UTF-8.
    #[error("current directory is not valid UTF-8")]
    NonUtf8Cwd,

    /// The input directory could not be listed.
    #[error("failed to read input directory {path}: {source}")]
    ReadInputDir {
        path: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the config named by `args` and compiles every input file.
pub fn run(args: &Args) -> Result<RunSummary, OrchestratorError> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let cwd = std::env::current_dir()
                .ok()
                .and_then(|dir| Utf8PathBuf::try_from(dir).ok())
                .ok_or(OrchestratorError::NonUtf8Cwd)?;
            Config::find(&cwd).ok_or(OrchestratorError::ConfigNotFound { dir: cwd })?
        }
    };
    debug!(config = %config_path, "loading config");

    let mut config = Config::load(&config_path)?;
    if let Some(target) = &args.target {
        config = config.with_target(target)?;
    }

    compile(&config, args.emit_jsx)
}

/// Converts every regular file directly inside the input directory and
/// writes one component per file.
///
/// Files fail independently: a conversion error is recorded in the summary
/// and the other files are still written.
pub fn compile(config: &Config, emit_jsx: bool) -> Result<RunSummary, OrchestratorError> {
    let start = Instant::now();
    let input_path = config.input_path();
    let output_path = config.output_path();

    let mut files = Vec::new();
    for entry in WalkDir::new(&input_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| OrchestratorError::ReadInputDir {
            path: input_path.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => files.push(name.to_string()),
            None => warn!(path = ?entry.path(), "skipping file with a non UTF-8 name"),
        }
    }

    if !files.is_empty() {
        fs::create_dir_all(&output_path).map_err(|source| OrchestratorError::CreateOutputDir {
            path: output_path.clone(),
            source,
        })?;
    }

    let results: Vec<Result<CompiledTarget, FileFailure>> = files
        .par_iter()
        .map(|name| compile_file(config, name, &output_path, emit_jsx))
        .collect();

    let mut summary = RunSummary::default();
    for result in results {
        match result {
            Ok(target) => summary.targets.push(target),
            Err(failure) => {
                warn!(file = %failure.file, error = %failure.message, "conversion failed");
                summary.failures.push(failure);
            }
        }
    }
    summary.targets.sort_by(|a, b| a.file.cmp(&b.file));
    summary.failures.sort_by(|a, b| a.file.cmp(&b.file));
    summary.elapsed = start.elapsed();

    info!(
        compiled = summary.targets.len(),
        failed = summary.failures.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "compiled icons"
    );
    Ok(summary)
}

fn compile_file(
    config: &Config,
    name: &str,
    output_path: &Utf8Path,
    emit_jsx: bool,
) -> Result<CompiledTarget, FileFailure> {
    let source_file = config.input_dir.join(name);
    let fail = |message: String| FileFailure {
        file: source_file.to_string(),
        message,
    };

    let svg = fs::read_to_string(config.base_dir.join(&source_file))
        .map_err(|e| fail(format!("failed to read file: {}", e)))?;

    let mut plugins = Vec::new();
    for spec in &config.plugins {
        plugins.extend(builtin::resolve(spec).map_err(&fail)?);
    }

    let request = ConversionRequest::new(source_file.as_str(), svg)
        .with_target(config.target.as_str())
        .with_svg_props(config.svg_props.clone())
        .with_plugins(plugins);
    let result = convert(&request).map_err(|e| fail(e.to_string()))?;

    if emit_jsx {
        eprintln!("=== JSX for {} ===\n{}", source_file, result.jsx);
    }

    let file = output_file_name(name, &config.extension);
    let component_name = component_name(name);
    let target_file = config.output_dir.join(&file);
    let contents = render_template(
        config.template.as_deref(),
        &TemplateContext {
            target: config.target,
            source_file: source_file.as_str(),
            target_file: target_file.as_str(),
            component_name: &component_name,
            jsx: &result.jsx,
            components: &result.components,
        },
    );

    fs::write(output_path.join(&file), contents)
        .map_err(|e| fail(format!("failed to write {}: {}", target_file, e)))?;
    debug!(source = %source_file, target = %target_file, "wrote component");

    Ok(CompiledTarget {
        file,
        component_name,
    })
}
