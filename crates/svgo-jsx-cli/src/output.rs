//! Run reporting.

use crate::cli::OutputFormat;
use serde::Serialize;
use std::time::Duration;

/// A generated component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledTarget {
    /// Output file name, relative to the output directory.
    pub file: String,
    pub component_name: String,
}

/// An input file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// Input path, relative to the config directory.
    pub file: String,
    pub message: String,
}

/// Summary of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Generated components, sorted by file name.
    pub targets: Vec<CompiledTarget>,
    /// Failed inputs, sorted by path.
    pub failures: Vec<FileFailure>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        let mut line = format!(
            "Compiled {} icons in {}ms",
            self.targets.len(),
            self.elapsed.as_millis()
        );
        if self.has_failures() {
            line.push_str(&format!(", {} failed", self.failures.len()));
        }
        line
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    compiled: usize,
    elapsed_ms: u128,
    targets: &'a [CompiledTarget],
    failures: &'a [FileFailure],
}

/// Formats a [`RunSummary`] for the terminal.
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    fn format_human(summary: &RunSummary) -> String {
        let mut output = String::new();
        for failure in &summary.failures {
            output.push_str(&format!("Error: {}\n{}\n\n", failure.file, failure.message));
        }
        output.push_str(&summary.format());
        output.push('\n');
        output
    }

    fn format_json(summary: &RunSummary) -> String {
        let report = JsonReport {
            compiled: summary.targets.len(),
            elapsed_ms: summary.elapsed.as_millis(),
            targets: &summary.targets,
            failures: &summary.failures,
        };
        let mut output = serde_json::to_string_pretty(&report).unwrap_or_default();
        output.push('\n');
        output
    }
}
