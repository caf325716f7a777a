//! Report generation for diff results.
//!
//! This module provides multiple output formats:
//! - JSON / YAML: structured data for programmatic integration
//! - Text: one block per change, with the rule id and comment
//! - Lines: one change per line, suitable for CI annotations and ignore files
//! - Summary: compact shell-friendly counts

mod json;
mod lines;
mod summary;
mod text;
mod types;

pub use json::{JsonReporter, YamlReporter};
pub use lines::LinesReporter;
pub use summary::SummaryReporter;
pub use text::TextReporter;
pub use types::{ReportConfig, ReportFormat, ReportKind, ReportMetadata};

use crate::checker::ApiChange;
use crate::diff::Diff;
use crate::model::OpenApiSpec;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Report the structural diff tree
    fn generate_diff_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report the classified change list
    fn generate_changelog_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate the report selected by `config.kind` and write it out
    fn write_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = match config.kind {
            ReportKind::Diff => self.generate_diff_report(diff, base, revision, config)?,
            ReportKind::Changelog => self.generate_changelog_report(diff, base, revision, config)?,
        };
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Changes at or above the configured minimum level.
pub(crate) fn visible_changes<'d>(
    diff: &'d Diff,
    config: &ReportConfig,
) -> impl Iterator<Item = &'d ApiChange> {
    let min_level = config.min_level;
    diff.spec_diff
        .changes
        .iter()
        .filter(move |c| c.level >= min_level)
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Auto` must be resolved by the caller; it falls back to the summary here.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Yaml => Box::new(YamlReporter::new()),
        ReportFormat::Text => {
            if use_color {
                Box::new(TextReporter::new())
            } else {
                Box::new(TextReporter::new().no_color())
            }
        }
        ReportFormat::Lines => {
            if use_color {
                Box::new(LinesReporter::new())
            } else {
                Box::new(LinesReporter::new().no_color())
            }
        }
    }
}

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}
