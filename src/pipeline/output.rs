//! Report destinations.
//!
//! A run resolves its [`OutputConfig`] once into a [`ResolvedOutput`]: where
//! the report goes, which concrete format `auto` stands for there, and
//! whether ANSI color may be emitted. Files never receive color, so a saved
//! `lines` report stays usable as an ignore file.

use crate::config::OutputConfig;
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Interactive terminal on stdout.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }

    /// The concrete format `format` stands for at this target.
    ///
    /// `auto` is the tree/change text on a terminal and the summary elsewhere,
    /// so CI logs get counts while a developer sees the details.
    #[must_use]
    pub fn resolve_format(&self, format: ReportFormat) -> ReportFormat {
        match format {
            ReportFormat::Auto if self.is_terminal() => ReportFormat::Text,
            ReportFormat::Auto => ReportFormat::Summary,
            other => other,
        }
    }

    /// Color is only written to stdout, and never when disabled by flag or
    /// a non-empty `NO_COLOR`.
    #[must_use]
    pub fn allows_color(&self, no_color_flag: bool) -> bool {
        matches!(self, Self::Stdout) && !no_color_flag && !no_color_env()
    }

    /// Write a rendered report. A closed stdout pipe is not an error.
    pub fn write(&self, content: &str, quiet: bool) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                match stdout.write_all(content.as_bytes()).and_then(|()| stdout.flush()) {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                    other => other.context("Failed to write report to stdout"),
                }
            }
            Self::File(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                if !quiet {
                    tracing::info!("Report written to {}", path.display());
                }
                Ok(())
            }
        }
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Output settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    pub target: OutputTarget,
    pub format: ReportFormat,
    pub color: bool,
}

impl ResolvedOutput {
    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        let target = OutputTarget::from_option(output.file.clone());
        Self {
            format: target.resolve_format(output.format),
            color: target.allows_color(output.no_color),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target_resolves_auto_to_summary() {
        let target = OutputTarget::from_option(Some(PathBuf::from("changes.txt")));
        assert_eq!(target.resolve_format(ReportFormat::Auto), ReportFormat::Summary);
        assert_eq!(target.resolve_format(ReportFormat::Lines), ReportFormat::Lines);
    }

    #[test]
    fn test_file_target_is_never_colored() {
        let target = OutputTarget::File(PathBuf::from("changes.txt"));
        assert!(!target.allows_color(false));
        assert!(!OutputTarget::Stdout.allows_color(true));
    }

    #[test]
    fn test_resolved_output_from_config() {
        let output = OutputConfig {
            format: ReportFormat::Auto,
            file: Some(PathBuf::from("report.json")),
            no_color: false,
        };
        let resolved = ResolvedOutput::from_config(&output);
        assert_eq!(resolved.target, OutputTarget::File(PathBuf::from("report.json")));
        assert_eq!(resolved.format, ReportFormat::Summary);
        assert!(!resolved.color);
    }

    #[test]
    fn test_write_to_file() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("report.txt");
        OutputTarget::File(path.clone())
            .write("hello\n", true)
            .expect("written");
        assert_eq!(std::fs::read_to_string(path).expect("readable"), "hello\n");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("missing").join("report.txt");
        let err = OutputTarget::File(path).write("x", true).expect_err("no directory");
        assert!(err.to_string().contains("Failed to write report"));
    }
}
