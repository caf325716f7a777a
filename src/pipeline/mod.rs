//! Pipeline orchestration for API description comparisons.
//!
//! This module provides shared orchestration logic for parse → diff → check → report
//! workflows, reducing duplication across CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{compute_diff, determine_exit_code, load_ignore_list};
pub use output::{OutputTarget, ResolvedOutput};
pub use parse::parse_spec_with_context;
pub use report_stage::{build_report_config, output_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an API description
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The ignore list could not be read
    #[error("Ignore list {path} unreadable: {source}")]
    IgnoreListFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no gate tripped
    pub const SUCCESS: i32 = 0;
    /// The documents differ and `--fail-on-diff` was given
    pub const CHANGES_DETECTED: i32 = 1;
    /// A change at or above the `--fail-on` level remains
    pub const FAIL_ON_LEVEL: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
