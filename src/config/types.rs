//! Configuration types for openapi-diff operations.
//!
//! Provides structured configuration for the `diff` and `changelog` commands.

use crate::checker::Level;
use crate::reports::{ReportFormat, ReportKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct that aggregates all configuration
/// options. It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// How documents are matched and filtered
    pub diff: ComparisonConfig,
    /// Change classification and gating
    pub checker: CheckerConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the prefix carried by base paths.
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.config.diff.prefix = prefix;
        self
    }

    /// Set the path filter regex.
    pub fn filter(mut self, filter: Option<String>) -> Self {
        self.config.diff.filter = filter;
        self
    }

    /// Fail when a change at or above this level is found.
    pub const fn fail_on(mut self, level: Option<Level>) -> Self {
        self.config.checker.fail_on = level;
        self
    }

    /// Hide changes below this level.
    pub const fn min_level(mut self, level: Level) -> Self {
        self.config.checker.min_level = level;
        self
    }

    /// Set the ignore file.
    pub fn ignore_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.checker.ignore_file = file;
        self
    }

    /// Render changes in multi-line form.
    pub const fn multiline(mut self, multiline: bool) -> Self {
        self.config.checker.multiline = multiline;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-diff mode.
    pub const fn fail_on_diff(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_diff = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Document matching configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Prefix present on base paths but not on revision paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Only report paths matching this regular expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Change classification configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckerConfig {
    /// Exit with code 2 when a change at or above this level remains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<Level>,
    /// Leave changes below this level out of the changelog
    pub min_level: Level,
    /// File listing acknowledged changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
    /// Render text changelogs in the multi-line form
    pub multiline: bool,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if the documents differ
    pub fail_on_diff: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for one `diff` or `changelog` run
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Documents to compare
    pub paths: DiffPaths,
    /// Which report to produce
    pub kind: ReportKind,
    pub comparison: ComparisonConfig,
    pub checker: CheckerConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the base document
    pub base: PathBuf,
    /// Path to the revised document
    pub revision: PathBuf,
}

/// Builder for [`DiffConfig`]
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    base: Option<PathBuf>,
    revision: Option<PathBuf>,
    kind: ReportKind,
    comparison: ComparisonConfig,
    checker: CheckerConfig,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from merged application settings.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            comparison: config.diff.clone(),
            checker: config.checker.clone(),
            output: config.output.clone(),
            behavior: config.behavior.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn base_path(mut self, path: PathBuf) -> Self {
        self.base = Some(path);
        self
    }

    #[must_use]
    pub fn revision_path(mut self, path: PathBuf) -> Self {
        self.revision = Some(path);
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: ReportKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.comparison.prefix = prefix;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Option<String>) -> Self {
        self.comparison.filter = filter;
        self
    }

    #[must_use]
    pub const fn fail_on(mut self, level: Option<Level>) -> Self {
        self.checker.fail_on = level;
        self
    }

    #[must_use]
    pub const fn min_level(mut self, level: Level) -> Self {
        self.checker.min_level = level;
        self
    }

    #[must_use]
    pub fn ignore_file(mut self, file: Option<PathBuf>) -> Self {
        self.checker.ignore_file = file;
        self
    }

    #[must_use]
    pub const fn multiline(mut self, multiline: bool) -> Self {
        self.checker.multiline = multiline;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn fail_on_diff(mut self, fail: bool) -> Self {
        self.behavior.fail_on_diff = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let base = self.base.ok_or_else(|| anyhow::anyhow!("base path is required"))?;
        let revision = self
            .revision
            .ok_or_else(|| anyhow::anyhow!("revision path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { base, revision },
            kind: self.kind,
            comparison: self.comparison,
            checker: self.checker,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
