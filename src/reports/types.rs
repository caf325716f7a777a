//! Report type definitions.

use crate::checker::Level;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: text if TTY, summary otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Structured YAML output
    Yaml,
    /// Multi-line human-readable changes
    Text,
    /// One change per line, for grepping and annotations
    Lines,
    /// Brief summary output
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Text => write!(f, "text"),
            Self::Lines => write!(f, "lines"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Which command the report is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// The structural diff tree
    #[default]
    Diff,
    /// The classified change list
    Changelog,
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub kind: ReportKind,
    /// Title for the report
    pub title: Option<String>,
    /// Changes below this level are left out of changelog output
    pub min_level: Level,
    /// Render changes in the multi-line form
    pub multiline: bool,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    #[must_use]
    pub fn diff() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn changelog() -> Self {
        Self {
            kind: ReportKind::Changelog,
            ..Self::default()
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Base document path
    pub base_path: Option<String>,
    /// Revision document path
    pub revision_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
