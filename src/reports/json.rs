//! JSON and YAML report generators.
//!
//! Both formats share one document shape: `metadata`, then either the diff
//! tree (`spec`) or the change list (`changes`), then the `summary`.

use super::{visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::checker::ApiChange;
use crate::diff::{Diff, SpecDiff, Summary};
use crate::model::OpenApiSpec;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, report: &T) -> Result<String, ReportError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&DiffReport::build(diff, base, revision, config))
    }

    fn generate_changelog_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&ChangelogReport::build(diff, base, revision, config))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

/// YAML report generator
#[derive(Default)]
pub struct YamlReporter;

impl YamlReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn to_yaml<T: Serialize>(report: &T) -> Result<String, ReportError> {
    serde_yaml_ng::to_string(report).map_err(|e| ReportError::SerializationError(e.to_string()))
}

impl ReportGenerator for YamlReporter {
    fn generate_diff_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        to_yaml(&DiffReport::build(diff, base, revision, config))
    }

    fn generate_changelog_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        to_yaml(&ChangelogReport::build(diff, base, revision, config))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Yaml
    }
}

// Report structures

#[derive(Serialize)]
struct DiffReport<'a> {
    metadata: JsonReportMetadata,
    #[serde(skip_serializing_if = "SpecDiff::is_empty")]
    spec: &'a SpecDiff,
    summary: &'a Summary,
}

impl<'a> DiffReport<'a> {
    fn build(
        diff: &'a Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Self {
        Self {
            metadata: JsonReportMetadata::build(base, revision, config),
            spec: &diff.spec_diff,
            summary: &diff.summary,
        }
    }
}

#[derive(Serialize)]
struct ChangelogReport<'a> {
    metadata: JsonReportMetadata,
    changes: Vec<&'a ApiChange>,
    summary: &'a Summary,
}

impl<'a> ChangelogReport<'a> {
    fn build(
        diff: &'a Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Self {
        Self {
            metadata: JsonReportMetadata::build(base, revision, config),
            changes: visible_changes(diff, config).collect(),
            summary: &diff.summary,
        }
    }
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    base: DocumentInfo,
    revision: DocumentInfo,
}

impl JsonReportMetadata {
    fn build(base: &OpenApiSpec, revision: &OpenApiSpec, config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: "openapi-diff".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: config
                .metadata
                .generated_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            base: DocumentInfo::from_spec(base, config.metadata.base_path.as_deref()),
            revision: DocumentInfo::from_spec(revision, config.metadata.revision_path.as_deref()),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct DocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    path_count: usize,
    operation_count: usize,
}

impl DocumentInfo {
    fn from_spec(spec: &OpenApiSpec, file_path: Option<&str>) -> Self {
        Self {
            file_path: file_path
                .map(str::to_string)
                .or_else(|| spec.source.file.clone()),
            title: spec.info.title.clone(),
            version: spec.info.version.clone(),
            path_count: spec.paths.len(),
            operation_count: spec.operation_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Level;
    use crate::diff::DiffEngine;
    use crate::model::{HttpMethod, Operation, PathItem};

    fn specs() -> (OpenApiSpec, OpenApiSpec) {
        let mut base = OpenApiSpec::new("v1.yaml");
        base.info.title = Some("Pets".into());
        base.add_path(
            "/pets",
            PathItem::default().with_operation(HttpMethod::Get, Operation::default()),
        );
        base.add_path(
            "/legacy",
            PathItem::default().with_operation(HttpMethod::Get, Operation::default()),
        );
        let mut revision = OpenApiSpec::new("v2.yaml");
        revision.add_path(
            "/pets",
            PathItem::default().with_operation(
                HttpMethod::Get,
                Operation {
                    deprecated: true,
                    ..Operation::default()
                },
            ),
        );
        (base, revision)
    }

    fn config(config: ReportConfig) -> ReportConfig {
        ReportConfig {
            metadata: crate::reports::ReportMetadata {
                generated_at: Some("2024-01-01T00:00:00Z".into()),
                ..crate::reports::ReportMetadata::new()
            },
            ..config
        }
    }

    #[test]
    fn test_diff_report_shape() {
        let (base, revision) = specs();
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff");
        let json = JsonReporter::new()
            .generate_diff_report(&diff, &base, &revision, &config(ReportConfig::diff()))
            .expect("report");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["metadata"]["tool"]["name"], "openapi-diff");
        assert_eq!(value["metadata"]["base"]["title"], "Pets");
        assert_eq!(value["metadata"]["base"]["path_count"], 2);
        assert_eq!(value["spec"]["paths"]["deleted"][0], "/legacy");
        assert_eq!(value["summary"]["breaking"], 1);
    }

    #[test]
    fn test_changelog_report_respects_min_level() {
        let (base, revision) = specs();
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff");

        let all = ReportConfig::changelog();
        let json = JsonReporter::new()
            .generate_changelog_report(&diff, &base, &revision, &config(all))
            .expect("report");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["changes"].as_array().map(Vec::len), Some(2));

        let breaking_only = ReportConfig {
            min_level: Level::Breaking,
            ..ReportConfig::changelog()
        };
        let json = JsonReporter::new()
            .pretty(false)
            .generate_changelog_report(&diff, &base, &revision, &config(breaking_only))
            .expect("report");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["changes"][0]["id"], "api-path-removed");
        assert_eq!(value["changes"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_yaml_report_matches_json_shape() {
        let (base, revision) = specs();
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff");
        let yaml = YamlReporter::new()
            .generate_changelog_report(&diff, &base, &revision, &config(ReportConfig::changelog()))
            .expect("report");
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).expect("valid yaml");
        assert!(value.get("changes").is_some());
        assert!(value.get("spec").is_none());
        assert!(yaml.contains("api-path-removed"));
    }
}
