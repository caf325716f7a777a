//! Report output stage.

use super::{PipelineError, ResolvedOutput};
use crate::config::DiffConfig;
use crate::diff::Diff;
use crate::model::OpenApiSpec;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;

/// Report settings derived from a run's configuration.
#[must_use]
pub fn build_report_config(config: &DiffConfig) -> ReportConfig {
    ReportConfig {
        kind: config.kind,
        title: None,
        min_level: config.checker.min_level,
        multiline: config.checker.multiline,
        metadata: ReportMetadata {
            base_path: Some(config.paths.base.to_string_lossy().to_string()),
            revision_path: Some(config.paths.revision.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
    }
}

/// Output a report to the configured destination.
pub fn output_report(
    config: &DiffConfig,
    diff: &Diff,
    base: &OpenApiSpec,
    revision: &OpenApiSpec,
) -> Result<()> {
    let output = ResolvedOutput::from_config(&config.output);
    tracing::debug!("Writing {} report to {:?}", output.format, output.target);

    let reporter = create_reporter_with_options(output.format, output.color);
    let report_config = build_report_config(config);
    let report = match report_config.kind {
        crate::reports::ReportKind::Diff => {
            reporter.generate_diff_report(diff, base, revision, &report_config)
        }
        crate::reports::ReportKind::Changelog => {
            reporter.generate_changelog_report(diff, base, revision, &report_config)
        }
    }
    .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    output.target.write(&report, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Level;
    use crate::config::DiffConfigBuilder;
    use crate::diff::DiffEngine;
    use crate::model::{HttpMethod, Operation, PathItem};
    use crate::reports::{ReportFormat, ReportKind};

    #[test]
    fn test_build_report_config() {
        let config = DiffConfigBuilder::new()
            .base_path("v1.yaml".into())
            .revision_path("v2.yaml".into())
            .kind(ReportKind::Changelog)
            .min_level(Level::Breaking)
            .multiline(true)
            .build()
            .expect("config");
        let report = build_report_config(&config);
        assert_eq!(report.kind, ReportKind::Changelog);
        assert_eq!(report.min_level, Level::Breaking);
        assert!(report.multiline);
        assert_eq!(report.metadata.base_path.as_deref(), Some("v1.yaml"));
    }

    #[test]
    fn test_output_report_to_file() {
        let mut base = OpenApiSpec::new("v1.yaml");
        base.add_path(
            "/pets",
            PathItem::default().with_operation(HttpMethod::Get, Operation::default()),
        );
        let revision = OpenApiSpec::new("v2.yaml");
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff");

        let tmp = tempfile::TempDir::new().expect("temp dir");
        let out = tmp.path().join("changes.json");
        let config = DiffConfigBuilder::new()
            .base_path("v1.yaml".into())
            .revision_path("v2.yaml".into())
            .kind(ReportKind::Changelog)
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .expect("config");

        output_report(&config, &diff, &base, &revision).expect("written");
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).expect("readable"))
                .expect("valid json");
        assert_eq!(value["changes"][0]["id"], "api-path-removed");
        assert_eq!(value["metadata"]["base"]["file_path"], "v1.yaml");
    }
}
