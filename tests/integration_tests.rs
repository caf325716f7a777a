//! Integration tests for openapi-diff
//!
//! These tests verify end-to-end functionality of document parsing,
//! the diff engine, the rule catalog and report generation.

use openapi_diff::{
    checker::{IgnoreList, Level, MessageCatalog},
    diff::DiffEngine,
    model::HttpMethod,
    parsers::{parse_spec, parse_spec_str},
};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn petstore_diff() -> openapi_diff::Diff {
    let base = parse_spec(&fixture_path("petstore-v1.yaml")).expect("v1 parses");
    let revision = parse_spec(&fixture_path("petstore-v2.yaml")).expect("v2 parses");
    DiffEngine::new().diff(&base, &revision).expect("diff succeeds")
}

fn change_ids(diff: &openapi_diff::Diff) -> Vec<&str> {
    diff.spec_diff.changes.iter().map(|c| c.id.as_str()).collect()
}

// ============================================================================
// Parser Tests
// ============================================================================

mod parser_tests {
    use super::*;

    #[test]
    fn test_parse_petstore_yaml() {
        let path = fixture_path("petstore-v1.yaml");
        let spec = parse_spec(&path).expect("Failed to parse petstore");

        assert_eq!(spec.version.as_deref(), Some("3.0.3"));
        assert_eq!(spec.info.title.as_deref(), Some("Petstore"));
        assert_eq!(spec.info.version.as_deref(), Some("1.0.0"));
        assert_eq!(spec.paths.len(), 3);
        assert_eq!(spec.operation_count(), 5);
        assert!(spec.source.file.is_some());
    }

    #[test]
    fn test_path_level_parameters_are_inherited() {
        let spec = parse_spec(&fixture_path("petstore-v1.yaml")).expect("parses");
        let op = spec
            .operation("/pets/{petId}", HttpMethod::Delete)
            .expect("delete operation");
        assert!(op.parameters.iter().any(|p| p.name == "petId" && p.required));
    }

    #[test]
    fn test_parse_recursive_json() {
        let spec = parse_spec(&fixture_path("recursive.json")).expect("parses");
        let node = &spec.schemas["Node"];
        let items = node
            .value()
            .and_then(|s| s.properties.get("children"))
            .and_then(|c| c.value())
            .and_then(|c| c.items.as_ref())
            .expect("children items");
        assert_eq!(items.identity(), node.identity());
    }

    #[test]
    fn test_swagger_2_is_rejected() {
        let result = parse_spec(&fixture_path("not-openapi.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_spec(&fixture_path("does-not-exist.yaml")).expect_err("missing file");
        assert!(err.to_string().contains("does-not-exist.yaml"));
    }
}

// ============================================================================
// Diff Engine Tests
// ============================================================================

mod diff_tests {
    use super::*;

    #[test]
    fn test_identical_documents_have_no_changes() {
        let spec = parse_spec(&fixture_path("petstore-v1.yaml")).expect("parses");
        let diff = DiffEngine::new().diff(&spec, &spec).expect("diff succeeds");
        assert!(!diff.has_changes());
        assert!(diff.spec_diff.changes.is_empty());
    }

    #[test]
    fn test_petstore_path_summary() {
        let diff = petstore_diff();

        assert!(diff.has_changes());
        assert_eq!(diff.spec_diff.paths.added, vec!["/owners".to_string()]);
        assert_eq!(diff.spec_diff.paths.deleted, vec!["/stores".to_string()]);
        assert_eq!(diff.summary.paths.modified, 2);
        assert_eq!(diff.summary.operations.deleted, 1);
        assert_eq!(diff.summary.operations.modified, 1);
    }

    #[test]
    fn test_reordering_is_not_a_change() {
        // NewPet properties and Pet.required are reordered in v2
        let diff = petstore_diff();
        let pets = &diff.spec_diff.paths.modified["/pets"];
        assert!(!pets.operations_modified.contains_key(&HttpMethod::Post));
    }

    #[test]
    fn test_petstore_changes() {
        let diff = petstore_diff();
        let ids = change_ids(&diff);

        assert_eq!(ids.len(), 4, "unexpected changes: {ids:?}");
        assert!(ids.contains(&"api-path-added"));
        assert!(ids.contains(&"api-path-removed"));
        assert!(ids.contains(&"endpoint-removed"));
        assert!(ids.contains(&"new-required-request-parameter"));
        assert_eq!(diff.summary.breaking, 3);
        assert_eq!(diff.summary.highest_level(), Some(Level::Breaking));
    }

    #[test]
    fn test_changes_carry_location_and_source() {
        let diff = petstore_diff();
        let removed = diff
            .spec_diff
            .changes
            .iter()
            .find(|c| c.id == "endpoint-removed")
            .expect("endpoint-removed");

        assert_eq!(removed.operation, "DELETE");
        assert_eq!(removed.path, "/pets/{petId}");
        assert_eq!(removed.operation_id, "deletePet");
        assert!(removed.source.ends_with("petstore-v1.yaml"));
    }

    #[test]
    fn test_filter_restricts_paths() {
        let base = parse_spec(&fixture_path("petstore-v1.yaml")).expect("parses");
        let revision = parse_spec(&fixture_path("petstore-v2.yaml")).expect("parses");
        let diff = DiffEngine::new()
            .with_filter("^/pets")
            .expect("valid filter")
            .diff(&base, &revision)
            .expect("diff succeeds");

        assert!(diff.spec_diff.paths.added.is_empty());
        assert!(diff.spec_diff.paths.deleted.is_empty());
        assert_eq!(diff.summary.paths.modified, 2);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        assert!(DiffEngine::new().with_filter("(unclosed").is_err());
    }

    #[test]
    fn test_recursive_schema_change_terminates() {
        let base_text =
            std::fs::read_to_string(fixture_path("recursive.json")).expect("fixture readable");
        let revision_text = base_text.replacen(
            r#""value": { "type": "string" }"#,
            r#""value": { "type": "integer" }"#,
            1,
        );
        assert_ne!(base_text, revision_text);

        let base = parse_spec_str(&base_text, "tree-v1.json").expect("parses");
        let revision = parse_spec_str(&revision_text, "tree-v2.json").expect("parses");
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff succeeds");

        assert!(diff.spec_diff.paths.modified.contains_key("/nodes"));
        assert!(diff
            .spec_diff
            .changes
            .iter()
            .any(|c| c.id == "response-body-property-type-changed" && c.is_breaking()));
    }

    /// `count` components whose properties reference every component.
    fn interlinked_document(count: usize, title: &str) -> String {
        let mut schemas = serde_json::Map::new();
        for i in 0..count {
            let mut properties = serde_json::Map::new();
            for j in 0..count {
                properties.insert(
                    format!("p{j}"),
                    serde_json::json!({ "$ref": format!("#/components/schemas/N{j}") }),
                );
            }
            schemas.insert(
                format!("N{i}"),
                serde_json::json!({ "type": "object", "properties": properties }),
            );
        }
        serde_json::json!({
            "openapi": "3.0.3",
            "info": { "title": title, "version": "1" },
            "paths": {
                "/nodes": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/N0" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": { "schemas": schemas }
        })
        .to_string()
    }

    #[test]
    fn test_interlinked_components_diff_quickly() {
        let base = parse_spec_str(&interlinked_document(8, "Graph"), "graph-v1.json")
            .expect("parses");
        let revision = parse_spec_str(&interlinked_document(8, "Graph API"), "graph-v2.json")
            .expect("parses");

        let started = std::time::Instant::now();
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff succeeds");

        assert!(diff.spec_diff.changes.is_empty());
        assert!(!diff.has_changes());
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}

// ============================================================================
// Ignore List Tests
// ============================================================================

mod ignore_tests {
    use super::*;

    #[test]
    fn test_ignore_file_suppresses_acknowledged_changes() {
        let diff = petstore_diff();
        let ignore = IgnoreList::from_file(&fixture_path("petstore.ignore")).expect("readable");
        assert_eq!(ignore.len(), 2);

        let catalog = MessageCatalog::english();
        let remaining = ignore.apply(diff.spec_diff.changes.clone(), &catalog);
        let ids: Vec<&str> = remaining.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids.len(), 2, "unexpected changes: {ids:?}");
        assert!(ids.contains(&"endpoint-removed"));
        assert!(ids.contains(&"api-path-added"));
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;
    use openapi_diff::checker::ApiChange;
    use openapi_diff::reports::{create_reporter_with_options, ReportConfig, ReportFormat};

    fn render(format: ReportFormat, config: &ReportConfig) -> String {
        let base = parse_spec(&fixture_path("petstore-v1.yaml")).expect("parses");
        let revision = parse_spec(&fixture_path("petstore-v2.yaml")).expect("parses");
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff succeeds");
        let reporter = create_reporter_with_options(format, false);
        let mut out = Vec::new();
        reporter
            .write_report(&diff, &base, &revision, config, &mut out)
            .expect("report renders");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_json_changelog_changes_deserialize() {
        let output = render(ReportFormat::Json, &ReportConfig::changelog());
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert_eq!(value["metadata"]["tool"]["name"], "openapi-diff");
        let changes: Vec<ApiChange> =
            serde_json::from_value(value["changes"].clone()).expect("change records");
        assert_eq!(changes.len(), 4);
        assert_eq!(value["summary"]["breaking"], 3);
    }

    #[test]
    fn test_json_diff_report_tree() {
        let output = render(ReportFormat::Json, &ReportConfig::diff());
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert_eq!(value["spec"]["paths"]["added"][0], "/owners");
        assert_eq!(
            value["spec"]["paths"]["modified"]["/pets/{petId}"]["operationsDeleted"][0],
            "DELETE"
        );
    }

    #[test]
    fn test_yaml_report_is_valid_yaml() {
        let output = render(ReportFormat::Yaml, &ReportConfig::changelog());
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&output).expect("valid YAML");
        assert!(value.get("changes").is_some());
    }

    #[test]
    fn test_lines_report_min_level() {
        let config = ReportConfig {
            min_level: Level::Breaking,
            ..ReportConfig::changelog()
        };
        let output = render(ReportFormat::Lines, &config);

        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().all(|l| l.starts_with("breaking")));
    }

    #[test]
    fn test_summary_report_verdict() {
        let output = render(ReportFormat::Summary, &ReportConfig::changelog());
        assert!(output.contains("3 breaking"));
    }
}
