//! The diff tree for a whole API description.
//!
//! Every node records only what changed: unchanged children are left out, and
//! every field is skipped during serialization when it holds its empty value.

use super::{SchemaDiff, Summary, SummaryDetails, ValueDiff};
use crate::checker::ApiChange;
use crate::model::{HttpMethod, ParameterLocation};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

macro_rules! impl_is_empty {
    ($($ty:ty),* $(,)?) => {
        $(impl $ty {
            /// Whether this node records no change.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                *self == Self::default()
            }
        })*
    };
}

/// Differences between two API descriptions plus the classified changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpecDiff {
    #[serde(skip_serializing_if = "PathsDiff::is_empty")]
    pub paths: PathsDiff,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ApiChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathsDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub modified: IndexMap<String, PathDiff>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operations_added: Vec<HttpMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operations_deleted: Vec<HttpMethod>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub operations_modified: IndexMap<HttpMethod, OperationDiff>,
}

/// Changes within one operation.
///
/// Summary and description are compared for presence only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id_diff: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "ParametersDiff::is_empty")]
    pub parameters_diff: ParametersDiff,
    #[serde(skip_serializing_if = "RequestBodyDiff::is_empty")]
    pub request_body_diff: RequestBodyDiff,
    #[serde(skip_serializing_if = "ResponsesDiff::is_empty")]
    pub responses_diff: ResponsesDiff,
}

/// Parameter changes grouped by location, then by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParametersDiff {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub added: BTreeMap<ParameterLocation, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub deleted: BTreeMap<ParameterLocation, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<ParameterLocation, IndexMap<String, ParameterDiff>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "SchemaDiff::is_empty")]
    pub schema_diff: SchemaDiff,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyDiff {
    #[serde(skip_serializing_if = "is_false")]
    pub added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "ContentDiff::is_empty")]
    pub content_diff: ContentDiff,
}

/// Media type changes; each modified media type carries its schema diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_types_added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_types_deleted: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub media_types_modified: IndexMap<String, SchemaDiff>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponsesDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub modified: IndexMap<String, ResponseDiff>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "HeadersDiff::is_empty")]
    pub headers_diff: HeadersDiff,
    #[serde(skip_serializing_if = "ContentDiff::is_empty")]
    pub content_diff: ContentDiff,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadersDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub modified: IndexMap<String, HeaderDiff>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "SchemaDiff::is_empty")]
    pub schema_diff: SchemaDiff,
}

impl_is_empty!(
    SpecDiff,
    PathsDiff,
    PathDiff,
    OperationDiff,
    ParametersDiff,
    ParameterDiff,
    RequestBodyDiff,
    ContentDiff,
    ResponsesDiff,
    ResponseDiff,
    HeadersDiff,
    HeaderDiff,
);

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl SpecDiff {
    /// Keep only paths matching `filter`, in the tree and in the change list.
    pub fn filter_by_regex(&mut self, filter: &Regex) {
        self.paths.added.retain(|p| filter.is_match(p));
        self.paths.deleted.retain(|p| filter.is_match(p));
        self.paths.modified.retain(|p, _| filter.is_match(p));
        self.changes.retain(|c| filter.is_match(&c.path));
    }

    /// Aggregate counts. Always derived from the current tree.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut operations = SummaryDetails::default();
        for path in self.paths.modified.values() {
            operations.added += path.operations_added.len();
            operations.deleted += path.operations_deleted.len();
            operations.modified += path.operations_modified.len();
        }

        let mut levels = BTreeMap::new();
        for change in &self.changes {
            *levels.entry(change.level).or_insert(0) += 1;
        }

        Summary {
            diff: !self.is_empty(),
            paths: SummaryDetails {
                added: self.paths.added.len(),
                deleted: self.paths.deleted.len(),
                modified: self.paths.modified.len(),
            },
            operations,
            breaking: self.changes.iter().filter(|c| c.is_breaking()).count(),
            levels,
        }
    }
}

impl ParametersDiff {
    /// Total number of added, deleted and modified parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.values().map(Vec::len).sum::<usize>()
            + self.deleted.values().map(Vec::len).sum::<usize>()
            + self.modified.values().map(IndexMap::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Level;

    fn sample() -> SpecDiff {
        let mut diff = SpecDiff::default();
        diff.paths.added.push("/users".into());
        diff.paths.deleted.push("/legacy/items".into());
        diff.paths.modified.insert(
            "/pets".into(),
            PathDiff {
                operations_added: vec![HttpMethod::Post],
                operations_modified: [(
                    HttpMethod::Get,
                    OperationDiff {
                        deprecated_diff: ValueDiff::of(&false, &true),
                        ..OperationDiff::default()
                    },
                )]
                .into_iter()
                .collect(),
                ..PathDiff::default()
            },
        );
        diff.changes.push(ApiChange::new(
            "api-path-removed",
            Level::Breaking,
            "GET",
            "/legacy/items",
        ));
        diff.changes.push(ApiChange::new(
            "endpoint-deprecated",
            Level::Info,
            "GET",
            "/pets",
        ));
        diff
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SpecDiff::default().is_empty());
        assert!(OperationDiff::default().is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert!(summary.diff);
        assert_eq!(summary.paths.added, 1);
        assert_eq!(summary.paths.deleted, 1);
        assert_eq!(summary.paths.modified, 1);
        assert_eq!(summary.operations.added, 1);
        assert_eq!(summary.operations.modified, 1);
        assert_eq!(summary.breaking, 1);
        assert_eq!(summary.levels.get(&Level::Info), Some(&1));
    }

    #[test]
    fn test_filter_by_regex_applies_to_tree_and_changes() {
        let mut diff = sample();
        let filter = Regex::new("^/pets").expect("valid regex");
        diff.filter_by_regex(&filter);

        assert!(diff.paths.added.is_empty());
        assert!(diff.paths.deleted.is_empty());
        assert_eq!(diff.paths.modified.len(), 1);
        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.summary().breaking, 0);
    }

    #[test]
    fn test_empty_nodes_are_not_serialized() {
        let value = serde_json::to_value(SpecDiff::default()).expect("serializes");
        assert_eq!(value, serde_json::json!({}));

        let value = serde_json::to_value(sample()).expect("serializes");
        let get = &value["paths"]["modified"]["/pets"]["operationsModified"]["GET"];
        assert_eq!(get, &serde_json::json!({"deprecatedDiff": {"after": true}}));
    }
}
