//! Path, operation, parameter, body and response comparison.

use super::{
    ContentDiff, HeaderDiff, HeadersDiff, OperationDiff, ParameterDiff, ParametersDiff, PathDiff,
    RequestBodyDiff, ResponseDiff, ResponsesDiff, SchemaComparator, ValueDiff,
};
use crate::model::{Content, Header, Operation, Parameter, PathItem, RequestBody, Response};
use indexmap::IndexMap;

/// Compare two path items. The comparator is shared by every schema below.
pub fn diff_path_item(
    comparator: &mut SchemaComparator,
    base: &PathItem,
    revision: &PathItem,
) -> PathDiff {
    let mut result = PathDiff::default();

    for (method, base_op) in &base.operations {
        match revision.operations.get(method) {
            None => result.operations_deleted.push(*method),
            Some(rev_op) => {
                let diff = diff_operation(comparator, base_op, rev_op);
                if !diff.is_empty() {
                    result.operations_modified.insert(*method, diff);
                }
            }
        }
    }
    result.operations_added = revision
        .operations
        .keys()
        .filter(|m| !base.operations.contains_key(*m))
        .copied()
        .collect();

    result
}

pub fn diff_operation(
    comparator: &mut SchemaComparator,
    base: &Operation,
    revision: &Operation,
) -> OperationDiff {
    OperationDiff {
        operation_id_diff: ValueDiff::of(&base.operation_id, &revision.operation_id),
        summary_diff: ValueDiff::of(&base.summary.is_some(), &revision.summary.is_some()),
        description_diff: ValueDiff::of(
            &base.description.is_some(),
            &revision.description.is_some(),
        ),
        deprecated_diff: ValueDiff::of(&base.deprecated, &revision.deprecated),
        parameters_diff: diff_parameters(comparator, &base.parameters, &revision.parameters),
        request_body_diff: diff_request_body(
            comparator,
            base.request_body.as_ref(),
            revision.request_body.as_ref(),
        ),
        responses_diff: diff_responses(comparator, &base.responses, &revision.responses),
    }
}

/// Parameters are matched on `(in, name)`.
pub fn diff_parameters(
    comparator: &mut SchemaComparator,
    base: &[Parameter],
    revision: &[Parameter],
) -> ParametersDiff {
    let mut result = ParametersDiff::default();
    for param in base {
        match find(revision, param) {
            None => result
                .deleted
                .entry(param.location)
                .or_default()
                .push(param.name.clone()),
            Some(i) => {
                let diff = diff_parameter(comparator, param, &revision[i]);
                if !diff.is_empty() {
                    result
                        .modified
                        .entry(param.location)
                        .or_default()
                        .insert(param.name.clone(), diff);
                }
            }
        }
    }
    for param in revision {
        if find(base, param).is_none() {
            result
                .added
                .entry(param.location)
                .or_default()
                .push(param.name.clone());
        }
    }
    result
}

fn find(list: &[Parameter], param: &Parameter) -> Option<usize> {
    list.iter()
        .position(|o| o.location == param.location && o.name == param.name)
}

fn diff_parameter(
    comparator: &mut SchemaComparator,
    base: &Parameter,
    revision: &Parameter,
) -> ParameterDiff {
    ParameterDiff {
        required_diff: ValueDiff::of(&base.required, &revision.required),
        deprecated_diff: ValueDiff::of(&base.deprecated, &revision.deprecated),
        allow_empty_value_diff: ValueDiff::of(&base.allow_empty_value, &revision.allow_empty_value),
        schema_diff: comparator.diff(base.schema.as_ref(), revision.schema.as_ref()),
    }
}

pub fn diff_request_body(
    comparator: &mut SchemaComparator,
    base: Option<&RequestBody>,
    revision: Option<&RequestBody>,
) -> RequestBodyDiff {
    match (base, revision) {
        (None, None) => RequestBodyDiff::default(),
        (None, Some(_)) => RequestBodyDiff {
            added: true,
            ..RequestBodyDiff::default()
        },
        (Some(_), None) => RequestBodyDiff {
            deleted: true,
            ..RequestBodyDiff::default()
        },
        (Some(b), Some(r)) => RequestBodyDiff {
            required_diff: ValueDiff::of(&b.required, &r.required),
            content_diff: diff_content(comparator, &b.content, &r.content),
            ..RequestBodyDiff::default()
        },
    }
}

pub fn diff_content(
    comparator: &mut SchemaComparator,
    base: &Content,
    revision: &Content,
) -> ContentDiff {
    let mut result = ContentDiff::default();
    for (name, media) in base {
        match revision.get(name) {
            None => result.media_types_deleted.push(name.clone()),
            Some(other) => {
                let diff = comparator.diff(media.schema.as_ref(), other.schema.as_ref());
                if !diff.is_empty() {
                    result.media_types_modified.insert(name.clone(), diff);
                }
            }
        }
    }
    result.media_types_added = added_keys(base, revision);
    result
}

pub fn diff_responses(
    comparator: &mut SchemaComparator,
    base: &IndexMap<String, Response>,
    revision: &IndexMap<String, Response>,
) -> ResponsesDiff {
    let mut result = ResponsesDiff::default();
    for (status, response) in base {
        match revision.get(status) {
            None => result.deleted.push(status.clone()),
            Some(other) => {
                let diff = diff_response(comparator, response, other);
                if !diff.is_empty() {
                    result.modified.insert(status.clone(), diff);
                }
            }
        }
    }
    result.added = added_keys(base, revision);
    result
}

fn diff_response(
    comparator: &mut SchemaComparator,
    base: &Response,
    revision: &Response,
) -> ResponseDiff {
    ResponseDiff {
        description_diff: ValueDiff::of(
            &base.description.is_some(),
            &revision.description.is_some(),
        ),
        headers_diff: diff_headers(comparator, &base.headers, &revision.headers),
        content_diff: diff_content(comparator, &base.content, &revision.content),
    }
}

fn diff_headers(
    comparator: &mut SchemaComparator,
    base: &IndexMap<String, Header>,
    revision: &IndexMap<String, Header>,
) -> HeadersDiff {
    let mut result = HeadersDiff::default();
    for (name, header) in base {
        match revision.get(name) {
            None => result.deleted.push(name.clone()),
            Some(other) => {
                let diff = HeaderDiff {
                    required_diff: ValueDiff::of(&header.required, &other.required),
                    deprecated_diff: ValueDiff::of(&header.deprecated, &other.deprecated),
                    schema_diff: comparator.diff(header.schema.as_ref(), other.schema.as_ref()),
                };
                if !diff.is_empty() {
                    result.modified.insert(name.clone(), diff);
                }
            }
        }
    }
    result.added = added_keys(base, revision);
    result
}

fn added_keys<V>(base: &IndexMap<String, V>, revision: &IndexMap<String, V>) -> Vec<String> {
    revision
        .keys()
        .filter(|k| !base.contains_key(*k))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpMethod, MediaType, ParameterLocation, Schema, SchemaRef};

    fn json_content(schema: Schema) -> Content {
        [("application/json".to_string(), MediaType::new(schema.into()))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_operations_added_and_deleted() {
        let base = PathItem::default()
            .with_operation(HttpMethod::Get, Operation::default())
            .with_operation(HttpMethod::Delete, Operation::default());
        let revision = PathItem::default()
            .with_operation(HttpMethod::Get, Operation::default())
            .with_operation(HttpMethod::Post, Operation::default());

        let diff = diff_path_item(&mut SchemaComparator::new(), &base, &revision);
        assert_eq!(diff.operations_added, vec![HttpMethod::Post]);
        assert_eq!(diff.operations_deleted, vec![HttpMethod::Delete]);
        assert!(diff.operations_modified.is_empty());
    }

    #[test]
    fn test_parameters_keyed_by_location_and_name() {
        let base = vec![
            Parameter::new("id", ParameterLocation::Query),
            Parameter::new("limit", ParameterLocation::Query),
        ];
        let revision = vec![
            Parameter::new("id", ParameterLocation::Header),
            Parameter::new("limit", ParameterLocation::Query).required(true),
        ];

        let diff = diff_parameters(&mut SchemaComparator::new(), &base, &revision);
        assert_eq!(diff.deleted[&ParameterLocation::Query], vec!["id".to_string()]);
        assert_eq!(diff.added[&ParameterLocation::Header], vec!["id".to_string()]);
        let limit = &diff.modified[&ParameterLocation::Query]["limit"];
        assert_eq!(limit.required_diff, ValueDiff::of(&false, &true));
        assert_eq!(diff.len(), 3);
    }

    #[test]
    fn test_parameter_schema_added() {
        let base = vec![Parameter::new("q", ParameterLocation::Query)];
        let revision = vec![Parameter::new("q", ParameterLocation::Query)
            .with_schema(SchemaRef::new(Schema::string()))];
        let diff = diff_parameters(&mut SchemaComparator::new(), &base, &revision);
        assert!(diff.modified[&ParameterLocation::Query]["q"].schema_diff.schema_added);
    }

    #[test]
    fn test_request_body_presence() {
        let body = RequestBody::default();
        let mut cmp = SchemaComparator::new();
        assert!(diff_request_body(&mut cmp, None, Some(&body)).added);
        assert!(diff_request_body(&mut cmp, Some(&body), None).deleted);
        assert!(diff_request_body(&mut cmp, Some(&body), Some(&body)).is_empty());
    }

    #[test]
    fn test_response_content_and_headers() {
        let mut base = IndexMap::new();
        base.insert(
            "200".to_string(),
            Response {
                description: Some("ok".into()),
                headers: [("X-Trace".to_string(), Header::default())]
                    .into_iter()
                    .collect(),
                content: json_content(Schema::string()),
            },
        );
        base.insert("404".to_string(), Response::default());

        let mut revision = IndexMap::new();
        revision.insert(
            "200".to_string(),
            Response {
                description: Some("fine".into()),
                headers: IndexMap::new(),
                content: json_content(Schema::of_type("integer")),
            },
        );
        revision.insert("201".to_string(), Response::default());

        let diff = diff_responses(&mut SchemaComparator::new(), &base, &revision);
        assert_eq!(diff.deleted, vec!["404".to_string()]);
        assert_eq!(diff.added, vec!["201".to_string()]);

        let ok = &diff.modified["200"];
        assert!(ok.description_diff.is_none(), "description compared by presence");
        assert_eq!(ok.headers_diff.deleted, vec!["X-Trace".to_string()]);
        assert!(ok.content_diff.media_types_modified["application/json"]
            .type_diff
            .is_some());
    }
}
