//! Rule catalog: turns a diff tree into classified [`ApiChange`]s.
//!
//! The diff tree records *that* something changed; rules go back to the two
//! documents for the details a message needs (old and new values, which
//! property, whether an added parameter is required).
//!
//! Changes found in removed elements are attributed to the base document,
//! everything else to the revision.

use super::{ApiChange, Level};
use crate::diff::{
    collections_differ, ContentDiff, OperationDiff, ParametersDiff, PathDiff, RequestBodyDiff,
    ResponsesDiff, SchemaComparator, SpecDiff,
};
use crate::model::{
    Content, HttpMethod, OpenApiSpec, Operation, Parameter, ParameterLocation, Response, SchemaRef,
};
use serde_json::Value;
use std::collections::HashSet;

struct Rule {
    id: &'static str,
    level: Level,
    message: &'static str,
}

const fn rule(id: &'static str, level: Level, message: &'static str) -> Rule {
    Rule { id, level, message }
}

const RULES: &[Rule] = &[
    // paths and operations
    rule("api-path-added", Level::Info, "api path added"),
    rule(
        "api-path-removed",
        Level::Breaking,
        "api path removed without deprecation",
    ),
    rule("endpoint-added", Level::Info, "endpoint added"),
    rule(
        "endpoint-removed",
        Level::Breaking,
        "api removed without deprecation",
    ),
    rule("endpoint-deprecated", Level::Info, "endpoint deprecated"),
    rule("endpoint-reactivated", Level::Info, "endpoint reactivated"),
    rule(
        "api-operation-id-changed",
        Level::NonBreaking,
        "api operation id changed from %s to %s",
    ),
    // parameters
    rule(
        "new-required-request-parameter",
        Level::Breaking,
        "added the new required %s request parameter %s",
    ),
    rule(
        "new-optional-request-parameter",
        Level::Info,
        "added the new optional %s request parameter %s",
    ),
    rule(
        "request-parameter-removed",
        Level::NonBreaking,
        "deleted the %s request parameter %s",
    ),
    rule(
        "request-parameter-became-required",
        Level::Breaking,
        "the %s request parameter %s became required",
    ),
    rule(
        "request-parameter-became-optional",
        Level::Info,
        "the %s request parameter %s became optional",
    ),
    // request body
    rule(
        "request-body-added-required",
        Level::Breaking,
        "added required request body",
    ),
    rule(
        "request-body-added-optional",
        Level::Info,
        "added optional request body",
    ),
    rule(
        "request-body-removed",
        Level::NonBreaking,
        "request body removed",
    ),
    rule(
        "request-body-became-required",
        Level::Breaking,
        "request body became required",
    ),
    rule(
        "request-body-became-optional",
        Level::Info,
        "request body became optional",
    ),
    rule(
        "request-body-media-type-added",
        Level::Info,
        "added the media type %s to the request body",
    ),
    rule(
        "request-body-media-type-removed",
        Level::Breaking,
        "removed the media type %s from the request body",
    ),
    // responses
    rule(
        "response-success-status-removed",
        Level::Breaking,
        "removed the success response with the status %s",
    ),
    rule(
        "response-non-success-status-removed",
        Level::NonBreaking,
        "removed the non-success response with the status %s",
    ),
    rule(
        "response-status-added",
        Level::Info,
        "added the response with the status %s",
    ),
    rule(
        "response-media-type-removed",
        Level::Breaking,
        "removed the media type %s for the response with the status %s",
    ),
    rule(
        "response-header-removed",
        Level::Breaking,
        "removed the %s response header for the status %s",
    ),
    rule(
        "response-header-became-optional",
        Level::Breaking,
        "the %s response header for the status %s became optional",
    ),
];

const ENUM_VALUE_ADDED_COMMENT: &str = "response-enum-value-added-comment";

fn fixed_level(id: &str) -> Level {
    RULES
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.level)
        .unwrap_or_default()
}

/// Where a schema sits inside an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaSite {
    RequestParameter,
    RequestBody,
    ResponseBody,
}

impl SchemaSite {
    const ALL: [Self; 3] = [
        Self::RequestParameter,
        Self::RequestBody,
        Self::ResponseBody,
    ];

    const fn prefix(self) -> &'static str {
        match self {
            Self::RequestParameter => "request-parameter",
            Self::RequestBody => "request-body",
            Self::ResponseBody => "response-body",
        }
    }

    const fn is_response(self) -> bool {
        matches!(self, Self::ResponseBody)
    }

    const fn subject(self, nested: bool) -> &'static str {
        match (self, nested) {
            (Self::RequestParameter, false) => "the %s request parameter %s",
            (Self::RequestParameter, true) => "the %s request parameter %s property %s",
            (Self::RequestBody, false) => "the %s request body",
            (Self::RequestBody, true) => "the %s request body property %s",
            (Self::ResponseBody, false) => "the %s response body for status %s",
            (Self::ResponseBody, true) => "the %s response body for status %s, property %s",
        }
    }
}

/// Checks applied at every node of a modified schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaRule {
    TypeChanged,
    FormatChanged,
    BecameNullable,
    BecameNotNullable,
    EnumValueAdded,
    EnumValueRemoved,
    PropertyAdded,
    NewRequiredProperty,
    PropertyRemoved,
    MaxDecreased,
    MinIncreased,
    CompositionChanged,
}

impl SchemaRule {
    const ALL: [Self; 12] = [
        Self::TypeChanged,
        Self::FormatChanged,
        Self::BecameNullable,
        Self::BecameNotNullable,
        Self::EnumValueAdded,
        Self::EnumValueRemoved,
        Self::PropertyAdded,
        Self::NewRequiredProperty,
        Self::PropertyRemoved,
        Self::MaxDecreased,
        Self::MinIncreased,
        Self::CompositionChanged,
    ];

    const fn suffix(self) -> &'static str {
        match self {
            Self::TypeChanged => "type-changed",
            Self::FormatChanged => "format-changed",
            Self::BecameNullable => "became-nullable",
            Self::BecameNotNullable => "became-not-nullable",
            Self::EnumValueAdded => "enum-value-added",
            Self::EnumValueRemoved => "enum-value-removed",
            Self::PropertyAdded => "property-added",
            Self::NewRequiredProperty => "new-required-property",
            Self::PropertyRemoved => "property-removed",
            Self::MaxDecreased => "max-decreased",
            Self::MinIncreased => "min-increased",
            Self::CompositionChanged => "composition-changed",
        }
    }

    const fn predicate(self) -> &'static str {
        match self {
            Self::TypeChanged => "type changed from %s to %s",
            Self::FormatChanged => "format changed from %s to %s",
            Self::BecameNullable => "became nullable",
            Self::BecameNotNullable => "became not nullable",
            Self::EnumValueAdded => "had the enum value %s added",
            Self::EnumValueRemoved => "had the enum value %s removed",
            Self::PropertyAdded => "had the property %s added",
            Self::NewRequiredProperty => "had the new required property %s added",
            Self::PropertyRemoved => "had the property %s removed",
            Self::MaxDecreased => "max decreased from %s to %s",
            Self::MinIncreased => "min increased from %s to %s",
            Self::CompositionChanged => "changed its oneOf, anyOf, allOf or not composition",
        }
    }

    /// Property-set rules carry the full property path as an argument and
    /// have no nested id.
    const fn names_property(self) -> bool {
        matches!(
            self,
            Self::PropertyAdded | Self::NewRequiredProperty | Self::PropertyRemoved
        )
    }

    const fn level(self, site: SchemaSite) -> Level {
        let response = site.is_response();
        match self {
            Self::TypeChanged | Self::FormatChanged => Level::Breaking,
            Self::BecameNullable if response => Level::Breaking,
            Self::BecameNullable => Level::Info,
            Self::BecameNotNullable if response => Level::Info,
            Self::BecameNotNullable => Level::Breaking,
            Self::EnumValueAdded if response => Level::NonBreaking,
            Self::EnumValueAdded => Level::Info,
            Self::EnumValueRemoved if response => Level::Info,
            Self::EnumValueRemoved => Level::Breaking,
            Self::PropertyAdded => Level::Info,
            Self::NewRequiredProperty if response => Level::Info,
            Self::NewRequiredProperty => Level::Breaking,
            Self::PropertyRemoved if response => Level::Breaking,
            Self::PropertyRemoved => Level::NonBreaking,
            Self::MaxDecreased | Self::MinIncreased if response => Level::Info,
            Self::MaxDecreased | Self::MinIncreased => Level::Breaking,
            Self::CompositionChanged => Level::Unclassified,
        }
    }

    fn comment(self, site: SchemaSite) -> Option<&'static str> {
        (self == Self::EnumValueAdded && site.is_response()).then_some(ENUM_VALUE_ADDED_COMMENT)
    }

    fn id(self, site: SchemaSite, nested: bool) -> String {
        if nested && !self.names_property() {
            format!("{}-property-{}", site.prefix(), self.suffix())
        } else {
            format!("{}-{}", site.prefix(), self.suffix())
        }
    }
}

/// Built-in English templates for every rule id, in `(id, template)` pairs.
#[must_use]
pub fn messages() -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = RULES
        .iter()
        .map(|r| (r.id.to_string(), r.message.to_string()))
        .collect();
    out.push((
        ENUM_VALUE_ADDED_COMMENT.to_string(),
        "adding new enum values to a response may break clients that switch exhaustively over them"
            .to_string(),
    ));

    for site in SchemaSite::ALL {
        for schema_rule in SchemaRule::ALL {
            out.push((
                schema_rule.id(site, false),
                format!("{} {}", site.subject(false), schema_rule.predicate()),
            ));
            if !schema_rule.names_property() {
                out.push((
                    schema_rule.id(site, true),
                    format!("{} {}", site.subject(true), schema_rule.predicate()),
                ));
            }
        }
    }
    out
}

/// Run every rule over `diff`.
///
/// `prefix` must be the one the tree was built with, so that modified paths
/// can be found again in `base`.
#[must_use]
pub fn check(
    diff: &SpecDiff,
    base: &OpenApiSpec,
    revision: &OpenApiSpec,
    prefix: Option<&str>,
) -> Vec<ApiChange> {
    let mut checker = Checker {
        base,
        revision,
        prefix,
        changes: Vec::new(),
    };
    checker.paths(diff);
    tracing::debug!("Rule catalog produced {} changes", checker.changes.len());
    checker.changes
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Base,
    Revision,
}

/// One operation, named as in the revision and as in the base.
#[derive(Debug, Clone, Copy)]
struct Endpoint<'p> {
    path: &'p str,
    base_path: &'p str,
    method: HttpMethod,
}

struct Checker<'a> {
    base: &'a OpenApiSpec,
    revision: &'a OpenApiSpec,
    prefix: Option<&'a str>,
    changes: Vec<ApiChange>,
}

impl Checker<'_> {
    fn change(
        &self,
        id: impl Into<String>,
        level: Level,
        side: Side,
        at: Endpoint<'_>,
    ) -> ApiChange {
        let (spec, spec_path) = match side {
            Side::Base => (self.base, at.base_path),
            Side::Revision => (self.revision, at.path),
        };
        let operation_id = spec
            .operation(spec_path, at.method)
            .and_then(|op| op.operation_id.as_deref());
        ApiChange::new(id, level, at.method.as_str(), at.path)
            .with_operation_id(operation_id)
            .with_source(
                &spec.source.label,
                spec.source.file.as_deref(),
                spec.source.index.operation(spec_path, at.method),
            )
    }

    fn emit(&mut self, id: &'static str, side: Side, at: Endpoint<'_>, args: Vec<Value>) {
        let change = self.change(id, fixed_level(id), side, at).with_args(args);
        self.changes.push(change);
    }

    /// Base path name for a modified path: the exact path when the base has
    /// it, the prefixed one otherwise.
    fn base_path(&self, path: &str) -> String {
        if let Some(prefix) = self.prefix {
            let prefixed = format!("{prefix}{path}");
            if !self.base.paths.contains_key(path) && self.base.paths.contains_key(&prefixed) {
                return prefixed;
            }
        }
        path.to_string()
    }

    fn paths(&mut self, diff: &SpecDiff) {
        let (base, revision) = (self.base, self.revision);

        for path in &diff.paths.added {
            let Some(item) = revision.paths.get(path) else {
                continue;
            };
            for method in item.operations.keys() {
                let at = Endpoint {
                    path,
                    base_path: path,
                    method: *method,
                };
                self.emit("api-path-added", Side::Revision, at, Vec::new());
            }
        }

        for path in &diff.paths.deleted {
            let Some(item) = base.paths.get(path) else {
                continue;
            };
            for method in item.operations.keys() {
                let at = Endpoint {
                    path,
                    base_path: path,
                    method: *method,
                };
                self.emit("api-path-removed", Side::Base, at, Vec::new());
            }
        }

        for (path, path_diff) in &diff.paths.modified {
            let base_path = self.base_path(path);
            self.path(path, &base_path, path_diff);
        }
    }

    fn path(&mut self, path: &str, base_path: &str, diff: &PathDiff) {
        let endpoint = |method: HttpMethod| Endpoint {
            path,
            base_path,
            method,
        };

        for method in &diff.operations_added {
            let at = endpoint(*method);
            self.emit("endpoint-added", Side::Revision, at, Vec::new());
        }
        for method in &diff.operations_deleted {
            let at = endpoint(*method);
            self.emit("endpoint-removed", Side::Base, at, Vec::new());
        }
        for (method, op_diff) in &diff.operations_modified {
            self.operation(endpoint(*method), op_diff);
        }
    }

    fn operation(&mut self, at: Endpoint<'_>, diff: &OperationDiff) {
        let (base, revision) = (self.base, self.revision);
        let (Some(base_op), Some(rev_op)) = (
            base.operation(at.base_path, at.method),
            revision.operation(at.path, at.method),
        ) else {
            return;
        };

        if let Some(deprecated) = &diff.deprecated_diff {
            let id = if deprecated.after {
                "endpoint-deprecated"
            } else {
                "endpoint-reactivated"
            };
            self.emit(id, Side::Revision, at, Vec::new());
        }

        if let Some(operation_id) = &diff.operation_id_diff {
            let args = vec![
                Value::from(operation_id.before.clone().unwrap_or_default()),
                Value::from(operation_id.after.clone().unwrap_or_default()),
            ];
            self.emit("api-operation-id-changed", Side::Revision, at, args);
        }

        self.parameters(at, &diff.parameters_diff, base_op, rev_op);
        self.request_body(at, &diff.request_body_diff, base_op, rev_op);
        self.responses(at, &diff.responses_diff, base_op, rev_op);
    }

    fn parameters(
        &mut self,
        at: Endpoint<'_>,
        diff: &ParametersDiff,
        base_op: &Operation,
        rev_op: &Operation,
    ) {
        for (location, names) in &diff.added {
            for name in names {
                let required = find_parameter(rev_op, *location, name).is_some_and(|p| p.required);
                let id = if required {
                    "new-required-request-parameter"
                } else {
                    "new-optional-request-parameter"
                };
                self.emit(id, Side::Revision, at, parameter_args(*location, name));
            }
        }

        for (location, names) in &diff.deleted {
            for name in names {
                let args = parameter_args(*location, name);
                self.emit("request-parameter-removed", Side::Base, at, args);
            }
        }

        for (location, modified) in &diff.modified {
            for (name, param_diff) in modified {
                if let Some(required) = &param_diff.required_diff {
                    let id = if required.after {
                        "request-parameter-became-required"
                    } else {
                        "request-parameter-became-optional"
                    };
                    self.emit(id, Side::Revision, at, parameter_args(*location, name));
                }

                if !param_diff.schema_diff.is_empty() {
                    let base_schema =
                        find_parameter(base_op, *location, name).and_then(|p| p.schema.as_ref());
                    let rev_schema =
                        find_parameter(rev_op, *location, name).and_then(|p| p.schema.as_ref());
                    if let (Some(a), Some(b)) = (base_schema, rev_schema) {
                        let args = parameter_args(*location, name);
                        self.schema(at, SchemaSite::RequestParameter, args, a, b);
                    }
                }
            }
        }
    }

    fn request_body(
        &mut self,
        at: Endpoint<'_>,
        diff: &RequestBodyDiff,
        base_op: &Operation,
        rev_op: &Operation,
    ) {
        if diff.added {
            let required = rev_op.request_body.as_ref().is_some_and(|b| b.required);
            let id = if required {
                "request-body-added-required"
            } else {
                "request-body-added-optional"
            };
            self.emit(id, Side::Revision, at, Vec::new());
        }
        if diff.deleted {
            self.emit("request-body-removed", Side::Base, at, Vec::new());
        }
        if let Some(required) = &diff.required_diff {
            let id = if required.after {
                "request-body-became-required"
            } else {
                "request-body-became-optional"
            };
            self.emit(id, Side::Revision, at, Vec::new());
        }

        let (Some(base_body), Some(rev_body)) = (&base_op.request_body, &rev_op.request_body) else {
            return;
        };
        let content = &diff.content_diff;
        for media in &content.media_types_added {
            let args = vec![Value::from(media.as_str())];
            self.emit("request-body-media-type-added", Side::Revision, at, args);
        }
        for media in &content.media_types_deleted {
            let args = vec![Value::from(media.as_str())];
            self.emit("request-body-media-type-removed", Side::Base, at, args);
        }
        self.content_schemas(
            at,
            SchemaSite::RequestBody,
            content,
            &base_body.content,
            &rev_body.content,
            &[],
        );
    }

    fn responses(
        &mut self,
        at: Endpoint<'_>,
        diff: &ResponsesDiff,
        base_op: &Operation,
        rev_op: &Operation,
    ) {
        for status in &diff.deleted {
            let id = if Response::is_success_status(status) {
                "response-success-status-removed"
            } else {
                "response-non-success-status-removed"
            };
            self.emit(id, Side::Base, at, vec![Value::from(status.as_str())]);
        }
        for status in &diff.added {
            let args = vec![Value::from(status.as_str())];
            self.emit("response-status-added", Side::Revision, at, args);
        }

        for (status, response_diff) in &diff.modified {
            let (Some(base_response), Some(rev_response)) =
                (base_op.responses.get(status), rev_op.responses.get(status))
            else {
                continue;
            };

            for header in &response_diff.headers_diff.deleted {
                let args = vec![Value::from(header.as_str()), Value::from(status.as_str())];
                self.emit("response-header-removed", Side::Base, at, args);
            }
            for (header, header_diff) in &response_diff.headers_diff.modified {
                if header_diff.required_diff.as_ref().is_some_and(|d| d.before && !d.after) {
                    let args = vec![Value::from(header.as_str()), Value::from(status.as_str())];
                    self.emit("response-header-became-optional", Side::Revision, at, args);
                }
            }

            let content = &response_diff.content_diff;
            for media in &content.media_types_deleted {
                let args = vec![Value::from(media.as_str()), Value::from(status.as_str())];
                self.emit("response-media-type-removed", Side::Base, at, args);
            }
            self.content_schemas(
                at,
                SchemaSite::ResponseBody,
                content,
                &base_response.content,
                &rev_response.content,
                &[Value::from(status.as_str())],
            );
        }
    }

    /// Schema rules for every modified media type. Site arguments are the
    /// media type followed by `trailing`.
    fn content_schemas(
        &mut self,
        at: Endpoint<'_>,
        site: SchemaSite,
        diff: &ContentDiff,
        base: &Content,
        revision: &Content,
        trailing: &[Value],
    ) {
        for (media, schema_diff) in &diff.media_types_modified {
            if schema_diff.is_empty() {
                continue;
            }
            let base_schema = base.get(media).and_then(|m| m.schema.as_ref());
            let rev_schema = revision.get(media).and_then(|m| m.schema.as_ref());
            if let (Some(a), Some(b)) = (base_schema, rev_schema) {
                let mut args = vec![Value::from(media.as_str())];
                args.extend_from_slice(trailing);
                self.schema(at, site, args, a, b);
            }
        }
    }

    fn schema(
        &mut self,
        at: Endpoint<'_>,
        site: SchemaSite,
        site_args: Vec<Value>,
        base: &SchemaRef,
        revision: &SchemaRef,
    ) {
        let mut walk = SchemaWalk {
            site,
            site_args,
            visited: HashSet::new(),
            comparator: SchemaComparator::new(),
            findings: Vec::new(),
        };
        walk.visit(base, revision, &mut Vec::new());

        for finding in walk.findings {
            let side = if finding.rule == SchemaRule::PropertyRemoved {
                Side::Base
            } else {
                Side::Revision
            };
            let id = finding.rule.id(site, finding.nested);
            let level = finding.rule.level(site);
            let mut change = self.change(id, level, side, at).with_args(finding.args);
            if let Some(comment) = finding.rule.comment(site) {
                change = change.with_comment(comment);
            }
            self.changes.push(change);
        }
    }
}

fn parameter_args(location: ParameterLocation, name: &str) -> Vec<Value> {
    vec![Value::from(location.as_str()), Value::from(name)]
}

fn find_parameter<'o>(
    operation: &'o Operation,
    location: ParameterLocation,
    name: &str,
) -> Option<&'o Parameter> {
    operation
        .parameters
        .iter()
        .find(|p| p.location == location && p.name == name)
}

struct Finding {
    rule: SchemaRule,
    nested: bool,
    args: Vec<Value>,
}

/// Depth-first walk over two schema trees, visiting each identity pair once.
struct SchemaWalk {
    site: SchemaSite,
    site_args: Vec<Value>,
    visited: HashSet<(usize, usize)>,
    comparator: SchemaComparator,
    findings: Vec<Finding>,
}

impl SchemaWalk {
    fn visit(&mut self, base: &SchemaRef, revision: &SchemaRef, path: &mut Vec<String>) {
        if !self.visited.insert((base.identity(), revision.identity())) {
            return;
        }
        let (Some(a), Some(b)) = (base.value(), revision.value()) else {
            return;
        };

        if a.schema_type != b.schema_type {
            let values = vec![opt_value(&a.schema_type), opt_value(&b.schema_type)];
            self.report(SchemaRule::TypeChanged, path, values);
        }
        if a.format != b.format {
            let values = vec![opt_value(&a.format), opt_value(&b.format)];
            self.report(SchemaRule::FormatChanged, path, values);
        }
        match (a.nullable, b.nullable) {
            (false, true) => self.report(SchemaRule::BecameNullable, path, Vec::new()),
            (true, false) => self.report(SchemaRule::BecameNotNullable, path, Vec::new()),
            _ => {}
        }

        for value in b.enumeration.iter().filter(|v| !a.enumeration.contains(v)) {
            self.report(SchemaRule::EnumValueAdded, path, vec![value.clone()]);
        }
        for value in a.enumeration.iter().filter(|v| !b.enumeration.contains(v)) {
            self.report(SchemaRule::EnumValueRemoved, path, vec![value.clone()]);
        }

        if decreased(a.max, b.max) {
            let values = vec![bound_value(a.max), bound_value(b.max)];
            self.report(SchemaRule::MaxDecreased, path, values);
        }
        if increased(a.min, b.min) {
            let values = vec![bound_value(a.min), bound_value(b.min)];
            self.report(SchemaRule::MinIncreased, path, values);
        }

        let composition_changed = collections_differ(&mut self.comparator, &a.one_of, &b.one_of)
            || collections_differ(&mut self.comparator, &a.any_of, &b.any_of)
            || collections_differ(&mut self.comparator, &a.all_of, &b.all_of)
            || !self.comparator.diff(a.not.as_ref(), b.not.as_ref()).is_empty();
        if composition_changed {
            self.report(SchemaRule::CompositionChanged, path, Vec::new());
        }

        for (name, rev_property) in &b.properties {
            match a.properties.get(name) {
                None if b.is_required(name) => {
                    self.report_property(SchemaRule::NewRequiredProperty, path, name);
                }
                None => self.report_property(SchemaRule::PropertyAdded, path, name),
                Some(base_property) => {
                    path.push(name.clone());
                    self.visit(base_property, rev_property, path);
                    path.pop();
                }
            }
        }
        for name in a.properties.keys().filter(|k| !b.properties.contains_key(*k)) {
            self.report_property(SchemaRule::PropertyRemoved, path, name);
        }

        if let (Some(base_items), Some(rev_items)) = (&a.items, &b.items) {
            path.push("items".to_string());
            self.visit(base_items, rev_items, path);
            path.pop();
        }
    }

    fn report(&mut self, rule: SchemaRule, path: &[String], values: Vec<Value>) {
        let nested = !path.is_empty();
        let mut args = self.site_args.clone();
        if nested {
            args.push(Value::from(path.join("/")));
        }
        args.extend(values);
        self.findings.push(Finding { rule, nested, args });
    }

    fn report_property(&mut self, rule: SchemaRule, path: &[String], name: &str) {
        let mut full = path.to_vec();
        full.push(name.to_string());
        let mut args = self.site_args.clone();
        args.push(Value::from(full.join("/")));
        self.findings.push(Finding {
            rule,
            nested: false,
            args,
        });
    }
}

/// An upper bound got tighter: newly set, or lowered.
fn decreased(before: Option<f64>, after: Option<f64>) -> bool {
    match (before, after) {
        (None, Some(_)) => true,
        (Some(before), Some(after)) => after < before,
        _ => false,
    }
}

/// A lower bound got tighter: newly set, or raised.
fn increased(before: Option<f64>, after: Option<f64>) -> bool {
    match (before, after) {
        (None, Some(_)) => true,
        (Some(before), Some(after)) => after > before,
        _ => false,
    }
}

fn opt_value(value: &Option<String>) -> Value {
    value.as_deref().map_or(Value::Null, Value::from)
}

fn bound_value(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::MessageCatalog;
    use crate::diff::DiffEngine;
    use crate::model::{MediaType, RequestBody, Schema};
    use serde_json::json;

    fn spec(label: &str, paths: Vec<(&str, HttpMethod, Operation)>) -> OpenApiSpec {
        let mut spec = OpenApiSpec::new(label);
        for (path, method, operation) in paths {
            let item = spec.paths.shift_remove(path).unwrap_or_default();
            spec.add_path(path, item.with_operation(method, operation));
        }
        spec
    }

    fn changes(base: &OpenApiSpec, revision: &OpenApiSpec) -> Vec<ApiChange> {
        DiffEngine::new()
            .diff(base, revision)
            .expect("diff")
            .spec_diff
            .changes
    }

    fn ids(changes: &[ApiChange]) -> Vec<&str> {
        changes.iter().map(|c| c.id.as_str()).collect()
    }

    fn json_body(schema: Schema) -> Operation {
        let mut content = Content::new();
        let media = MediaType::new(SchemaRef::new(schema));
        content.insert("application/json".into(), media);
        Operation {
            request_body: Some(RequestBody {
                required: true,
                content,
                ..RequestBody::default()
            }),
            ..Operation::default()
        }
    }

    fn json_response(schema: Schema) -> Operation {
        let mut content = Content::new();
        let media = MediaType::new(SchemaRef::new(schema));
        content.insert("application/json".into(), media);
        let mut operation = Operation::default();
        operation.responses.insert(
            "200".into(),
            Response {
                content,
                ..Response::default()
            },
        );
        operation
    }

    #[test]
    fn test_every_emitted_id_has_a_message() {
        let catalog = MessageCatalog::english();
        for r in RULES {
            assert!(catalog.template(r.id).is_some(), "{}", r.id);
        }
        for site in SchemaSite::ALL {
            for schema_rule in SchemaRule::ALL {
                assert!(catalog.template(&schema_rule.id(site, false)).is_some());
                assert!(catalog.template(&schema_rule.id(site, true)).is_some());
            }
        }
    }

    #[test]
    fn test_removed_path_is_breaking_and_attributed_to_base() {
        let legacy = Operation {
            operation_id: Some("listLegacy".into()),
            ..Operation::default()
        };
        let base = spec("v1.yaml", vec![("/legacy", HttpMethod::Get, legacy)]);
        let revision = spec("v2.yaml", vec![]);

        let changes = changes(&base, &revision);
        assert_eq!(ids(&changes), vec!["api-path-removed"]);
        assert!(changes[0].is_breaking());
        assert_eq!(changes[0].source, "v1.yaml");
        assert_eq!(changes[0].operation, "GET");
        assert_eq!(changes[0].operation_id, "listLegacy");
    }

    #[test]
    fn test_added_path_emits_per_operation() {
        let base = spec("v1", vec![]);
        let revision = spec(
            "v2",
            vec![
                ("/pets", HttpMethod::Get, Operation::default()),
                ("/pets", HttpMethod::Post, Operation::default()),
            ],
        );
        let changes = changes(&base, &revision);
        assert_eq!(ids(&changes), vec!["api-path-added", "api-path-added"]);
        assert!(changes
            .iter()
            .all(|c| c.level == Level::Info && c.source == "v2"));
    }

    #[test]
    fn test_deprecation_and_operation_id() {
        let listed = Operation {
            operation_id: Some("list".into()),
            ..Operation::default()
        };
        let renamed = Operation {
            operation_id: Some("listPets".into()),
            deprecated: true,
            ..Operation::default()
        };
        let base = spec("v1", vec![("/pets", HttpMethod::Get, listed)]);
        let revision = spec("v2", vec![("/pets", HttpMethod::Get, renamed)]);

        let changes = changes(&base, &revision);
        assert_eq!(
            ids(&changes),
            vec!["endpoint-deprecated", "api-operation-id-changed"]
        );
        assert_eq!(changes[1].args, vec![json!("list"), json!("listPets")]);
    }

    #[test]
    fn test_new_required_parameter() {
        let base = spec("v1", vec![("/pets", HttpMethod::Get, Operation::default())]);
        let filtered = Operation {
            parameters: vec![
                Parameter::new("limit", ParameterLocation::Query),
                Parameter::new("X-Tenant", ParameterLocation::Header).required(true),
            ],
            ..Operation::default()
        };
        let revision = spec("v2", vec![("/pets", HttpMethod::Get, filtered)]);

        let changes = changes(&base, &revision);
        let optional = changes
            .iter()
            .find(|c| c.id == "new-optional-request-parameter")
            .expect("optional parameter change");
        assert_eq!(optional.args, vec![json!("query"), json!("limit")]);
        let required = changes
            .iter()
            .find(|c| c.id == "new-required-request-parameter")
            .expect("required parameter change");
        assert!(required.is_breaking());
        assert_eq!(
            required.uncolored_text(&MessageCatalog::english()),
            "added the new required 'header' request parameter 'X-Tenant'"
        );
    }

    #[test]
    fn test_request_body_property_rules() {
        let pet = Schema {
            required: vec!["name".into()],
            ..Schema::object([
                ("name", SchemaRef::new(Schema::string())),
                ("age", SchemaRef::new(Schema::of_type("integer"))),
            ])
        };
        let owned = Schema {
            required: vec!["name".into(), "owner".into()],
            ..Schema::object([
                ("name", SchemaRef::new(Schema::of_type("integer"))),
                ("owner", SchemaRef::new(Schema::string())),
            ])
        };
        let base = spec("v1", vec![("/pets", HttpMethod::Post, json_body(pet))]);
        let revision = spec("v2", vec![("/pets", HttpMethod::Post, json_body(owned))]);

        let changes = changes(&base, &revision);
        let found = ids(&changes);
        assert!(found.contains(&"request-body-property-type-changed"));
        assert!(found.contains(&"request-body-new-required-property"));
        assert!(found.contains(&"request-body-property-removed"));

        let type_changed = changes
            .iter()
            .find(|c| c.id == "request-body-property-type-changed")
            .expect("type change");
        assert_eq!(
            type_changed.args,
            vec![
                json!("application/json"),
                json!("name"),
                json!("string"),
                json!("integer"),
            ]
        );
        assert_eq!(
            type_changed.uncolored_text(&MessageCatalog::english()),
            "the 'application/json' request body property 'name' type changed \
             from 'string' to 'integer'"
        );

        let removed = changes
            .iter()
            .find(|c| c.id == "request-body-property-removed")
            .expect("property removal");
        assert_eq!(removed.level, Level::NonBreaking);
        assert_eq!(removed.source, "v1");
    }

    #[test]
    fn test_response_enum_and_nullable_levels() {
        let status = json_response(Schema {
            enumeration: vec![json!("on"), json!("off")],
            ..Schema::string()
        });
        let extended = json_response(Schema {
            enumeration: vec![json!("on"), json!("off"), json!("standby")],
            nullable: true,
            ..Schema::string()
        });
        let base = spec("v1", vec![("/status", HttpMethod::Get, status)]);
        let revision = spec("v2", vec![("/status", HttpMethod::Get, extended)]);

        let changes = changes(&base, &revision);
        let nullable = changes
            .iter()
            .find(|c| c.id == "response-body-became-nullable")
            .expect("nullable change");
        assert_eq!(nullable.level, Level::Breaking);

        let enum_added = changes
            .iter()
            .find(|c| c.id == "response-body-enum-value-added")
            .expect("enum change");
        assert_eq!(enum_added.level, Level::NonBreaking);
        assert_eq!(enum_added.comment, ENUM_VALUE_ADDED_COMMENT);
        assert_eq!(enum_added.args.last(), Some(&json!("standby")));
    }

    #[test]
    fn test_bounds_and_composition() {
        let loose = Schema {
            max: Some(100.0),
            ..Schema::of_type("integer")
        };
        let tight = Schema {
            max: Some(10.0),
            min: Some(1.0),
            one_of: vec![SchemaRef::new(Schema::of_type("integer"))],
            ..Schema::of_type("integer")
        };
        let base = spec("v1", vec![("/n", HttpMethod::Post, json_body(loose))]);
        let revision = spec("v2", vec![("/n", HttpMethod::Post, json_body(tight))]);

        let changes = changes(&base, &revision);
        let found = ids(&changes);
        assert!(found.contains(&"request-body-max-decreased"));
        assert!(found.contains(&"request-body-min-increased"));

        let composition = changes
            .iter()
            .find(|c| c.id == "request-body-composition-changed")
            .expect("composition change");
        assert_eq!(composition.level, Level::Unclassified);
    }

    #[test]
    fn test_response_status_and_header_rules() {
        let mut base_op = Operation::default();
        let mut ok = Response::default();
        ok.headers.insert(
            "X-Rate-Limit".into(),
            crate::model::Header {
                required: true,
                ..crate::model::Header::default()
            },
        );
        ok.headers.insert("X-Trace".into(), crate::model::Header::default());
        base_op.responses.insert("200".into(), ok);
        base_op.responses.insert("404".into(), Response::default());

        let mut rev_op = Operation::default();
        let mut ok = Response::default();
        ok.headers.insert("X-Rate-Limit".into(), crate::model::Header::default());
        rev_op.responses.insert("200".into(), ok);
        rev_op.responses.insert("201".into(), Response::default());

        let base = spec("v1", vec![("/users/{id}", HttpMethod::Get, base_op)]);
        let revision = spec("v2", vec![("/users/{id}", HttpMethod::Get, rev_op)]);

        let changes = changes(&base, &revision);
        let found = ids(&changes);
        assert!(found.contains(&"response-non-success-status-removed"));
        assert!(found.contains(&"response-status-added"));
        assert!(found.contains(&"response-header-removed"));
        assert!(found.contains(&"response-header-became-optional"));
    }

    #[test]
    fn test_prefixed_base_paths_are_found() {
        let deprecated = Operation {
            deprecated: true,
            ..Operation::default()
        };
        let base = spec(
            "v1",
            vec![("/api/pets", HttpMethod::Get, Operation::default())],
        );
        let revision = spec("v2", vec![("/pets", HttpMethod::Get, deprecated)]);

        let diff = DiffEngine::new()
            .with_prefix("/api")
            .diff(&base, &revision)
            .expect("diff");
        assert_eq!(ids(&diff.spec_diff.changes), vec!["endpoint-deprecated"]);
        assert_eq!(diff.spec_diff.changes[0].path, "/pets");
    }

    #[test]
    fn test_self_referencing_schema_walk_terminates() {
        let node = SchemaRef::pending("#/components/schemas/Node");
        node.resolve(Schema::object([("next", node.linked("#/components/schemas/Node"))]));
        let other = SchemaRef::pending("#/components/schemas/Node");
        other.resolve(Schema {
            nullable: true,
            ..Schema::object([("next", other.linked("#/components/schemas/Node"))])
        });

        let body = |schema: SchemaRef| {
            let mut content = Content::new();
            content.insert("application/json".into(), MediaType::new(schema));
            Operation {
                request_body: Some(RequestBody {
                    content,
                    ..RequestBody::default()
                }),
                ..Operation::default()
            }
        };
        let base = spec("v1", vec![("/nodes", HttpMethod::Put, body(node))]);
        let revision = spec("v2", vec![("/nodes", HttpMethod::Put, body(other))]);

        let changes = changes(&base, &revision);
        assert_eq!(ids(&changes), vec!["request-body-became-nullable"]);
    }

    #[test]
    fn test_unchanged_documents_have_no_changes() {
        let item = || spec("v", vec![("/a", HttpMethod::Get, Operation::default())]);
        assert!(changes(&item(), &item()).is_empty());
    }
}
