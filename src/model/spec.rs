//! Contract-level structures: paths, operations, parameters and responses.

use super::{SchemaRef, SourceIndex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed API description.
#[derive(Debug, Clone, Default)]
pub struct OpenApiSpec {
    /// `openapi` version string
    pub version: Option<String>,
    pub info: Info,
    /// Path templates in document order
    pub paths: IndexMap<String, PathItem>,
    /// Named component schemas
    pub schemas: IndexMap<String, SchemaRef>,
    /// Where the document came from
    pub source: SpecSource,
    /// Hash of the raw document text; 0 when built in memory
    pub content_hash: u64,
}

impl OpenApiSpec {
    /// Create an empty spec with the given source label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            source: SpecSource {
                label: label.into(),
                ..SpecSource::default()
            },
            ..Self::default()
        }
    }

    /// Add (or replace) a path item.
    pub fn add_path(&mut self, path: impl Into<String>, item: PathItem) {
        self.paths.insert(path.into(), item);
    }

    /// Total number of operations across all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|p| p.operations.len()).sum()
    }

    /// Look up one operation.
    #[must_use]
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|p| p.operations.get(&method))
    }
}

/// The `info` block.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Document origin, used to fill change source metadata.
#[derive(Debug, Clone, Default)]
pub struct SpecSource {
    /// Human label, usually the file name
    pub label: String,
    /// Full path of the file, if loaded from disk
    pub file: Option<String>,
    /// Line index of path and operation keys
    pub index: SourceIndex,
}

/// HTTP operation verbs supported by OpenAPI path items.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All methods in canonical document order.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Upper-case verb, as rendered in change records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }

    /// Lower-case key, as written in documents.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown HTTP method '{s}'"))
    }
}

/// All operations under one path template.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl PathItem {
    /// Builder-style helper to attach an operation.
    #[must_use]
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        self.operations.insert(method, operation);
        self
    }
}

/// A single operation.
///
/// `parameters` holds the effective list: path-level parameters are merged in
/// by the loader, operation-level entries win on `(in, name)` collisions.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Keyed by status code or `default`
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter is carried.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            other => Err(format!("unknown parameter location '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub deprecated: bool,
    pub allow_empty_value: bool,
    pub description: Option<String>,
    pub schema: Option<SchemaRef>,
}

impl Parameter {
    /// A parameter with no schema; path parameters are always required.
    #[must_use]
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: location == ParameterLocation::Path,
            deprecated: false,
            allow_empty_value: false,
            description: None,
            schema: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Media types keyed by name (`application/json`, ...).
pub type Content = IndexMap<String, MediaType>;

#[derive(Debug, Clone, Default)]
pub struct MediaType {
    pub schema: Option<SchemaRef>,
}

impl MediaType {
    #[must_use]
    pub fn new(schema: SchemaRef) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: Content,
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    pub description: Option<String>,
    pub headers: IndexMap<String, Header>,
    pub content: Content,
}

impl Response {
    /// Whether a status key denotes success (`2xx`, `2XX`).
    #[must_use]
    pub fn is_success_status(status: &str) -> bool {
        status.starts_with('2')
    }
}

#[derive(Debug, Clone, Default)]
pub struct Header {
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub schema: Option<SchemaRef>,
}
