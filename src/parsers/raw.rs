//! Document structures for deserialization.
//!
//! These mirror the OpenAPI 3.x object model closely and are converted into
//! the crate model by [`super::OpenApiLoader`]. Unknown fields are ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawDocument {
    pub openapi: Option<String>,
    pub info: RawInfo,
    pub paths: IndexMap<String, RawPathItem>,
    pub components: RawComponents,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawInfo {
    pub title: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct RawComponents {
    pub schemas: IndexMap<String, RawSchema>,
    pub parameters: IndexMap<String, RawParameter>,
    pub request_bodies: IndexMap<String, RawRequestBody>,
    pub responses: IndexMap<String, RawResponse>,
    pub headers: IndexMap<String, RawHeader>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawPathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<RawParameter>,
    pub get: Option<RawOperation>,
    pub put: Option<RawOperation>,
    pub post: Option<RawOperation>,
    pub delete: Option<RawOperation>,
    pub options: Option<RawOperation>,
    pub head: Option<RawOperation>,
    pub patch: Option<RawOperation>,
    pub trace: Option<RawOperation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct RawOperation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub parameters: Vec<RawParameter>,
    pub request_body: Option<RawRequestBody>,
    pub responses: IndexMap<String, RawResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct RawParameter {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub deprecated: bool,
    pub allow_empty_value: bool,
    pub description: Option<String>,
    pub schema: Option<RawSchema>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawRequestBody {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub content: IndexMap<String, RawMediaType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawResponse {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub description: Option<String>,
    pub headers: IndexMap<String, RawHeader>,
    pub content: IndexMap<String, RawMediaType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawHeader {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub schema: Option<RawSchema>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawMediaType {
    pub schema: Option<RawSchema>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct RawSchema {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// A string, or a list of strings in 3.1 documents
    #[serde(rename = "type")]
    pub schema_type: Option<Value>,
    pub title: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "enum")]
    pub enumeration: Vec<Value>,

    pub nullable: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub allow_empty_value: bool,
    pub deprecated: bool,
    pub unique_items: bool,
    /// A boolean in 3.0, a bound in 3.1
    pub exclusive_minimum: Option<Value>,
    pub exclusive_maximum: Option<Value>,

    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiple_of: Option<f64>,

    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,

    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub items: Option<Box<RawSchema>>,

    pub required: Vec<String>,
    pub properties: IndexMap<String, RawSchema>,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub additional_properties: Option<RawAdditionalProperties>,

    pub one_of: Vec<RawSchema>,
    pub any_of: Vec<RawSchema>,
    pub all_of: Vec<RawSchema>,
    pub not: Option<Box<RawSchema>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawAdditionalProperties {
    Allowed(bool),
    Schema(Box<RawSchema>),
}

/// Convert a YAML value into a JSON value, stringifying non-string keys.
///
/// YAML allows `200:` as an integer key, which JSON objects cannot hold.
pub(super) fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml_ng::Value) -> String {
    use serde_yaml_ng::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml_ng::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
