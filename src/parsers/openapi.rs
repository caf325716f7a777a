//! Conversion of deserialized documents into the crate model.

use super::raw::{
    RawAdditionalProperties, RawComponents, RawDocument, RawHeader, RawOperation, RawParameter,
    RawPathItem, RawRequestBody, RawResponse, RawSchema,
};
use crate::error::{ApiDiffError, ErrorContext, ParseErrorKind, Result};
use crate::model::{
    Content, Header, HttpMethod, Info, MediaType, OpenApiSpec, Operation, Parameter,
    ParameterLocation, PathItem, RequestBody, Response, Schema, SchemaRef,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

const SCHEMA_PREFIX: &str = "#/components/schemas/";
const PARAMETER_PREFIX: &str = "#/components/parameters/";
const REQUEST_BODY_PREFIX: &str = "#/components/requestBodies/";
const RESPONSE_PREFIX: &str = "#/components/responses/";
const HEADER_PREFIX: &str = "#/components/headers/";

/// Longest `$ref` chain followed for parameters, bodies, responses and headers.
const MAX_REF_DEPTH: usize = 32;

/// Anything in `components` that may itself be a `$ref`.
trait Referable {
    fn reference(&self) -> Option<&str>;
}

macro_rules! impl_referable {
    ($($ty:ty),*) => {
        $(impl Referable for $ty {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
        })*
    };
}

impl_referable!(RawParameter, RawRequestBody, RawResponse, RawHeader);

/// Builds an [`OpenApiSpec`] from a deserialized document.
///
/// Component schemas become shared slots before anything else is converted,
/// so every `$ref` to the same component yields a handle to the same node.
/// Self-referencing definitions are therefore represented as cycles.
pub struct OpenApiLoader {
    components: RawComponents,
    schemas: IndexMap<String, SchemaRef>,
}

impl OpenApiLoader {
    pub(super) fn new(components: RawComponents) -> Self {
        let mut loader = Self {
            components,
            schemas: IndexMap::new(),
        };
        loader.allocate_schema_slots();
        loader.fill_schema_slots();
        loader
    }

    /// Convert a whole document.
    pub(super) fn load(document: RawDocument) -> Result<OpenApiSpec> {
        let RawDocument {
            openapi,
            info,
            paths,
            components,
        } = document;

        let loader = Self::new(components);
        let mut spec = OpenApiSpec {
            version: openapi,
            info: Info {
                title: info.title,
                version: info.version,
            },
            ..OpenApiSpec::default()
        };

        for (path, raw_item) in &paths {
            let item = loader
                .convert_path_item(raw_item)
                .with_context(|| format!("path '{path}'"))?;
            spec.paths.insert(path.clone(), item);
        }

        spec.schemas = loader.schemas;
        Ok(spec)
    }

    fn allocate_schema_slots(&mut self) {
        let names: Vec<String> = self.components.schemas.keys().cloned().collect();

        // Concrete definitions get their own slot.
        for name in &names {
            if self
                .components
                .schemas
                .get(name)
                .is_some_and(|raw| raw.reference.is_none())
            {
                self.schemas
                    .insert(name.clone(), SchemaRef::pending(format!("{SCHEMA_PREFIX}{name}")));
            }
        }

        // Aliases (`Foo: {$ref: Bar}`) share the slot at the end of their chain.
        for name in &names {
            if self.schemas.contains_key(name) {
                continue;
            }
            let reference = format!("{SCHEMA_PREFIX}{name}");
            let target = self
                .alias_target(name)
                .and_then(|target| self.schemas.get(&target));
            let handle = match target {
                Some(slot) => slot.linked(reference),
                None => {
                    tracing::warn!("Schema alias '{}' does not resolve to a definition", name);
                    SchemaRef::unresolved(reference)
                }
            };
            self.schemas.insert(name.clone(), handle);
        }
    }

    fn alias_target(&self, name: &str) -> Option<String> {
        let mut seen = HashSet::new();
        let mut current = name.to_string();
        loop {
            if !seen.insert(current.clone()) {
                return None;
            }
            let raw = self.components.schemas.get(&current)?;
            match raw.reference.as_deref() {
                None => return Some(current),
                Some(r) => current = r.strip_prefix(SCHEMA_PREFIX)?.to_string(),
            }
        }
    }

    fn fill_schema_slots(&self) {
        for (name, raw) in &self.components.schemas {
            if raw.reference.is_some() {
                continue;
            }
            if let Some(slot) = self.schemas.get(name) {
                slot.resolve(self.build_schema(raw));
            }
        }
    }

    /// Convert an inline schema or `$ref` into a handle.
    fn convert_schema(&self, raw: &RawSchema) -> SchemaRef {
        match raw.reference.as_deref() {
            Some(reference) => self.schema_ref(reference),
            None => SchemaRef::new(self.build_schema(raw)),
        }
    }

    fn schema_ref(&self, reference: &str) -> SchemaRef {
        let target = reference
            .strip_prefix(SCHEMA_PREFIX)
            .and_then(|name| self.schemas.get(name));
        match target {
            Some(slot) => slot.linked(reference),
            None => {
                tracing::warn!("Unresolved schema reference '{}'", reference);
                SchemaRef::unresolved(reference)
            }
        }
    }

    fn build_schema(&self, raw: &RawSchema) -> Schema {
        let (schema_type, type_nullable) = split_type(raw.schema_type.as_ref());
        let (min, exclusive_min) = bound(raw.minimum, raw.exclusive_minimum.as_ref());
        let (max, exclusive_max) = bound(raw.maximum, raw.exclusive_maximum.as_ref());

        let (additional_properties_allowed, additional_properties) =
            match &raw.additional_properties {
                None => (None, None),
                Some(RawAdditionalProperties::Allowed(allowed)) => (Some(*allowed), None),
                Some(RawAdditionalProperties::Schema(schema)) => {
                    (None, Some(self.convert_schema(schema)))
                }
            };

        Schema {
            schema_type,
            title: raw.title.clone(),
            format: raw.format.clone(),
            description: raw.description.clone(),
            enumeration: raw.enumeration.clone(),
            nullable: raw.nullable || type_nullable,
            read_only: raw.read_only,
            write_only: raw.write_only,
            allow_empty_value: raw.allow_empty_value,
            deprecated: raw.deprecated,
            unique_items: raw.unique_items,
            exclusive_min,
            exclusive_max,
            min,
            max,
            multiple_of: raw.multiple_of,
            min_length: raw.min_length,
            max_length: raw.max_length,
            pattern: raw.pattern.clone(),
            min_items: raw.min_items,
            max_items: raw.max_items,
            items: raw.items.as_deref().map(|s| self.convert_schema(s)),
            required: raw.required.clone(),
            properties: raw
                .properties
                .iter()
                .map(|(name, s)| (name.clone(), self.convert_schema(s)))
                .collect(),
            min_props: raw.min_properties,
            max_props: raw.max_properties,
            additional_properties_allowed,
            additional_properties,
            one_of: raw.one_of.iter().map(|s| self.convert_schema(s)).collect(),
            any_of: raw.any_of.iter().map(|s| self.convert_schema(s)).collect(),
            all_of: raw.all_of.iter().map(|s| self.convert_schema(s)).collect(),
            not: raw.not.as_deref().map(|s| self.convert_schema(s)),
        }
    }

    fn convert_path_item(&self, raw: &RawPathItem) -> Result<PathItem> {
        let shared = raw
            .parameters
            .iter()
            .map(|p| self.convert_parameter(p))
            .collect::<Result<Vec<_>>>()?;

        let mut item = PathItem {
            summary: raw.summary.clone(),
            description: raw.description.clone(),
            operations: IndexMap::new(),
        };

        for method in HttpMethod::ALL {
            if let Some(raw_op) = operation_slot(raw, method) {
                let operation = self
                    .convert_operation(raw_op, &shared)
                    .with_context(|| format!("{} operation", method.key()))?;
                item.operations.insert(method, operation);
            }
        }

        Ok(item)
    }

    fn convert_operation(&self, raw: &RawOperation, shared: &[Parameter]) -> Result<Operation> {
        let own = raw
            .parameters
            .iter()
            .map(|p| self.convert_parameter(p))
            .collect::<Result<Vec<_>>>()?;

        // Operation-level parameters override path-level ones with the same (in, name).
        let mut parameters: Vec<Parameter> = shared
            .iter()
            .filter(|s| {
                !own.iter()
                    .any(|o| o.location == s.location && o.name == s.name)
            })
            .cloned()
            .collect();
        parameters.extend(own);

        let request_body = raw
            .request_body
            .as_ref()
            .map(|b| self.convert_request_body(b))
            .transpose()?;

        let mut responses = IndexMap::new();
        for (status, raw_response) in &raw.responses {
            responses.insert(status.clone(), self.convert_response(raw_response)?);
        }

        Ok(Operation {
            operation_id: raw.operation_id.clone(),
            summary: raw.summary.clone(),
            description: raw.description.clone(),
            tags: raw.tags.clone(),
            deprecated: raw.deprecated,
            parameters,
            request_body,
            responses,
        })
    }

    fn convert_parameter(&self, raw: &RawParameter) -> Result<Parameter> {
        let raw = resolve(raw, &self.components.parameters, PARAMETER_PREFIX)?;
        let location: ParameterLocation = raw.location.parse().map_err(|message| {
            ApiDiffError::parse(
                format!("parameter '{}'", raw.name),
                ParseErrorKind::InvalidValue {
                    field: "in".to_string(),
                    message,
                },
            )
        })?;

        Ok(Parameter {
            name: raw.name.clone(),
            location,
            required: raw.required || location == ParameterLocation::Path,
            deprecated: raw.deprecated,
            allow_empty_value: raw.allow_empty_value,
            description: raw.description.clone(),
            schema: raw.schema.as_ref().map(|s| self.convert_schema(s)),
        })
    }

    fn convert_request_body(&self, raw: &RawRequestBody) -> Result<RequestBody> {
        let raw = resolve(raw, &self.components.request_bodies, REQUEST_BODY_PREFIX)?;
        Ok(RequestBody {
            description: raw.description.clone(),
            required: raw.required,
            content: self.convert_content(&raw.content),
        })
    }

    fn convert_response(&self, raw: &RawResponse) -> Result<Response> {
        let raw = resolve(raw, &self.components.responses, RESPONSE_PREFIX)?;
        let mut headers = IndexMap::new();
        for (name, raw_header) in &raw.headers {
            headers.insert(name.clone(), self.convert_header(raw_header)?);
        }
        Ok(Response {
            description: raw.description.clone(),
            headers,
            content: self.convert_content(&raw.content),
        })
    }

    fn convert_header(&self, raw: &RawHeader) -> Result<Header> {
        let raw = resolve(raw, &self.components.headers, HEADER_PREFIX)?;
        Ok(Header {
            description: raw.description.clone(),
            required: raw.required,
            deprecated: raw.deprecated,
            schema: raw.schema.as_ref().map(|s| self.convert_schema(s)),
        })
    }

    fn convert_content(&self, raw: &IndexMap<String, super::raw::RawMediaType>) -> Content {
        raw.iter()
            .map(|(name, media)| {
                (
                    name.clone(),
                    MediaType {
                        schema: media.schema.as_ref().map(|s| self.convert_schema(s)),
                    },
                )
            })
            .collect()
    }
}

/// Follow a `$ref` chain inside one components section.
fn resolve<'a, T: Referable>(
    raw: &'a T,
    components: &'a IndexMap<String, T>,
    prefix: &str,
) -> Result<&'a T> {
    let mut current = raw;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.reference() else {
            return Ok(current);
        };
        current = reference
            .strip_prefix(prefix)
            .and_then(|name| components.get(name))
            .ok_or_else(|| ApiDiffError::unresolved_reference(reference))?;
    }
    Err(ApiDiffError::parse(
        "resolving references",
        ParseErrorKind::InvalidValue {
            field: "$ref".to_string(),
            message: format!("reference chain longer than {MAX_REF_DEPTH}"),
        },
    ))
}

fn operation_slot(item: &RawPathItem, method: HttpMethod) -> Option<&RawOperation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Trace => item.trace.as_ref(),
    }
}

/// `type: string`, or a 3.1 type array.
///
/// `"null"` in an array becomes the nullable flag. Several remaining types
/// are sorted and joined with `|`, so `[string, integer]` and
/// `[integer, string]` read the same and any change to the set is a type change.
fn split_type(value: Option<&Value>) -> (Option<String>, bool) {
    match value {
        Some(Value::String(s)) => (Some(s.clone()), false),
        Some(Value::Array(types)) => {
            let nullable = types.iter().any(|t| t == "null");
            let mut names: Vec<&str> = types
                .iter()
                .filter_map(Value::as_str)
                .filter(|t| *t != "null")
                .collect();
            names.sort_unstable();
            names.dedup();
            let joined = (!names.is_empty()).then(|| names.join("|"));
            (joined, nullable)
        }
        _ => (None, false),
    }
}

/// 3.0 uses a boolean flag beside the bound; 3.1 puts the bound in the flag.
fn bound(inclusive: Option<f64>, exclusive: Option<&Value>) -> (Option<f64>, bool) {
    match exclusive {
        Some(Value::Bool(flag)) => (inclusive, *flag),
        Some(Value::Number(n)) => (n.as_f64().or(inclusive), true),
        _ => (inclusive, false),
    }
}
