//! Schema nodes and shared schema handles.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Named property schemas, in document order.
pub type Schemas = IndexMap<String, SchemaRef>;

/// A single schema definition.
///
/// Boolean flags default to `false`; attributes where "unset" differs from
/// any concrete value are modelled as `Option`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// The `type` tag (`string`, `object`, ...)
    pub schema_type: Option<String>,
    pub title: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,

    pub enumeration: Vec<Value>,

    pub nullable: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub allow_empty_value: bool,
    pub deprecated: bool,
    pub unique_items: bool,
    pub exclusive_min: bool,
    pub exclusive_max: bool,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub multiple_of: Option<f64>,

    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,

    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub items: Option<SchemaRef>,

    pub required: Vec<String>,
    pub properties: Schemas,
    pub min_props: Option<u64>,
    pub max_props: Option<u64>,
    /// `additionalProperties: true|false`
    pub additional_properties_allowed: Option<bool>,
    /// `additionalProperties: {schema}`
    pub additional_properties: Option<SchemaRef>,

    pub one_of: Vec<SchemaRef>,
    pub any_of: Vec<SchemaRef>,
    pub all_of: Vec<SchemaRef>,
    pub not: Option<SchemaRef>,
}

impl Schema {
    /// Create an empty schema with the given `type` tag.
    #[must_use]
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for `{type: string}`.
    #[must_use]
    pub fn string() -> Self {
        Self::of_type("string")
    }

    /// Convenience constructor for `{type: object}` with the given properties.
    #[must_use]
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        Self {
            schema_type: Some("object".to_string()),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }

    /// Whether `name` is listed in `required`.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// A reference to a schema node.
///
/// The reference itself is always present once constructed; its resolved value
/// may be absent when the `$ref` target could not be found. Clones share the
/// same slot, and the slot address is the node identity used by the
/// comparator's cycle guard.
///
/// Slots are filled at most once, which is how the document loader builds
/// self-referencing trees: every named component gets an empty slot first,
/// references clone the slot, and the slot is filled afterwards. Cyclic trees
/// therefore hold reference cycles and live until the process exits.
#[derive(Clone)]
pub struct SchemaRef {
    reference: Option<String>,
    slot: Arc<OnceLock<Schema>>,
}

impl SchemaRef {
    /// Wrap an inline schema.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(schema);
        Self {
            reference: None,
            slot: Arc::new(slot),
        }
    }

    /// A reference whose target is unknown; its value is absent.
    #[must_use]
    pub fn unresolved(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// An empty, named slot to be filled later with [`SchemaRef::resolve`].
    #[must_use]
    pub fn pending(reference: impl Into<String>) -> Self {
        Self::unresolved(reference)
    }

    /// Fill the slot. Returns `false` when it was already filled.
    pub fn resolve(&self, schema: Schema) -> bool {
        self.slot.set(schema).is_ok()
    }

    /// Another handle to the same slot, tagged with a `$ref` string.
    #[must_use]
    pub fn linked(&self, reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            slot: Arc::clone(&self.slot),
        }
    }

    /// The `$ref` string this handle was created from, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The resolved schema, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Schema> {
        self.slot.get()
    }

    /// Node identity: the address of the shared slot.
    #[must_use]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.slot) as usize
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

impl fmt::Debug for SchemaRef {
    // The value is not printed: it may be self-referential.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRef")
            .field("reference", &self.reference)
            .field("resolved", &self.value().is_some())
            .field("type", &self.value().and_then(|s| s.schema_type.as_deref()))
            .finish()
    }
}
