//! Recursive structural comparison of schema nodes.

use super::containment::{collections_differ, maps_differ, unordered_differ};
use super::ValueDiff;
use crate::model::{Schema, SchemaRef};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Differences between two schema nodes at one position in the tree.
///
/// The four presence flags are terminal: when one is set every other field
/// keeps its default. A diff with no change is exactly `SchemaDiff::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDiff {
    #[serde(skip_serializing_if = "is_false")]
    pub schema_added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub schema_deleted: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub value_added: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub value_deleted: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub one_of_diff: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub any_of_diff: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub all_of_diff: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub not_diff: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_diff: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_diff: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_diff: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "is_false")]
    pub enum_diff: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties_allowed_diff: Option<ValueDiff<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_min_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_max_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value_diff: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff<bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_diff: Option<ValueDiff<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_diff: Option<ValueDiff<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of_diff: Option<ValueDiff<Option<f64>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_diff: Option<ValueDiff<Option<String>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "is_false")]
    pub items_diff: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub required_diff: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub properties_diff: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_props_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_props_diff: Option<ValueDiff<Option<u64>>>,
    #[serde(skip_serializing_if = "is_false")]
    pub additional_properties_diff: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl SchemaDiff {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The presence state this diff was classified into.
    #[must_use]
    pub fn status(&self) -> SchemaStatus {
        if self.schema_added {
            SchemaStatus::SchemaAdded
        } else if self.schema_deleted {
            SchemaStatus::SchemaDeleted
        } else if self.value_added {
            SchemaStatus::ValueAdded
        } else if self.value_deleted {
            SchemaStatus::ValueDeleted
        } else if self.is_empty() {
            SchemaStatus::Unchanged
        } else {
            SchemaStatus::Modified
        }
    }

    fn with_status(status: SchemaStatus) -> Self {
        match status {
            SchemaStatus::SchemaAdded => Self {
                schema_added: true,
                ..Self::default()
            },
            SchemaStatus::SchemaDeleted => Self {
                schema_deleted: true,
                ..Self::default()
            },
            SchemaStatus::ValueAdded => Self {
                value_added: true,
                ..Self::default()
            },
            SchemaStatus::ValueDeleted => Self {
                value_deleted: true,
                ..Self::default()
            },
            SchemaStatus::Unchanged | SchemaStatus::Modified => Self::default(),
        }
    }
}

/// Presence classification of a schema pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Nothing to compare, or every attribute equal
    Unchanged,
    SchemaAdded,
    SchemaDeleted,
    ValueAdded,
    ValueDeleted,
    /// Both values present with at least one attribute difference
    Modified,
}

/// Classify a pair of optional handles, in priority order.
fn classify<'a>(
    schema1: Option<&'a SchemaRef>,
    schema2: Option<&'a SchemaRef>,
) -> Result<(&'a Schema, &'a Schema), SchemaStatus> {
    let (ref1, ref2) = match (schema1, schema2) {
        (None, None) => return Err(SchemaStatus::Unchanged),
        (None, Some(_)) => return Err(SchemaStatus::SchemaAdded),
        (Some(_), None) => return Err(SchemaStatus::SchemaDeleted),
        (Some(a), Some(b)) => (a, b),
    };

    match (ref1.value(), ref2.value()) {
        (None, None) => Err(SchemaStatus::Unchanged),
        (None, Some(_)) => Err(SchemaStatus::ValueAdded),
        (Some(_), None) => Err(SchemaStatus::ValueDeleted),
        (Some(a), Some(b)) => Ok((a, b)),
    }
}

/// Stateful comparator carrying the cycle guard for one top-level comparison.
///
/// `active` holds the identity pairs currently on the recursion stack. A pair
/// met again while still active compares as equal, which terminates recursion
/// through self-referencing definitions.
///
/// `finished` remembers every pair compared in full, so each pair of nodes is
/// walked at most once per comparator.
#[derive(Debug, Default)]
pub struct SchemaComparator {
    active: HashSet<(usize, usize)>,
    finished: HashMap<(usize, usize), SchemaDiff>,
}

impl SchemaComparator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare two optional schema handles. Never fails.
    pub fn diff(
        &mut self,
        schema1: Option<&SchemaRef>,
        schema2: Option<&SchemaRef>,
    ) -> SchemaDiff {
        let (value1, value2) = match classify(schema1, schema2) {
            Ok(values) => values,
            Err(status) => return SchemaDiff::with_status(status),
        };

        // classify only succeeds when both handles are present
        let key = match (schema1, schema2) {
            (Some(a), Some(b)) => (a.identity(), b.identity()),
            _ => return SchemaDiff::default(),
        };
        if let Some(done) = self.finished.get(&key) {
            return done.clone();
        }
        if !self.active.insert(key) {
            return SchemaDiff::default();
        }

        let result = self.diff_values(value1, value2);
        self.active.remove(&key);
        self.finished.insert(key, result.clone());
        result
    }

    /// Number of node pairs compared in full so far.
    #[must_use]
    pub fn pairs_compared(&self) -> usize {
        self.finished.len()
    }

    /// Whether two handles compare as structurally equal.
    pub fn equal(&mut self, schema1: &SchemaRef, schema2: &SchemaRef) -> bool {
        self.diff(Some(schema1), Some(schema2)).is_empty()
    }

    fn diff_values(&mut self, value1: &Schema, value2: &Schema) -> SchemaDiff {
        SchemaDiff {
            one_of_diff: collections_differ(self, &value1.one_of, &value2.one_of),
            any_of_diff: collections_differ(self, &value1.any_of, &value2.any_of),
            all_of_diff: collections_differ(self, &value1.all_of, &value2.all_of),
            not_diff: !self
                .diff(value1.not.as_ref(), value2.not.as_ref())
                .is_empty(),

            type_diff: ValueDiff::of(&value1.schema_type, &value2.schema_type),
            title_diff: ValueDiff::of(&value1.title, &value2.title),
            format_diff: ValueDiff::of(&value1.format, &value2.format),
            description_diff: ValueDiff::of(&value1.description, &value2.description),
            enum_diff: unordered_differ(&value1.enumeration, &value2.enumeration),

            additional_properties_allowed_diff: ValueDiff::of(
                &value1.additional_properties_allowed,
                &value2.additional_properties_allowed,
            ),
            unique_items_diff: ValueDiff::of(&value1.unique_items, &value2.unique_items),
            exclusive_min_diff: ValueDiff::of(&value1.exclusive_min, &value2.exclusive_min),
            exclusive_max_diff: ValueDiff::of(&value1.exclusive_max, &value2.exclusive_max),
            nullable_diff: ValueDiff::of(&value1.nullable, &value2.nullable),
            read_only_diff: ValueDiff::of(&value1.read_only, &value2.read_only),
            write_only_diff: ValueDiff::of(&value1.write_only, &value2.write_only),
            allow_empty_value_diff: ValueDiff::of(
                &value1.allow_empty_value,
                &value2.allow_empty_value,
            ),
            deprecated_diff: ValueDiff::of(&value1.deprecated, &value2.deprecated),

            min_diff: ValueDiff::of(&value1.min, &value2.min),
            max_diff: ValueDiff::of(&value1.max, &value2.max),
            multiple_of_diff: ValueDiff::of(&value1.multiple_of, &value2.multiple_of),

            min_length_diff: ValueDiff::of(&value1.min_length, &value2.min_length),
            max_length_diff: ValueDiff::of(&value1.max_length, &value2.max_length),
            pattern_diff: ValueDiff::of(&value1.pattern, &value2.pattern),

            min_items_diff: ValueDiff::of(&value1.min_items, &value2.min_items),
            max_items_diff: ValueDiff::of(&value1.max_items, &value2.max_items),
            items_diff: !self
                .diff(value1.items.as_ref(), value2.items.as_ref())
                .is_empty(),

            required_diff: unordered_differ(&value1.required, &value2.required),
            properties_diff: maps_differ(self, &value1.properties, &value2.properties),
            min_props_diff: ValueDiff::of(&value1.min_props, &value2.min_props),
            max_props_diff: ValueDiff::of(&value1.max_props, &value2.max_props),
            additional_properties_diff: !self
                .diff(
                    value1.additional_properties.as_ref(),
                    value2.additional_properties.as_ref(),
                )
                .is_empty(),
            ..SchemaDiff::default()
        }
    }
}

/// Compare two optional schema handles with a fresh cycle guard.
#[must_use]
pub fn diff_schema(schema1: Option<&SchemaRef>, schema2: Option<&SchemaRef>) -> SchemaDiff {
    SchemaComparator::new().diff(schema1, schema2)
}
