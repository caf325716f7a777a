//! Order-independent comparison of schema collections.
//!
//! Two collections are equal when each element on either side has a
//! structurally equal counterpart on the other. Matching is first-fit: the
//! first equal counterpart found satisfies an element, and counterparts are
//! not consumed, so `[A, A]` and `[A]` compare as equal.

use super::SchemaComparator;
use crate::model::{SchemaRef, Schemas};

/// Whether two `oneOf`/`anyOf`/`allOf` lists differ as unordered collections.
pub fn collections_differ(
    comparator: &mut SchemaComparator,
    list1: &[SchemaRef],
    list2: &[SchemaRef],
) -> bool {
    !contained(comparator, list1, list2) || !contained(comparator, list2, list1)
}

/// Every resolved element of `from` has an equal element in `into`.
///
/// Elements without a value need no match; they can never equal a resolved
/// element, so they are skipped as candidates too.
fn contained(comparator: &mut SchemaComparator, from: &[SchemaRef], into: &[SchemaRef]) -> bool {
    from.iter().filter(|s| s.value().is_some()).all(|schema| {
        into.iter()
            .filter(|candidate| candidate.value().is_some())
            .any(|candidate| comparator.equal(schema, candidate))
    })
}

/// Whether two named property maps differ. Keys must match exactly.
pub fn maps_differ(comparator: &mut SchemaComparator, map1: &Schemas, map2: &Schemas) -> bool {
    !map_contained(comparator, map1, map2) || !map_contained(comparator, map2, map1)
}

fn map_contained(comparator: &mut SchemaComparator, from: &Schemas, into: &Schemas) -> bool {
    from.iter().all(|(name, schema)| {
        into.get(name)
            .is_some_and(|other| comparator.diff(Some(schema), Some(other)).is_empty())
    })
}

/// Set inequality for plain values: size mismatch or a member missing on
/// either side.
pub fn unordered_differ<T: PartialEq>(list1: &[T], list2: &[T]) -> bool {
    list1.len() != list2.len()
        || list1.iter().any(|v| !list2.contains(v))
        || list2.iter().any(|v| !list1.contains(v))
}
