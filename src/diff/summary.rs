//! Aggregate counts derived from a [`SpecDiff`](super::SpecDiff).

use crate::checker::Level;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of changed paths, operations and change levels.
///
/// Holds no state of its own; build it with `SpecDiff::summary()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub diff: bool,
    pub paths: SummaryDetails,
    pub operations: SummaryDetails,
    /// Number of changes per level
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub levels: BTreeMap<Level, usize>,
    pub breaking: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryDetails {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
}

impl SummaryDetails {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.deleted + self.modified
    }
}

impl Summary {
    /// Number of changes at or above `level`.
    #[must_use]
    pub fn count_at_least(&self, level: Level) -> usize {
        self.levels
            .iter()
            .filter(|(l, _)| **l >= level)
            .map(|(_, n)| n)
            .sum()
    }

    /// The most severe level present, if any change was recorded.
    #[must_use]
    pub fn highest_level(&self) -> Option<Level> {
        self.levels.keys().next_back().copied()
    }
}
