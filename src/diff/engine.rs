//! Diff orchestration over whole API descriptions.

use super::operations::diff_path_item;
use super::{PathDiff, SchemaComparator, SpecDiff, Summary};
use crate::checker::{self, ApiChange};
use crate::error::{ApiDiffError, Result};
use crate::model::{OpenApiSpec, PathItem};
use indexmap::IndexMap;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

/// The diff tree together with its summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diff {
    #[serde(rename = "spec", skip_serializing_if = "SpecDiff::is_empty")]
    pub spec_diff: SpecDiff,
    pub summary: Summary,
}

impl Diff {
    fn new(spec_diff: SpecDiff) -> Self {
        let summary = spec_diff.summary();
        Self { spec_diff, summary }
    }

    /// Whether any path or operation changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.diff
    }

    /// Swap in a filtered change list and recount.
    pub fn replace_changes(&mut self, changes: Vec<ApiChange>) {
        self.spec_diff.changes = changes;
        self.summary = self.spec_diff.summary();
    }
}

/// Compares two API descriptions.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    prefix: Option<String>,
    filter: Option<Regex>,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base paths carry this prefix, which revision paths lack.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Restrict the result to paths matching `pattern`. Empty means no filter.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self> {
        self.filter = if pattern.is_empty() {
            None
        } else {
            Some(
                Regex::new(pattern)
                    .map_err(|e| ApiDiffError::invalid_filter(pattern, e.to_string()))?,
            )
        };
        Ok(self)
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Compare `base` against `revision`.
    pub fn diff(&self, base: &OpenApiSpec, revision: &OpenApiSpec) -> Result<Diff> {
        if base.content_hash == revision.content_hash && base.content_hash != 0 {
            tracing::debug!("Documents are byte-identical, skipping comparison");
            return Ok(Diff::default());
        }

        let mut spec_diff = SpecDiff::default();

        let owners = self.key_owners(base);

        let mut matched: Vec<(&str, &PathItem, &PathItem)> = Vec::new();
        for (path, item) in &base.paths {
            let key = self.strip_prefix(path);
            let owns_key = owners.get(key) == Some(&path.as_str());
            match revision.paths.get(key) {
                Some(rev_item) if owns_key => matched.push((key, item, rev_item)),
                _ => spec_diff.paths.deleted.push(path.clone()),
            }
        }
        spec_diff.paths.added = revision
            .paths
            .keys()
            .filter(|p| !owners.contains_key(p.as_str()))
            .cloned()
            .collect();

        // One comparator per path: the cycle guard is never shared across threads.
        let modified: Vec<(String, PathDiff)> = matched
            .par_iter()
            .filter_map(|(path, base_item, rev_item)| {
                tracing::debug!("Comparing path {}", path);
                let diff = diff_path_item(&mut SchemaComparator::new(), base_item, rev_item);
                (!diff.is_empty()).then(|| ((*path).to_string(), diff))
            })
            .collect();
        spec_diff.paths.modified = modified.into_iter().collect();

        spec_diff.changes = checker::check(&spec_diff, base, revision, self.prefix());

        if let Some(filter) = &self.filter {
            spec_diff.filter_by_regex(filter);
        }

        Ok(Diff::new(spec_diff))
    }

    /// Base path that answers for each prefix-stripped key.
    ///
    /// With a prefix, `/api/pets` and `/pets` both map to `/pets`. The path
    /// already spelled without the prefix wins; the other one has no
    /// counterpart and is reported as deleted.
    fn key_owners<'a>(&self, base: &'a OpenApiSpec) -> IndexMap<&'a str, &'a str> {
        let mut owners: IndexMap<&str, &str> = IndexMap::new();
        for path in base.paths.keys() {
            let key = self.strip_prefix(path);
            if let Some(existing) = owners.get(key) {
                tracing::warn!(
                    "Base paths {} and {} collide after prefix removal",
                    existing,
                    path
                );
                if key != path.as_str() {
                    continue;
                }
            }
            owners.insert(key, path.as_str());
        }
        owners
    }

    fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        self.prefix
            .as_deref()
            .and_then(|prefix| path.strip_prefix(prefix))
            .unwrap_or(path)
    }
}
