//! Acknowledged changes that should no longer be reported.
//!
//! Each non-empty line that is not a `#` comment is one entry. The first
//! whitespace-separated token starting with `/` is the entry's path; the whole
//! line is free text that must mention `"<operation> <path>"` and the rendered
//! message of the change to suppress. Matching is case-insensitive.

use super::{ApiChange, Localizer};
use crate::error::{ApiDiffError, ErrorContext, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
struct IgnoreEntry {
    path: String,
    line: String,
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreList {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                let line = line.to_lowercase();
                let path = line
                    .split_whitespace()
                    .find(|token| token.starts_with('/'))
                    .unwrap_or_default()
                    .to_string();
                IgnoreEntry { path, line }
            })
            .collect();
        Self { entries }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ApiDiffError::io(path, e))
            .context("failed to read ignore file")?;
        Ok(Self::parse(&text))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some entry covers `change`.
    #[must_use]
    pub fn matches(&self, change: &ApiChange, l: &dyn Localizer) -> bool {
        self.entries
            .iter()
            .any(|entry| change.match_ignore(&entry.path, &entry.line, l))
    }

    /// Drop every change covered by an entry.
    pub fn apply(&self, changes: Vec<ApiChange>, l: &dyn Localizer) -> Vec<ApiChange> {
        if self.entries.is_empty() {
            return changes;
        }
        let before = changes.len();
        let kept: Vec<ApiChange> = changes
            .into_iter()
            .filter(|change| !self.matches(change, l))
            .collect();
        tracing::debug!(
            "Ignore list suppressed {} of {} changes",
            before - kept.len(),
            before
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Level, MessageCatalog};
    use std::io::Write;

    const IGNORE: &str = "\
# acknowledged in release 2.1
/users/{id}  GET /users/{id} removed the 'X-Trace' response header for the status '200'

 - 2024-05-01: POST /pets /pets added the new required 'query' request parameter 'owner'
";

    fn header_removed() -> ApiChange {
        ApiChange::new("response-header-removed", Level::Breaking, "GET", "/users/{id}")
            .with_args(["X-Trace", "200"])
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let list = IgnoreList::parse(IGNORE);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries[0].path, "/users/{id}");
        assert_eq!(list.entries[1].path, "/pets");
        assert!(list.entries[1].line.contains("post /pets"));
    }

    #[test]
    fn test_apply_removes_matching_changes_only() {
        let list = IgnoreList::parse(IGNORE);
        let catalog = MessageCatalog::english();
        let other_path = ApiChange::new("response-header-removed", Level::Breaking, "GET", "/users")
            .with_args(["X-Trace", "200"]);
        let parameter =
            ApiChange::new("new-required-request-parameter", Level::Breaking, "POST", "/pets")
                .with_args(["query", "owner"]);

        let changes = vec![header_removed(), other_path.clone(), parameter];
        let kept = list.apply(changes, &catalog);
        assert_eq!(kept, vec![other_path]);
    }

    #[test]
    fn test_entry_without_path_matches_nothing() {
        let list = IgnoreList::parse("GET /users/{id}".replace('/', "").as_str());
        assert!(!list.matches(&header_removed(), &MessageCatalog::english()));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(IGNORE.as_bytes()).expect("write");
        let list = IgnoreList::from_file(file.path()).expect("readable");
        assert_eq!(list.len(), 2);

        let missing = IgnoreList::from_file(Path::new("/definitely/not/here.txt"));
        assert!(missing.is_err());
    }
}
