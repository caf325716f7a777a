//! Best-effort source coordinates for path and operation keys.
//!
//! The loader works on decoded values, which carry no positions. This index
//! recovers them by scanning the raw text for mapping keys, which is enough to
//! annotate changes in the original document.

use super::HttpMethod;
use std::collections::HashMap;

/// A line/column range within a document (1-based, inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub line_end: usize,
    pub column: usize,
    pub column_end: usize,
}

/// Positions of path keys and of the operation keys nested under them.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    paths: HashMap<String, SourceLocation>,
    operations: HashMap<(String, HttpMethod), SourceLocation>,
}

impl SourceIndex {
    /// Scan raw document text.
    ///
    /// A line whose first token is a quoted or bare key starting with `/`
    /// opens a path; a following `get`/`post`/... key is attributed to the
    /// most recent path.
    #[must_use]
    pub fn build(content: &str) -> Self {
        let mut index = Self::default();
        let mut current: Option<String> = None;

        for (line_no, line) in content.lines().enumerate() {
            let indent = line.len() - line.trim_start().len();
            let Some((key, key_len)) = leading_key(line.trim_start()) else {
                continue;
            };
            let location = SourceLocation {
                line: line_no + 1,
                line_end: line_no + 1,
                column: indent + 1,
                column_end: indent + key_len,
            };

            if key.starts_with('/') {
                index.paths.entry(key.to_string()).or_insert(location);
                current = Some(key.to_string());
            } else if let (Some(path), Ok(method)) = (&current, key.parse::<HttpMethod>()) {
                index
                    .operations
                    .entry((path.clone(), method))
                    .or_insert(location);
            }
        }

        index
    }

    #[must_use]
    pub fn path(&self, path: &str) -> Option<SourceLocation> {
        self.paths.get(path).copied()
    }

    /// Operation location, falling back to its path.
    #[must_use]
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<SourceLocation> {
        self.operations
            .get(&(path.to_string(), method))
            .copied()
            .or_else(|| self.path(path))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Extract a mapping key at the start of a trimmed line.
///
/// Returns the unquoted key and the length of its source text including quotes.
fn leading_key(trimmed: &str) -> Option<(&str, usize)> {
    let quote = trimmed.chars().next()?;
    if quote == '"' || quote == '\'' {
        let rest = &trimmed[1..];
        let end = rest.find(quote)?;
        let after = rest[end + 1..].trim_start();
        after.starts_with(':').then(|| (&rest[..end], end + 2))
    } else {
        let end = trimmed.find(':')?;
        let key = trimmed[..end].trim_end();
        (!key.is_empty() && !key.contains(' ')).then_some((key, key.len()))
    }
}
