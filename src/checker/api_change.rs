//! Change records produced by the rule catalog.

use super::{Level, Localizer};
use crate::model::SourceLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One detected difference at operation granularity.
///
/// Built once by a rule and never modified afterwards. Source coordinates are
/// kept for annotation tooling but left out of serialized reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChange {
    /// Stable rule identifier; also the message key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Message arguments, in template order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    /// Optional explanation, itself a message key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Where the change was found, usually the document label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(skip)]
    pub source_file: String,
    #[serde(skip)]
    pub source_line: usize,
    #[serde(skip)]
    pub source_line_end: usize,
    #[serde(skip)]
    pub source_column: usize,
    #[serde(skip)]
    pub source_column_end: usize,
}

impl ApiChange {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        level: Level,
        operation: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            args: Vec::new(),
            comment: String::new(),
            level,
            operation: operation.into(),
            operation_id: String::new(),
            path: path.into(),
            source: String::new(),
            source_file: String::new(),
            source_line: 0,
            source_line_end: 0,
            source_column: 0,
            source_column_end: 0,
        }
    }

    #[must_use]
    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn with_operation_id(mut self, operation_id: Option<&str>) -> Self {
        self.operation_id = operation_id.unwrap_or_default().to_string();
        self
    }

    /// Attach the document label, file and best-effort coordinates.
    #[must_use]
    pub fn with_source(
        mut self,
        label: &str,
        file: Option<&str>,
        location: Option<SourceLocation>,
    ) -> Self {
        self.source = label.to_string();
        self.source_file = file.unwrap_or_default().to_string();
        if let Some(loc) = location {
            self.source_line = loc.line;
            self.source_line_end = loc.line_end;
            self.source_column = loc.column;
            self.source_column_end = loc.column_end;
        }
        self
    }

    #[must_use]
    pub const fn is_breaking(&self) -> bool {
        self.level.is_breaking()
    }

    /// Message with arguments highlighted for a terminal.
    #[must_use]
    pub fn text(&self, l: &dyn Localizer) -> String {
        l.localize(&self.id, &colorized_values(&self.args))
    }

    /// Message with string arguments in single quotes.
    #[must_use]
    pub fn uncolored_text(&self, l: &dyn Localizer) -> String {
        l.localize(&self.id, &quoted_values(&self.args))
    }

    /// The rendered comment, or an empty string.
    #[must_use]
    pub fn comment(&self, l: &dyn Localizer) -> String {
        if self.comment.is_empty() {
            String::new()
        } else {
            l.localize(&self.comment, &[])
        }
    }

    /// Whether an ignore-list entry covers this change.
    ///
    /// Both inputs are expected in lower case. The path must match exactly and
    /// the line must mention `"<operation> <path>"` and the rendered message.
    #[must_use]
    pub fn match_ignore(&self, ignore_path: &str, ignore_line: &str, l: &dyn Localizer) -> bool {
        if ignore_path.is_empty() {
            return false;
        }

        ignore_path == self.path.to_lowercase()
            && ignore_line.contains(&format!("{} {}", self.operation, self.path).to_lowercase())
            && ignore_line.contains(&self.uncolored_text(l).to_lowercase())
    }

    /// `<level> at <source>, in API <op> <path> <text> [<id>]. <comment>`
    #[must_use]
    pub fn single_line(&self, l: &dyn Localizer, color: bool) -> String {
        if color {
            format!(
                "{} {} {}, {} API {} {} {} [{}]. {}",
                self.level.pretty(),
                l.localize("at", &[]),
                self.source,
                l.localize("in", &[]),
                green(&self.operation),
                green(&self.path),
                self.text(l),
                yellow(&self.id),
                self.comment(l)
            )
        } else {
            format!(
                "{} {} {}, {} API {} {} {} [{}]. {}",
                self.level,
                l.localize("at", &[]),
                self.source,
                l.localize("in", &[]),
                self.operation,
                self.path,
                self.uncolored_text(l),
                self.id,
                self.comment(l)
            )
        }
    }

    /// Tab-indented block form used by the text report.
    #[must_use]
    pub fn multi_line(&self, l: &dyn Localizer, color: bool) -> String {
        let comment = multi_line_comment(&self.comment(l));
        if color {
            format!(
                "{}\t[{}] {} {}\t\n\t{} API {} {}\n\t\t{}{}",
                self.level.pretty(),
                yellow(&self.id),
                l.localize("at", &[]),
                self.source,
                l.localize("in", &[]),
                green(&self.operation),
                green(&self.path),
                self.text(l),
                comment
            )
        } else {
            format!(
                "{}\t[{}] {} {}\t\n\t{} API {} {}\n\t\t{}{}",
                self.level,
                self.id,
                l.localize("at", &[]),
                self.source,
                l.localize("in", &[]),
                self.operation,
                self.path,
                self.uncolored_text(l),
                comment
            )
        }
    }
}

fn multi_line_comment(comment: &str) -> String {
    if comment.is_empty() {
        String::new()
    } else {
        format!("\n\t\t{comment}")
    }
}

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}

fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}

fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quoted_values(args: &[Value]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => format!("'{s}'"),
            other => plain_value(other),
        })
        .collect()
}

fn colorized_values(args: &[Value]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => bold(&format!("'{s}'")),
            other => plain_value(other),
        })
        .collect()
}
