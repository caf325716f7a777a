//! Human-readable text report.

use super::{ansi_color, visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::checker::{Level, Localizer, MessageCatalog};
use crate::diff::{Diff, PathDiff};
use crate::model::OpenApiSpec;
use std::fmt::Write;

/// Text reporter: an indented tree for `diff`, one block per change for
/// `changelog`.
pub struct TextReporter {
    colored: bool,
    localizer: Box<dyn Localizer>,
}

impl TextReporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            colored: true,
            localizer: Box::new(MessageCatalog::english()),
        }
    }

    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Box::new(localizer);
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn write_path(&self, out: &mut String, path: &str, diff: &PathDiff) -> std::fmt::Result {
        writeln!(out, "  {} {path}", self.color("~", "yellow"))?;
        for method in &diff.operations_added {
            writeln!(out, "      {} {method}", self.color("+", "green"))?;
        }
        for method in &diff.operations_deleted {
            writeln!(out, "      {} {method}", self.color("-", "red"))?;
        }
        for (method, op) in &diff.operations_modified {
            writeln!(out, "      {} {method}", self.color("~", "yellow"))?;
            let mut details = Vec::new();
            if op.operation_id_diff.is_some() {
                details.push("operation id".to_string());
            }
            if op.deprecated_diff.is_some() {
                details.push("deprecation".to_string());
            }
            if op.summary_diff.is_some() || op.description_diff.is_some() {
                details.push("documentation".to_string());
            }
            if !op.parameters_diff.is_empty() {
                details.push(format!("{} parameter(s)", op.parameters_diff.len()));
            }
            if !op.request_body_diff.is_empty() {
                details.push("request body".to_string());
            }
            let responses = &op.responses_diff;
            if !responses.is_empty() {
                details.push(format!(
                    "{} response(s)",
                    responses.added.len() + responses.deleted.len() + responses.modified.len()
                ));
            }
            if !details.is_empty() {
                writeln!(out, "          {}", self.color(&details.join(", "), "dim"))?;
            }
        }
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn generate_diff_report(
        &self,
        diff: &Diff,
        _base: &OpenApiSpec,
        _revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        let title = config.title.as_deref().unwrap_or("API Diff");
        writeln!(out, "{}", self.color(title, "bold"))?;

        if !diff.has_changes() {
            writeln!(out, "{}", self.color("No changes", "dim"))?;
            return Ok(out);
        }

        let paths = &diff.spec_diff.paths;
        writeln!(
            out,
            "Paths: {} added, {} deleted, {} modified",
            paths.added.len(),
            paths.deleted.len(),
            paths.modified.len()
        )?;
        for path in &paths.added {
            writeln!(out, "  {} {path}", self.color("+", "green"))?;
        }
        for path in &paths.deleted {
            writeln!(out, "  {} {path}", self.color("-", "red"))?;
        }
        for (path, path_diff) in &paths.modified {
            self.write_path(&mut out, path, path_diff)?;
        }
        Ok(out)
    }

    fn generate_changelog_report(
        &self,
        diff: &Diff,
        _base: &OpenApiSpec,
        _revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let changes: Vec<_> = visible_changes(diff, config).collect();
        let mut out = String::new();

        let count = |level: Level| changes.iter().filter(|c| c.level == level).count();
        writeln!(
            out,
            "{} changes: {} breaking, {} non-breaking, {} info, {} unclassified\n",
            changes.len(),
            count(Level::Breaking),
            count(Level::NonBreaking),
            count(Level::Info),
            count(Level::Unclassified)
        )?;

        for change in changes {
            if config.multiline {
                writeln!(out, "{}\n", change.multi_line(self.localizer.as_ref(), self.colored))?;
            } else {
                writeln!(out, "{}", change.single_line(self.localizer.as_ref(), self.colored))?;
            }
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
