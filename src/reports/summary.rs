//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ansi_color, visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::checker::Level;
use crate::diff::{Diff, SummaryDetails};
use crate::model::OpenApiSpec;

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(
        &self,
        lines: &mut Vec<String>,
        title: &str,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
    ) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            document_name(base),
            document_name(revision)
        ));
        lines.push(format!(
            "{}  {} → {} operations",
            self.color("Size:", "cyan"),
            base.operation_count(),
            revision.operation_count()
        ));
        lines.push(String::new());
    }

    fn counts(&self, lines: &mut Vec<String>, label: &str, noun: &str, details: SummaryDetails) {
        lines.push(self.color(label, "bold"));
        if details.total() == 0 {
            lines.push(format!("  {}", self.color("No changes", "dim")));
            return;
        }
        for (count, sign, verb, color) in [
            (details.added, '+', "added", "green"),
            (details.deleted, '-', "deleted", "red"),
            (details.modified, '~', "modified", "yellow"),
        ] {
            if count > 0 {
                lines.push(format!(
                    "  {} {} {verb}",
                    self.color(&format!("{sign}{count}"), color),
                    plural(noun, count)
                ));
            }
        }
    }

    fn level_line(&self, level: Level, count: usize) -> String {
        let color = match level {
            Level::Breaking => "red",
            Level::NonBreaking => "yellow",
            Level::Info => "cyan",
            Level::Unclassified => "dim",
        };
        format!("  {} {level}", self.color(&count.to_string(), color))
    }

    fn verdict(&self, breaking: usize) -> String {
        if breaking > 0 {
            self.color(&format!("✗ {} breaking", plural_count(breaking, "change")), "red")
        } else {
            self.color("✓ No breaking changes", "green")
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("API Diff Summary");
        self.header(&mut lines, title, base, revision);

        let summary = &diff.summary;
        self.counts(&mut lines, "Paths:", "path", summary.paths);
        self.counts(&mut lines, "Operations:", "operation", summary.operations);

        lines.push(String::new());
        lines.push(self.verdict(summary.breaking));
        Ok(lines.join("\n") + "\n")
    }

    fn generate_changelog_report(
        &self,
        diff: &Diff,
        base: &OpenApiSpec,
        revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("API Changelog Summary");
        self.header(&mut lines, title, base, revision);

        let mut counts = [0usize; 4];
        for change in visible_changes(diff, config) {
            counts[change.level as usize] += 1;
        }
        let total: usize = counts.iter().sum();

        lines.push(self.color("Changes:", "bold"));
        if total == 0 {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        for level in Level::ALL {
            let count = counts[level as usize];
            if count > 0 {
                lines.push(self.level_line(level, count));
            }
        }

        lines.push(String::new());
        lines.push(self.verdict(counts[Level::Breaking as usize]));
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

fn document_name(spec: &OpenApiSpec) -> &str {
    spec.info
        .title
        .as_deref()
        .or(spec.source.file.as_deref())
        .unwrap_or(&spec.source.label)
}

fn plural(noun: &str, count: usize) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {}", plural(noun, count))
}
