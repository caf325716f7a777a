//! One change per line.
//!
//! The output of this reporter can be pasted into an ignore file as-is.

use super::{visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::checker::{Localizer, MessageCatalog};
use crate::diff::Diff;
use crate::model::OpenApiSpec;
use std::fmt::Write;

pub struct LinesReporter {
    colored: bool,
    localizer: Box<dyn Localizer>,
}

impl LinesReporter {
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

    fn render(&self, diff: &Diff, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = String::new();
        for change in visible_changes(diff, config) {
            writeln!(out, "{}", change.single_line(self.localizer.as_ref(), self.colored))?;
        }
        Ok(out)
    }
}

impl Default for LinesReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for LinesReporter {
    /// The structural tree has no line form; the change list stands in for it.
    fn generate_diff_report(
        &self,
        diff: &Diff,
        _base: &OpenApiSpec,
        _revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(diff, config)
    }

    fn generate_changelog_report(
        &self,
        diff: &Diff,
        _base: &OpenApiSpec,
        _revision: &OpenApiSpec,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(diff, config)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{IgnoreList, Level};
    use crate::diff::DiffEngine;
    use crate::model::{HttpMethod, Operation, PathItem};

    fn diff() -> (Diff, OpenApiSpec, OpenApiSpec) {
        let mut base = OpenApiSpec::new("base.yaml");
        base.add_path(
            "/pets",
            PathItem::default().with_operation(
                HttpMethod::Get,
                Operation {
                    operation_id: Some("listPets".into()),
                    ..Operation::default()
                },
            ),
        );
        let mut revision = OpenApiSpec::new("revision.yaml");
        revision.add_path(
            "/pets",
            PathItem::default().with_operation(
                HttpMethod::Get,
                Operation {
                    operation_id: Some("getPets".into()),
                    deprecated: true,
                    ..Operation::default()
                },
            ),
        );
        let diff = DiffEngine::new().diff(&base, &revision).expect("diff");
        (diff, base, revision)
    }

    #[test]
    fn test_one_line_per_change() {
        let (diff, base, revision) = diff();
        let out = LinesReporter::new()
            .no_color()
            .generate_changelog_report(&diff, &base, &revision, &ReportConfig::changelog())
            .expect("report");
        assert_eq!(out.lines().count(), diff.spec_diff.changes.len());
        assert!(out.contains("api operation id changed from 'listPets' to 'getPets'"));
        assert!(out.contains("GET /pets"));
    }

    #[test]
    fn test_min_level_filters_lines() {
        let (diff, base, revision) = diff();
        let config = ReportConfig {
            min_level: Level::Breaking,
            ..ReportConfig::changelog()
        };
        let out = LinesReporter::new()
            .no_color()
            .generate_changelog_report(&diff, &base, &revision, &config)
            .expect("report");
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_works_as_ignore_file() {
        let (diff, base, revision) = diff();
        let out = LinesReporter::new()
            .no_color()
            .generate_changelog_report(&diff, &base, &revision, &ReportConfig::changelog())
            .expect("report");
        let ignore = IgnoreList::parse(&out);
        let kept = ignore.apply(diff.spec_diff.changes.clone(), &MessageCatalog::english());
        assert!(kept.is_empty());
    }
}
