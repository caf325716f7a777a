//! Diff computation stage.
//!
//! Builds the engine from the configuration, runs the diff and applies the
//! ignore list to the classified changes.

use super::{exit_codes, PipelineError};
use crate::checker::{IgnoreList, MessageCatalog};
use crate::config::DiffConfig;
use crate::diff::{Diff, DiffEngine};
use crate::model::OpenApiSpec;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the core diff computation between two API descriptions.
pub fn compute_diff(
    config: &DiffConfig,
    base: &OpenApiSpec,
    revision: &OpenApiSpec,
) -> Result<Diff> {
    let quiet = config.behavior.quiet;

    let mut engine = DiffEngine::new();
    if let Some(prefix) = &config.comparison.prefix {
        engine = engine.with_prefix(prefix.as_str());
    }
    if let Some(filter) = &config.comparison.filter {
        engine = engine
            .with_filter(filter)
            .context("Failed to configure path filter")?;
    }

    if !quiet {
        tracing::info!("Computing structural diff...");
    }

    let mut diff = engine
        .diff(base, revision)
        .map_err(|e| PipelineError::DiffFailed { source: e.into() })?;

    if let Some(path) = &config.checker.ignore_file {
        let ignore = load_ignore_list(path, quiet)?;
        let before = diff.spec_diff.changes.len();
        let kept = ignore.apply(
            std::mem::take(&mut diff.spec_diff.changes),
            &MessageCatalog::english(),
        );
        if !quiet {
            tracing::info!("Ignored {} acknowledged changes", before - kept.len());
        }
        diff.replace_changes(kept);
    }

    if !quiet {
        tracing::info!(
            "Diff complete: {} paths changed, {} changes ({} breaking)",
            diff.summary.paths.total(),
            diff.spec_diff.changes.len(),
            diff.summary.breaking
        );
    }

    Ok(diff)
}

/// Load the ignore list, reporting which file failed.
pub fn load_ignore_list(path: &Path, quiet: bool) -> Result<IgnoreList> {
    let list = IgnoreList::from_file(path).map_err(|e| PipelineError::IgnoreListFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;
    if !quiet {
        tracing::info!("Loaded {} ignore entries from {:?}", list.len(), path);
    }
    Ok(list)
}

/// Determine the exit code from the result and the gating flags.
///
/// A tripped level gate wins over `fail_on_diff`.
#[must_use]
pub fn determine_exit_code(config: &DiffConfig, diff: &Diff) -> i32 {
    if let Some(level) = config.checker.fail_on {
        if diff.summary.count_at_least(level) > 0 {
            return exit_codes::FAIL_ON_LEVEL;
        }
    }
    if config.behavior.fail_on_diff && diff.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
