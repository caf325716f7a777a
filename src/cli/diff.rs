//! `diff` and `changelog` command handlers.
//!
//! Both commands run the same pipeline; they differ only in which report
//! is rendered.

use crate::config::DiffConfig;
use crate::pipeline::{compute_diff, determine_exit_code, output_report, parse_spec_with_context};
use crate::reports::ReportKind;
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    run(DiffConfig {
        kind: ReportKind::Diff,
        ..config
    })
}

/// Run the changelog command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_changelog(config: DiffConfig) -> Result<i32> {
    run(DiffConfig {
        kind: ReportKind::Changelog,
        ..config
    })
}

fn run(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let base = parse_spec_with_context(&config.paths.base, quiet)?;
    let revision = parse_spec_with_context(&config.paths.revision, quiet)?;

    let diff = compute_diff(&config, &base, &revision)?;
    let exit_code = determine_exit_code(&config, &diff);

    output_report(&config, &diff, &base, &revision)?;

    Ok(exit_code)
}
