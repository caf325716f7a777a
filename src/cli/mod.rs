//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod config;
mod diff;

pub use config::{run_config_init, run_config_path, run_config_schema, run_config_show};
pub use diff::{run_changelog, run_diff};

// Re-export config types used by handlers
pub use crate::config::DiffConfig;
