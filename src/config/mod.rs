//! Configuration module for openapi-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use openapi_diff::config::AppConfig;
//! use openapi_diff::checker::Level;
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .prefix(Some("/api/v1".into()))
//!     .fail_on(Some(Level::Breaking))
//!     .build();
//!
//! // Load from file
//! use openapi_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.openapi-diff.yaml` file in your project root or `~/.config/openapi-diff/`:
//!
//! ```yaml
//! checker:
//!   fail_on: breaking
//!   ignore_file: breaking-changes.ignore
//! output:
//!   format: lines
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CheckerConfig, ComparisonConfig, DiffConfig,
    DiffConfigBuilder, DiffPaths, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.openapi-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
