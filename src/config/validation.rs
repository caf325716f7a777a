//! Configuration validation for openapi-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, CheckerConfig, ComparisonConfig, DiffConfig, OutputConfig};
use regex::Regex;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.checker.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            if let Err(e) = Regex::new(filter) {
                errors.push(ConfigError::new(
                    "diff.filter",
                    format!("Invalid regular expression '{filter}': {e}"),
                ));
            }
        }
        if let Some(prefix) = self.prefix.as_deref().filter(|p| !p.is_empty()) {
            if !prefix.starts_with('/') {
                errors.push(ConfigError::new(
                    "diff.prefix",
                    format!("Prefix '{prefix}' must start with '/'"),
                ));
            }
        }
        errors
    }
}

impl Validatable for CheckerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref file) = self.ignore_file {
            if !file.is_file() {
                errors.push(ConfigError::new(
                    "checker.ignore_file",
                    format!("Ignore file does not exist: {}", file.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, path) in [
            ("paths.base", &self.paths.base),
            ("paths.revision", &self.paths.revision),
        ] {
            if !path.exists() {
                errors.push(ConfigError::new(
                    field,
                    format!("File not found: {}", path.display()),
                ));
            }
        }
        errors.extend(self.comparison.validate());
        errors.extend(self.checker.validate());
        errors.extend(self.output.validate());
        errors
    }
}
