//! Unified error types for openapi-diff.
//!
//! The schema comparator itself never fails; errors come from loading
//! documents and building the diff engine. Reporters and the CLI pipeline
//! carry their own error types.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for openapi-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiDiffError {
    /// Errors while loading an API description
    #[error("Failed to parse API description: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while setting up or running a diff
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unknown document format - expected an OpenAPI 3.x document with an 'openapi' field")]
    UnknownFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unresolvable reference: {0}")]
    UnresolvedReference(String),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Invalid path filter '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for openapi-diff operations
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ApiDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for unknown format
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::parse(format!("at {}", path.into()), ParseErrorKind::UnknownFormat)
    }

    /// Create a parse error for a `$ref` that points nowhere
    pub fn unresolved_reference(reference: impl Into<String>) -> Self {
        Self::parse(
            "resolving references",
            ParseErrorKind::UnresolvedReference(reference.into()),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid-filter diff error
    pub fn invalid_filter(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::diff(
            "compiling path filter",
            DiffErrorKind::InvalidFilter {
                pattern: pattern.into(),
                message: message.into(),
            },
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ApiDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ApiDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml_ng::Error> for ApiDiffError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, so a failure reads like the
/// path through the code that produced it.
///
/// # Example
///
/// ```ignore
/// use openapi_diff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<OpenApiSpec> {
///     let content = std::fs::read_to_string(path)
///         .context("reading API description")?;
///
///     parse_spec_str(&content, "base")
///         .with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ApiDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ApiDiffError, new_ctx: &str) -> ApiDiffError {
    match err {
        ApiDiffError::Parse {
            context: existing,
            source,
        } => ApiDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Diff {
            context: existing,
            source,
        } => ApiDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Io {
            path,
            message,
            source,
        } => ApiDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ApiDiffError::Validation(msg) => ApiDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing came before.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ApiDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ApiDiffError::Validation(f().into()))
    }
}
