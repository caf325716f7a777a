//! API description loader.
//!
//! Reads OpenAPI 3.x documents in JSON or YAML form into the in-memory model.
//! Component schemas are resolved into shared handles, so `$ref` cycles are
//! preserved as cycles instead of being expanded.
//!
//! ## Usage
//!
//! ```no_run
//! use openapi_diff::parsers::parse_spec;
//! use std::path::Path;
//!
//! let spec = parse_spec(Path::new("openapi.yaml")).unwrap();
//! println!("{} paths", spec.paths.len());
//! ```

mod openapi;
mod raw;

pub use openapi::OpenApiLoader;

use crate::error::{ApiDiffError, ErrorContext, ParseErrorKind, Result};
use crate::model::{OpenApiSpec, SourceIndex, SpecSource};
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Serialization detected from document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// JSON documents start with `{`; everything else is treated as YAML.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Maximum document size (64 MB).
const MAX_SPEC_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Load a document from disk.
///
/// The source label is the path as given, which is what change records and
/// reports show as the change location.
pub fn parse_spec(path: &Path) -> Result<OpenApiSpec> {
    let metadata = std::fs::metadata(path).map_err(|e| ApiDiffError::io(path, e))?;
    if metadata.len() > MAX_SPEC_FILE_SIZE {
        return Err(ApiDiffError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_SPEC_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ApiDiffError::io(path, e))?;

    let label = path.display().to_string();
    let mut spec =
        parse_spec_str(&content, &label).with_context(|| format!("loading {label}"))?;
    spec.source.file = Some(label);
    Ok(spec)
}

/// Load a document from a string. `label` names the document in change records.
pub fn parse_spec_str(content: &str, label: &str) -> Result<OpenApiSpec> {
    let value = match DocumentFormat::detect(content) {
        DocumentFormat::Json => serde_json::from_str::<serde_json::Value>(content)?,
        DocumentFormat::Yaml => {
            raw::yaml_to_json(serde_yaml_ng::from_str::<serde_yaml_ng::Value>(content)?)
        }
    };

    let has_version = value
        .get("openapi")
        .is_some_and(serde_json::Value::is_string);
    if !has_version {
        return Err(ApiDiffError::unknown_format(label));
    }

    let document: raw::RawDocument = serde_json::from_value(value).map_err(|e| {
        ApiDiffError::parse(
            format!("reading {label}"),
            ParseErrorKind::InvalidValue {
                field: "document".to_string(),
                message: e.to_string(),
            },
        )
    })?;

    let mut spec = OpenApiLoader::load(document)?;
    spec.source = SpecSource {
        label: label.to_string(),
        file: None,
        index: SourceIndex::build(content),
    };
    spec.content_hash = xxh3_64(content.as_bytes());

    tracing::debug!(
        "Loaded {} paths and {} operations from {}",
        spec.paths.len(),
        spec.operation_count(),
        label
    );
    Ok(spec)
}
