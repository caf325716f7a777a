//! Document loading stage.

use super::PipelineError;
use crate::model::OpenApiSpec;
use anyhow::Result;
use std::path::Path;

/// Parse an API description with context for error messages
pub fn parse_spec_with_context(path: &Path, quiet: bool) -> Result<OpenApiSpec> {
    if !quiet {
        tracing::info!("Parsing API description: {:?}", path);
    }

    let spec = crate::parsers::parse_spec(path).map_err(|e| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            "Parsed {} paths, {} operations",
            spec.paths.len(),
            spec.operation_count()
        );
    }

    Ok(spec)
}
