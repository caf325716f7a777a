//! **Structural diffing and breaking-change classification for OpenAPI documents.**
//!
//! `openapi-diff` compares two versions of an API description and reports
//! what changed, from individual schema attributes up to whole paths, and
//! classifies every change as informational, non-breaking or breaking so CI
//! pipelines can gate releases on contract compatibility.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the in-memory contract tree, [`OpenApiSpec`]. Component
//!   schemas are shared handles, so recursive `$ref`s stay recursive.
//! - **[`parsers`]**: loads JSON or YAML OpenAPI 3.x documents into the model.
//! - **[`diff`]**: home of the [`DiffEngine`]. The recursive schema comparator
//!   matches `oneOf`/`anyOf`/`allOf` and property maps by mutual containment,
//!   so reordering is never reported as a change.
//! - **[`checker`]**: turns the diff tree into [`ApiChange`] records with a
//!   stable rule id, a [`Level`] and a localized message.
//! - **[`reports`]**: JSON, YAML, text, line and summary output.
//! - **[`pipeline`]** and **[`cli`]**: the parse → diff → check → report flow
//!   behind the command-line tool.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use openapi_diff::{parse_spec, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = parse_spec(Path::new("v1.yaml"))?;
//!     let revision = parse_spec(Path::new("v2.yaml"))?;
//!
//!     let diff = DiffEngine::new().diff(&base, &revision)?;
//!     println!("{} paths deleted", diff.summary.paths.deleted);
//!
//!     for change in diff.spec_diff.changes.iter().filter(|c| c.is_breaking()) {
//!         println!("{} {} [{}]", change.operation, change.path, change.id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Rendering changes
//!
//! Messages are rendered through a [`Localizer`]. [`MessageCatalog::english`]
//! carries the built-in messages; any `Fn(&str, &[String]) -> String` works too.
//!
//! ```no_run
//! use openapi_diff::{parse_spec_str, DiffEngine, MessageCatalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (v1, v2) = (String::new(), String::new());
//! let base = parse_spec_str(&v1, "v1.yaml")?;
//! let revision = parse_spec_str(&v2, "v2.yaml")?;
//! let diff = DiffEngine::new().with_prefix("/api/v1").diff(&base, &revision)?;
//!
//! let catalog = MessageCatalog::english();
//! for change in &diff.spec_diff.changes {
//!     println!("{}", change.single_line(&catalog, false));
//! }
//! # Ok(())
//! # }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod checker;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use checker::{ApiChange, IgnoreList, Level, Localizer, MessageCatalog};
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, CheckerConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, DiffConfigBuilder};
pub use diff::{diff_schema, Diff, DiffEngine, SchemaDiff, SpecDiff, Summary};
pub use error::{ApiDiffError, ErrorContext, OptionContext, Result};
pub use model::{OpenApiSpec, Schema, SchemaRef};
pub use parsers::{parse_spec, parse_spec_str};
pub use reports::{ReportFormat, ReportGenerator};
