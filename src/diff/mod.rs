//! Structural diff engine for API descriptions.
//!
//! # Architecture
//!
//! - [`SchemaComparator`] compares two schema handles recursively, guarding
//!   against reference cycles, and produces a [`SchemaDiff`].
//! - The containment matcher compares `oneOf`/`anyOf`/`allOf` lists and
//!   property maps without regard to order.
//! - [`DiffEngine`] walks matched paths and operations in parallel, builds a
//!   [`SpecDiff`] tree, runs the rule catalog over it and derives a [`Summary`].
//!
//! # Example
//!
//! ```no_run
//! use openapi_diff::diff::DiffEngine;
//! use openapi_diff::parsers::parse_spec;
//! use std::path::Path;
//!
//! let base = parse_spec(Path::new("v1.yaml")).unwrap();
//! let revision = parse_spec(Path::new("v2.yaml")).unwrap();
//!
//! let diff = DiffEngine::new().diff(&base, &revision).unwrap();
//! println!("{} breaking changes", diff.summary.breaking);
//! ```

mod containment;
mod engine;
pub mod operations;
mod schema_diff;
mod spec_diff;
mod summary;
mod value_diff;

pub use containment::{collections_differ, maps_differ, unordered_differ};
pub use engine::{Diff, DiffEngine};
pub use schema_diff::{diff_schema, SchemaComparator, SchemaDiff, SchemaStatus};
pub use spec_diff::{
    ContentDiff, HeaderDiff, HeadersDiff, OperationDiff, ParameterDiff, ParametersDiff, PathDiff,
    PathsDiff, RequestBodyDiff, ResponseDiff, ResponsesDiff, SpecDiff,
};
pub use summary::{Summary, SummaryDetails};
pub use value_diff::{ValueDiff, ZeroValue};
