//! In-memory representation of an API description.
//!
//! Both JSON and YAML documents are loaded into these structures before any
//! comparison happens. Schemas are held behind [`SchemaRef`] handles so that
//! `$ref` targets are shared and self-referencing definitions are possible.

mod location;
mod schema;
mod spec;

pub use location::*;
pub use schema::*;
pub use spec::*;
