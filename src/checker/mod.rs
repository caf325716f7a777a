//! Change classification.
//!
//! The rule catalog walks a [`SpecDiff`](crate::diff::SpecDiff) and produces a
//! flat list of [`ApiChange`]s, each with a stable rule id and a [`Level`].
//! Messages are rendered through a [`Localizer`]; [`MessageCatalog::english`]
//! carries the built-in templates. An [`IgnoreList`] suppresses changes that
//! were already acknowledged.

mod api_change;
mod ignore;
mod level;
mod localizer;
mod rules;

pub use api_change::ApiChange;
pub use ignore::IgnoreList;
pub use level::Level;
pub use localizer::{Localizer, MessageCatalog};
pub use rules::{check, messages};
