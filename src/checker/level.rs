//! Change severity levels.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a detected change, in ascending order.
///
/// `Unclassified` sits below every triaged level so that level thresholds
/// never trip on changes nobody has assessed yet.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    /// Pending triage
    #[default]
    Unclassified,
    /// Informational only
    Info,
    /// Backward compatible
    NonBreaking,
    /// Can break existing clients
    Breaking,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Self; 4] = [
        Self::Breaking,
        Self::NonBreaking,
        Self::Info,
        Self::Unclassified,
    ];

    /// Whether this level is classified as breaking.
    #[must_use]
    pub const fn is_breaking(self) -> bool {
        matches!(self, Self::Breaking)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unclassified => "unclassified",
            Self::Info => "info",
            Self::NonBreaking => "non-breaking",
            Self::Breaking => "breaking",
        }
    }

    /// ANSI color code used when rendering this level to a terminal.
    #[must_use]
    pub const fn color_code(self) -> &'static str {
        match self {
            Self::Unclassified => "90",
            Self::Info => "36",
            Self::NonBreaking => "32",
            Self::Breaking => "31",
        }
    }

    /// The level name wrapped in its terminal color.
    #[must_use]
    pub fn pretty(self) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.color_code(), self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Level::Unclassified < Level::Info);
        assert!(Level::Info < Level::NonBreaking);
        assert!(Level::NonBreaking < Level::Breaking);
        assert!(Level::ALL.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_only_breaking_is_breaking() {
        assert!(Level::Breaking.is_breaking());
        assert!(!Level::NonBreaking.is_breaking());
        assert!(!Level::Info.is_breaking());
        assert!(!Level::Unclassified.is_breaking());
    }

    #[test]
    fn test_names_match_serde_and_clap() {
        assert_eq!(Level::NonBreaking.to_string(), "non-breaking");
        assert_eq!(
            serde_json::to_value(Level::NonBreaking).expect("serializes"),
            "non-breaking"
        );
        let parsed = Level::from_str("non-breaking", true).expect("clap parses");
        assert_eq!(parsed, Level::NonBreaking);
    }
}
