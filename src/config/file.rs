//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".openapi-diff.yaml",
    ".openapi-diff.yml",
    "openapi-diff.yaml",
    "openapi-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/openapi-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("openapi-diff")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Where `config init` writes by default.
#[must_use]
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAMES[0])
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override.
    pub fn merge(&mut self, other: &Self) {
        if other.diff.prefix.is_some() {
            self.diff.prefix.clone_from(&other.diff.prefix);
        }
        if other.diff.filter.is_some() {
            self.diff.filter.clone_from(&other.diff.filter);
        }

        if other.checker.fail_on.is_some() {
            self.checker.fail_on = other.checker.fail_on;
        }
        if other.checker.min_level != crate::checker::Level::default() {
            self.checker.min_level = other.checker.min_level;
        }
        if other.checker.ignore_file.is_some() {
            self.checker.ignore_file.clone_from(&other.checker.ignore_file);
        }
        if other.checker.multiline {
            self.checker.multiline = true;
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.fail_on_diff {
            self.behavior.fail_on_diff = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# openapi-diff configuration
# Place this file at .openapi-diff.yaml in your project root or ~/.config/openapi-diff/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# openapi-diff configuration file
# =================================
#
# Place it at:
#   - .openapi-diff.yaml in your project root
#   - ~/.config/openapi-diff/openapi-diff.yaml for global config
#
# CLI arguments always override file settings.

# Document matching
#   prefix: carried by base paths but not by revision paths, e.g. /api/v1
#   filter: only report paths matching this regular expression, e.g. ^/pets
diff: {}

# Change classification
checker:
  # Exit with code 2 when a change at or above this level remains:
  # unclassified, info, non-breaking, breaking
  # fail_on: breaking
  # Leave lower levels out of the changelog
  min_level: unclassified
  # Acknowledged changes, one per line
  # ignore_file: ./breaking-changes.ignore
  multiline: false

# Output configuration
output:
  # Format: auto, json, yaml, text, lines, summary
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if the documents differ
  fail_on_diff: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Level;
    use crate::config::{BehaviorConfig, CheckerConfig};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".openapi-diff.yaml");
        std::fs::write(&config_path, "checker:\n  fail_on: breaking\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
diff:
  prefix: /api/v1
checker:
  fail_on: breaking
  min_level: info
output:
  format: lines
behavior:
  fail_on_diff: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.diff.prefix.as_deref(), Some("/api/v1"));
        assert_eq!(config.checker.fail_on, Some(Level::Breaking));
        assert_eq!(config.checker.min_level, Level::Info);
        assert_eq!(config.output.format, ReportFormat::Lines);
        assert!(config.behavior.fail_on_diff);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "checker:\n  fail_on: catastrophic\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig {
            diff: crate::config::ComparisonConfig {
                prefix: Some("/api".into()),
                filter: Some("^/pets".into()),
            },
            ..AppConfig::default()
        };
        let override_config = AppConfig {
            checker: CheckerConfig {
                fail_on: Some(Level::NonBreaking),
                ..CheckerConfig::default()
            },
            behavior: BehaviorConfig {
                quiet: true,
                ..Default::default()
            },
            diff: crate::config::ComparisonConfig {
                filter: Some("^/owners".into()),
                prefix: None,
            },
            ..AppConfig::default()
        };

        base.merge(&override_config);

        assert_eq!(base.diff.prefix.as_deref(), Some("/api"));
        assert_eq!(base.diff.filter.as_deref(), Some("^/owners"));
        assert_eq!(base.checker.fail_on, Some(Level::NonBreaking));
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("checker:"));
        assert!(example.contains("min_level"));
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig =
            serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output:\n  no_color: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
