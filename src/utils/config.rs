//! Configuration and constants for the CLI.
//!
//! Constants live here; an optional TOML file can override the loader
//! and text settings at run time.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current record schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extension of Go source files
pub const GO_SOURCE_EXTENSION: &str = "go";

/// Suffix of Go test files, excluded unless tests are requested
pub const GO_TEST_SUFFIX: &str = "_test.go";

/// Package pattern suffix meaning "this directory and everything below"
pub const RECURSIVE_PATTERN_SUFFIX: &str = "...";

// Directories the go tool never treats as packages
pub const DEFAULT_SKIP_DIRS: &[&str] = &["testdata", "vendor"];

/// Placeholder name meaning "intentionally unused"
pub const DISCARD_IDENTIFIER: &str = "_";

/// Spaces between table columns
pub const DEFAULT_TABLE_PADDING: usize = 4;

// Markers used by the text table
pub const IGNORED_MARKER: &str = "(ignored)";
pub const NO_ASSIGNMENTS_MARKER: &str = "(no assignments)";

/// Optional settings file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub text: TextConfig,
}

/// Source discovery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Include `_test.go` files
    #[serde(default)]
    pub include_tests: bool,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            skip_dirs: default_skip_dirs(),
        }
    }
}

/// Text table settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextConfig {
    #[serde(default = "default_padding")]
    pub padding: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
        }
    }
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_padding() -> usize {
    DEFAULT_TABLE_PADDING
}

/// Load settings from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.loader.include_tests);
        assert_eq!(config.loader.skip_dirs, vec!["testdata", "vendor"]);
        assert_eq!(config.text.padding, DEFAULT_TABLE_PADDING);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [loader]
            include_tests = true

            [text]
            padding = 2
            "#,
        )
        .unwrap();
        assert!(config.loader.include_tests);
        assert_eq!(config.loader.skip_dirs, vec!["testdata", "vendor"]);
        assert_eq!(config.text.padding, 2);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[loader\ninclude_tests = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::ParseFailed(_))));
    }
}
