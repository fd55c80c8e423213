//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Unclassifiable call sites are not errors: the analyzer drops them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort source acquisition (fatal for the whole run)
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No Go source files matched pattern: {0}")]
    NoSources(String),

    #[error("Invalid package pattern: {0}")]
    InvalidPattern(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    WalkFailed(#[from] walkdir::Error),

    #[error("Syntax error in {path} at line {line}")]
    SyntaxError { path: PathBuf, line: usize },

    #[error("Parser setup failed: {0}")]
    ParserSetup(String),
}

/// Errors that can occur during record output and input
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read records: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),
}
