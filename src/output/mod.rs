//! Output writers for call-site statistics.
//!
//! This module handles:
//! - Line-delimited JSON records (write and read back)
//! - Output path validation shared by every writer

pub mod jsonl;

// Re-export main functions
pub use jsonl::{
    read_jsonl, read_jsonl_file, write_jsonl, write_jsonl_file, EncodeSummary, FuncStatRecord,
};

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate `path`, create missing parent directories and open the file
pub fn create_output_file(path: &Path) -> Result<File, OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(path).map_err(OutputError::WriteFailed)
}
