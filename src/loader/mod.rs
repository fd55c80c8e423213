//! Source acquisition.
//!
//! This module handles:
//! - Expanding package patterns into Go files
//! - Parsing each file with tree-sitter
//! - Lowering concrete trees into the analyzer's syntax model
//!
//! Any failure here is fatal for the run: statistics over a partial input
//! set would be misleading.

pub mod discover;
pub mod go;

// Re-export main functions
pub use discover::discover_sources;
pub use go::{load_go_file, parse_go_source};

use crate::syntax::CompilationUnit;
use crate::utils::config::LoaderConfig;
use crate::utils::error::LoadError;
use log::info;
use rayon::prelude::*;

/// Discover and parse every source matched by `patterns`
///
/// **Public** - main entry point for loading
///
/// # Errors
/// The first discovery, read or syntax error aborts loading.
pub fn load_sources(
    patterns: &[String],
    config: &LoaderConfig,
) -> Result<Vec<CompilationUnit>, LoadError> {
    let files = discover_sources(patterns, config)?;
    info!("Parsing {} Go files", files.len());

    files.par_iter().map(|path| load_go_file(path)).collect()
}
