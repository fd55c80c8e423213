//! Collect command implementation.
//!
//! The collect command:
//! 1. Discovers and parses Go sources
//! 2. Analyzes every file's call sites
//! 3. Writes records or the text table

use super::models::{CollectArgs, OutputFormat};
use crate::callsite::{analyze_units, FuncCallSiteStatsRepo};
use crate::loader::load_sources;
use crate::output::{create_output_file, validate_path, write_jsonl};
use crate::render::TextRenderer;
use crate::utils::config::{load_config, Config};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the collect command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable settings file
/// * Any source that cannot be discovered, read or parsed (nothing is written)
/// * Output file that cannot be created
pub fn execute_collect(args: CollectArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/3: Loading Go sources...");
    let config = resolve_config(args.config.as_deref(), args.include_tests)?;
    let repo = collect_stats(&args.patterns, &config)?;

    info!("Step 3/3: Writing {} functions...", repo.len());
    write_stats(&repo, args.format, args.output.as_ref(), config.text.padding)?;

    let elapsed = start_time.elapsed();
    info!("Collect completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Load and analyze every matched source
///
/// **Public** - library entry point without any output
pub fn collect_stats(patterns: &[String], config: &Config) -> Result<FuncCallSiteStatsRepo> {
    let units = load_sources(patterns, &config.loader).context("Failed to load Go sources")?;

    info!("Step 2/3: Analyzing call sites in {} files...", units.len());
    let repo = analyze_units(&units);

    let total_calls: u64 = repo.get_all().values().map(|s| s.call_count).sum();
    debug!("{} call sites across {} functions", total_calls, repo.len());

    Ok(repo)
}

/// Settings file (if any) with CLI flags applied on top
pub fn resolve_config(path: Option<&Path>, include_tests: bool) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    config.loader.include_tests |= include_tests;
    Ok(config)
}

/// Write one projection of `repo` to a file or stdout
pub fn write_stats(
    repo: &FuncCallSiteStatsRepo,
    format: OutputFormat,
    output: Option<&PathBuf>,
    padding: usize,
) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = create_output_file(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Jsonl => {
            let mut writer = writer;
            let summary = write_jsonl(repo, &mut writer);
            if summary.failed > 0 {
                warn!("{} records could not be written", summary.failed);
            }
        }
        OutputFormat::Text => {
            let mut renderer = TextRenderer::with_padding(writer, padding);
            renderer.encode_all(repo);
            renderer.finish().context("Failed to write text table")?;
        }
    }

    if let Some(path) = output {
        info!("✓ Output written to: {}", path.display());
    }

    Ok(())
}

/// Validate collect arguments
///
/// **Public** - can be called before execute_collect for early validation
pub fn validate_args(args: &CollectArgs) -> Result<()> {
    if args.patterns.is_empty() {
        anyhow::bail!("missing package pattern (e.g. ./...)");
    }

    if args.patterns.iter().any(|p| p.trim().is_empty()) {
        anyhow::bail!("package pattern cannot be empty");
    }

    if let Some(output) = &args.output {
        validate_path(output)?;
    }

    Ok(())
}
