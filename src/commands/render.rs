//! Render command: turn a saved record stream into the text table.

use super::collect::{resolve_config, write_stats};
use super::models::{OutputFormat, RenderArgs};
use crate::output::read_jsonl_file;
use anyhow::{Context, Result};
use log::info;

/// Execute the render command
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), false)?;

    let repo = read_jsonl_file(&args.input)
        .with_context(|| format!("Failed to read records from {}", args.input.display()))?;

    info!("Rendering {} functions", repo.len());

    write_stats(&repo, OutputFormat::Text, args.output.as_ref(), config.text.padding)
}
