//! Text table renderer for call-site statistics.
//!
//! Frequency maps carry no order, so the table is rebuilt by ranking the
//! names of every position on its own: row `r` shows, per position, the
//! name ranked `r` there. Return positions and argument positions are
//! ranked independently.

use super::table::{display_width, Table};
use crate::callsite::{FuncCallSiteStats, FuncCallSiteStatsRepo, FuncId, NameCount};
use crate::utils::config::{DEFAULT_TABLE_PADDING, IGNORED_MARKER, NO_ASSIGNMENTS_MARKER};
use std::io::{self, Write};

const USAGE: &str = "x<number of function calls>:    <var name>:<count>, <var name>:<count>    = <func name>(<arg name>:<count>, <arg name>:<count>)";

/// Pretty printer aimed for CLI output
pub struct TextRenderer<W: Write> {
    out: W,
    table: Table,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_padding(out, DEFAULT_TABLE_PADDING)
    }

    pub fn with_padding(out: W, padding: usize) -> Self {
        Self {
            out,
            table: Table::new(padding),
        }
    }

    /// One line describing the format
    pub fn usage() -> &'static str {
        USAGE
    }

    /// Add all functions, most called first
    pub fn encode_all(&mut self, repo: &FuncCallSiteStatsRepo) {
        for (id, stats) in repo.ranked() {
            self.encode(id, stats);
        }
    }

    /// Add one function as one or more rows
    pub fn encode(&mut self, id: &FuncId, stats: &FuncCallSiteStats) {
        let returns = RankedPositions::new(&stats.return_name_count);
        let args = RankedPositions::new(&stats.argument_name_count);

        let call_label = format!("= {}", id.function_name);
        let placeholder = " ".repeat(display_width(&call_label));
        let depth = stats.max_distinct_names().max(1);

        for rank in 0..depth {
            let (label, callee) = if rank == 0 {
                (format!("x{}:", stats.call_count), call_label.as_str())
            } else {
                (String::new(), placeholder.as_str())
            };

            // blank targets (`_`, fields) still count as assignments
            let returns_cell = if rank == 0 && stats.return_name_count.is_empty() {
                NO_ASSIGNMENTS_MARKER.to_string()
            } else {
                returns.row(rank)
            };

            self.table.push_row(vec![
                label,
                returns_cell,
                format!("{}({})", callee, args.row(rank)),
            ]);
        }

        if stats.return_ignored_count > 0 {
            self.table.push_row(vec![
                String::new(),
                format!("{}:{}", IGNORED_MARKER, stats.return_ignored_count),
                format!("{}()", placeholder),
            ]);
        }
    }

    /// Write the aligned table and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        self.table.write_to(&mut self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Render a whole repository to a string
pub fn render_to_string(repo: &FuncCallSiteStatsRepo, padding: usize) -> String {
    let mut renderer = TextRenderer::with_padding(Vec::new(), padding);
    renderer.encode_all(repo);
    // writing into a Vec cannot fail
    let bytes = renderer.finish().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Names at one position, most frequent first, ties by name
pub fn rank_names(counts: &NameCount) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = counts
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Ranked cells of every position of one side (returns or arguments)
struct RankedPositions {
    columns: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl RankedPositions {
    fn new(positions: &[NameCount]) -> Self {
        let columns: Vec<Vec<String>> = positions
            .iter()
            .map(|counts| {
                rank_names(counts)
                    .into_iter()
                    .map(|(name, count)| format!("{}:{}", name, count))
                    .collect()
            })
            .collect();
        let widths = columns
            .iter()
            .map(|cells| cells.iter().map(|c| display_width(c)).max().unwrap_or(0))
            .collect();
        Self { columns, widths }
    }

    /// Cells ranked `rank` at each position; a blank keeps its slot.
    ///
    /// Separators are two columns wide on every row; the comma is only
    /// drawn between two named cells.
    fn row(&self, rank: usize) -> String {
        let mut out = String::new();
        let mut previous_blank = true;
        for (position, (cells, width)) in self.columns.iter().zip(&self.widths).enumerate() {
            let cell = cells.get(rank).map(String::as_str).unwrap_or("");
            if position > 0 {
                out.push_str(if previous_blank || cell.is_empty() { "  " } else { ", " });
            }
            out.push_str(cell);
            out.extend(std::iter::repeat(' ').take(width - display_width(cell)));
            previous_blank = cell.is_empty();
        }
        out.trim_end().to_string()
    }
}
