//! Column-aligned text table.
//!
//! Rows are buffered; widths are computed over every row when the table
//! is written. The last cell of a row is never padded.

use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct Table {
    padding: usize,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(padding: usize) -> Self {
        Self {
            padding,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();
        for row in &self.rows {
            // last cell does not take part in alignment
            let aligned = row.len().saturating_sub(1);
            if widths.len() < aligned {
                widths.resize(aligned, 0);
            }
            for (width, cell) in widths.iter_mut().zip(&row[..aligned]) {
                *width = (*width).max(display_width(cell));
            }
        }
        widths
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        for row in &self.rows {
            let mut line = String::new();
            for (index, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if index + 1 < row.len() {
                    let fill = widths[index] - display_width(cell) + self.padding;
                    line.extend(std::iter::repeat(' ').take(fill));
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

pub fn display_width(s: &str) -> usize {
    s.chars().count()
}
