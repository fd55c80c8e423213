//! Line-delimited JSON record stream.
//!
//! One record per function, most called first. Empty argument and return
//! sequences are omitted on write and read back as empty.

use crate::callsite::{FuncCallSiteStats, FuncCallSiteStatsRepo, FuncId};
use crate::utils::error::OutputError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One line of the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncStatRecord {
    pub function_name: String,

    #[serde(flatten)]
    pub stats: FuncCallSiteStats,
}

/// Outcome of writing a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub written: usize,
    pub failed: usize,
}

/// Write every record of `repo`, one JSON object per line
///
/// A record that fails to serialize or write is logged and skipped;
/// the remaining records are still written.
pub fn write_jsonl<W: Write>(repo: &FuncCallSiteStatsRepo, out: &mut W) -> EncodeSummary {
    let mut summary = EncodeSummary::default();

    for (id, stats) in repo.ranked() {
        match write_record(out, id, stats) {
            Ok(()) => summary.written += 1,
            Err(e) => {
                warn!("Failed to write record for {}: {}", id, e);
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = out.flush() {
        warn!("Failed to flush record stream: {}", e);
    }

    debug!(
        "Wrote {} records ({} failed)",
        summary.written, summary.failed
    );
    summary
}

fn write_record<W: Write>(
    out: &mut W,
    id: &FuncId,
    stats: &FuncCallSiteStats,
) -> Result<(), OutputError> {
    let record = FuncStatRecord {
        function_name: id.function_name.clone(),
        stats: stats.clone(),
    };
    let line = serde_json::to_string(&record)?;
    writeln!(out, "{}", line)?;
    Ok(())
}

/// Rebuild a repository from a record stream
///
/// Blank lines are skipped; records repeating a function are merged.
///
/// # Errors
/// * `OutputError::ReadFailed` - Input cannot be read
/// * `OutputError::MalformedRecord` - A line is not a valid record
pub fn read_jsonl<R: BufRead>(input: R) -> Result<FuncCallSiteStatsRepo, OutputError> {
    let mut repo = FuncCallSiteStatsRepo::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(OutputError::ReadFailed)?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FuncStatRecord =
            serde_json::from_str(&line).map_err(|source| OutputError::MalformedRecord {
                line: index + 1,
                source,
            })?;
        repo.add(FuncId::new(record.function_name), &record.stats);
    }

    Ok(repo)
}

/// Write the record stream to a file
///
/// **Public** - main entry point for file output
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is invalid or parent cannot be created
/// * `OutputError::WriteFailed` - File cannot be created
pub fn write_jsonl_file(
    repo: &FuncCallSiteStatsRepo,
    output_path: impl AsRef<Path>,
) -> Result<EncodeSummary, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing records to: {}", output_path.display());

    let file = super::create_output_file(output_path)?;
    let mut writer = BufWriter::new(file);
    let summary = write_jsonl(repo, &mut writer);

    info!("Records written ({} functions)", summary.written);

    Ok(summary)
}

/// Read a record stream from a file
pub fn read_jsonl_file(input_path: impl AsRef<Path>) -> Result<FuncCallSiteStatsRepo, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading records from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let repo = read_jsonl(BufReader::new(file))?;

    debug!("Loaded {} functions", repo.len());

    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite::stats::single;
    use pretty_assertions::assert_eq;
    use std::io::{self, Cursor};

    fn sample_repo() -> FuncCallSiteStatsRepo {
        let mut repo = FuncCallSiteStatsRepo::new();
        repo.add(
            FuncId::new("foo"),
            &FuncCallSiteStats {
                call_count: 2,
                argument_name_count: vec![single("a"), single("b")],
                return_name_count: vec![single("x")],
                multiple_assignment_count: 1,
                ..Default::default()
            },
        );
        repo.add(
            FuncId::new("bar"),
            &FuncCallSiteStats {
                call_count: 1,
                return_ignored_count: 1,
                ..Default::default()
            },
        );
        repo
    }

    #[test]
    fn test_empty_sequences_omitted() {
        let mut out = Vec::new();
        write_jsonl(&sample_repo(), &mut out);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"function_name\":\"foo\""));
        assert!(lines[0].contains("\"argument_name_count\":[{\"a\":1},{\"b\":1}]"));
        assert!(lines[1].contains("\"function_name\":\"bar\""));
        assert!(!lines[1].contains("argument_name_count"));
        assert!(!lines[1].contains("return_name_count"));
    }

    #[test]
    fn test_read_back_in_memory() {
        let repo = sample_repo();
        let mut out = Vec::new();
        write_jsonl(&repo, &mut out);

        let decoded = read_jsonl(Cursor::new(out)).unwrap();
        assert_eq!(decoded, repo);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{\"function_name\":\"foo\",\"call_count\":1,\"return_ignored_count\":0,\"multiple_assignment_count\":0,\"multiple_assignment_with_other_count\":0}\n\nnot json\n";
        let result = read_jsonl(Cursor::new(input));
        assert!(matches!(result, Err(OutputError::MalformedRecord { line: 3, .. })));
    }

    /// Accepts one write, then fails every subsequent write
    struct FailAfterFirst {
        inner: Vec<u8>,
        writes: usize,
    }

    impl Write for FailAfterFirst {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.inner.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_abort_stream() {
        let mut out = FailAfterFirst {
            inner: Vec::new(),
            writes: 0,
        };
        let summary = write_jsonl(&sample_repo(), &mut out);

        assert_eq!(summary.written + summary.failed, 2);
        assert!(summary.failed >= 1);
    }
}
