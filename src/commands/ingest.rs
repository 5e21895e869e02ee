//! `fixturecap ingest` command.
//!
//! Reads one JSON exchange per line and records each independently. A bad
//! line or a failed write is logged and counted; the stream keeps going.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::Utc;
use tracing::{error, warn};

use crate::config::RecorderConfig;
use crate::context::ServiceContext;
use crate::exchange::{Exchange, ExchangeRecord};
use crate::fixture::{FixtureRecorder, RecordOutcome};

/// Per-outcome counts for one ingest run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    /// Fixtures written.
    pub saved: usize,
    /// Exchanges for the target host that were not recorded.
    pub skipped: usize,
    /// Exchanges for other hosts.
    pub ignored: usize,
    /// Lines that were not valid exchanges.
    pub malformed: usize,
    /// Exchanges whose fixture could not be written.
    pub failed: usize,
}

impl std::fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "saved {}, skipped {}, ignored {}, malformed {}, failed {}",
            self.saved, self.skipped, self.ignored, self.malformed, self.failed
        )
    }
}

/// Execute the `ingest` command.
///
/// # Errors
///
/// Returns an error string if the input cannot be opened or read.
pub fn run(config: RecorderConfig, input: Option<&Path>, dry_run: bool) -> Result<(), String> {
    let ctx = if dry_run { ServiceContext::in_memory(Utc::now()) } else { ServiceContext::live() };
    let recorder = FixtureRecorder::new(&ctx, config);

    let summary = match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
            ingest_lines(&recorder, BufReader::new(file))
        }
        _ => ingest_lines(&recorder, io::stdin().lock()),
    }
    .map_err(|e| format!("Failed to read exchanges: {e}"))?;

    println!("{summary}");
    Ok(())
}

/// Records every exchange in `reader`, one JSON object per line.
///
/// Lines are parsed as raw bytes, so invalid UTF-8 only costs its own line.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub fn ingest_lines(
    recorder: &FixtureRecorder<'_>,
    mut reader: impl BufRead,
) -> io::Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    let mut line = Vec::new();
    let mut number = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        number += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let exchange = match parse_line(&line) {
            Ok(exchange) => exchange,
            Err(err) => {
                warn!(line = number, %err, "skipping malformed exchange");
                summary.malformed += 1;
                continue;
            }
        };
        match recorder.record(&exchange) {
            Ok(RecordOutcome::Saved(_)) => summary.saved += 1,
            Ok(RecordOutcome::Skipped(_)) => summary.skipped += 1,
            Ok(RecordOutcome::Ignored) => summary.ignored += 1,
            Err(err) => {
                error!(line = number, %err, "failed to record exchange");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

fn parse_line(line: &[u8]) -> Result<Exchange, String> {
    let record: ExchangeRecord = serde_json::from_slice(line).map_err(|e| e.to_string())?;
    Exchange::try_from(record).map_err(|e| format!("invalid body_base64: {e}"))
}
