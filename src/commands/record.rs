//! `fixturecap record` command.

use std::path::Path;

use chrono::Utc;

use crate::config::RecorderConfig;
use crate::context::ServiceContext;
use crate::exchange::Exchange;
use crate::fixture::{FixtureRecorder, RecordOutcome};

/// One exchange described on the command line.
#[derive(Debug)]
pub struct RecordRequest<'a> {
    /// Request method.
    pub method: &'a str,
    /// Request target, optionally with a query string.
    pub target: &'a str,
    /// Response status code.
    pub status: u16,
    /// Request host; `None` means the configured target host.
    pub host: Option<&'a str>,
    /// File holding the raw response body.
    pub body_file: Option<&'a Path>,
}

/// Execute the `record` command.
///
/// # Errors
///
/// Returns an error string if the body file cannot be read or the fixture
/// cannot be written.
pub fn run(
    config: RecorderConfig,
    request: &RecordRequest<'_>,
    dry_run: bool,
) -> Result<(), String> {
    let ctx = if dry_run { ServiceContext::in_memory(Utc::now()) } else { ServiceContext::live() };
    let exchange = build_exchange(&config, request)?;
    let recorder = FixtureRecorder::new(&ctx, config);

    match recorder.record(&exchange).map_err(|e| e.to_string())? {
        RecordOutcome::Saved(path) => {
            if dry_run {
                let document = ctx
                    .fs
                    .read_to_string(&path)
                    .map_err(|e| format!("Failed to read back {}: {e}", path.display()))?;
                println!("Would save: {}", path.display());
                println!("{document}");
            } else {
                println!("Saved: {}", path.display());
            }
        }
        RecordOutcome::Skipped(reason) => println!("Skipped ({reason}): {}", exchange.route()),
        RecordOutcome::Ignored => println!("Ignored: host {} is not recorded", exchange.host),
    }
    Ok(())
}

fn build_exchange(
    config: &RecorderConfig,
    request: &RecordRequest<'_>,
) -> Result<Exchange, String> {
    let body = match request.body_file {
        Some(path) => std::fs::read(path)
            .map_err(|e| format!("Failed to read body file {}: {e}", path.display()))?,
        None => Vec::new(),
    };
    let host = request.host.unwrap_or(&config.target_host);
    Ok(Exchange::from_target(host, request.method, request.target, request.status, body))
}
