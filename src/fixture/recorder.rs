//! Turns observed exchanges into fixture files.
//!
//! One call to [`FixtureRecorder::record`] handles exactly one exchange:
//! host filter, classification, danger policy, naming, document assembly,
//! and a collision-free write. Nothing is retried, and a failure only
//! affects the exchange being recorded.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::format::{FixtureDocument, FixtureMeta, FixtureRequest, FixtureResponse};
use super::naming::{candidate_file_name, fixture_name, is_http_method};
use crate::classify::Classifier;
use crate::config::RecorderConfig;
use crate::context::ServiceContext;
use crate::exchange::Exchange;
use crate::pattern::generalize;
use crate::ports::WriteOutcome;

/// Placeholder written in place of redacted query values.
pub const REDACTED: &str = "REDACTED";

/// Why an exchange for the target host was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No catalog rule matched the path.
    Unclassified,
    /// A `danger` endpoint while danger recording is disabled.
    DangerDisabled,
    /// The method is not an HTTP token and cannot name a file.
    InvalidMethod,
}

impl SkipReason {
    /// Short machine-friendly label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unclassified => "unclassified",
            Self::DangerDisabled => "danger-disabled",
            Self::InvalidMethod => "invalid-method",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of recording one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The fixture was written to this path.
    Saved(PathBuf),
    /// The exchange was for the target host but was deliberately not saved.
    Skipped(SkipReason),
    /// The exchange was for another host.
    Ignored,
}

/// Failure to persist a single fixture.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The document could not be rendered as JSON.
    #[error("failed to serialize fixture: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The storage port rejected the write.
    #[error("failed to write fixture {}: {source}", .path.display())]
    Storage {
        /// Candidate path that was being written.
        path: PathBuf,
        /// Error reported by the storage port.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Records exchanges as fixture documents under the configured root.
///
/// All I/O goes through `ctx`, so the recorder works the same against the
/// real disk and the in-memory adapters. The recorder is `Sync`; concurrent
/// callers are serialized around name resolution and the write.
pub struct FixtureRecorder<'a> {
    ctx: &'a ServiceContext,
    config: RecorderConfig,
    classifier: &'a Classifier,
    write_lock: Mutex<()>,
}

impl<'a> FixtureRecorder<'a> {
    /// Creates a recorder using the built-in endpoint catalog.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: RecorderConfig) -> Self {
        Self { ctx, config, classifier: Classifier::catalog(), write_lock: Mutex::new(()) }
    }

    /// Replaces the endpoint catalog.
    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Records one exchange.
    ///
    /// Exchanges for other hosts are [`RecordOutcome::Ignored`]; unknown or
    /// suppressed endpoints and methods that are not HTTP tokens are
    /// [`RecordOutcome::Skipped`]. Neither touches storage.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the document cannot be serialized or
    /// written. The recorder stays usable for subsequent exchanges.
    pub fn record(&self, exchange: &Exchange) -> Result<RecordOutcome, RecordError> {
        if exchange.host != self.config.target_host {
            debug!(host = %exchange.host, "ignoring exchange for other host");
            return Ok(RecordOutcome::Ignored);
        }

        let path = exchange.route();
        let Some(classification) = self.classifier.classify(path) else {
            warn!(path, "unknown endpoint");
            return Ok(RecordOutcome::Skipped(SkipReason::Unclassified));
        };

        if classification.is_danger() && self.config.skip_danger {
            info!(path, operation = %classification.operation, "skipping danger endpoint");
            return Ok(RecordOutcome::Skipped(SkipReason::DangerDisabled));
        }

        if !is_http_method(&exchange.method) {
            warn!(path, method = %exchange.method, "method is not an HTTP token");
            return Ok(RecordOutcome::Skipped(SkipReason::InvalidMethod));
        }

        let name = fixture_name(&exchange.method, &classification.operation, exchange.status_code);
        let document = self.build_document(exchange, path);
        let contents = serde_json::to_string_pretty(&document)?;

        let dir = self.config.output_root.join(&classification.category);
        let saved = self.persist(&dir, &name, &contents)?;
        info!(path = %saved.display(), "saved fixture");
        Ok(RecordOutcome::Saved(saved))
    }

    fn build_document(&self, exchange: &Exchange, path: &str) -> FixtureDocument {
        let query = exchange
            .query
            .iter()
            .map(|(key, value)| {
                let value =
                    if self.config.redact_query.contains(key) { REDACTED } else { value.as_str() };
                (key.clone(), value.to_string())
            })
            .collect();

        FixtureDocument {
            meta: FixtureMeta {
                recorded_at: self.ctx.clock.now(),
                method: exchange.method.clone(),
                path: path.to_string(),
                query,
            },
            request: FixtureRequest {
                method: exchange.method.clone(),
                path_pattern: generalize(path),
            },
            response: FixtureResponse {
                status_code: exchange.status_code,
                body: decode_body(&exchange.body),
            },
        }
    }

    /// Writes `contents` under the first free `name[_N].json` in `dir`.
    fn persist(&self, dir: &Path, name: &str, contents: &str) -> Result<PathBuf, RecordError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut attempt = 0;
        loop {
            let file_name = candidate_file_name(name, attempt);
            let candidate = dir.join(&file_name);
            attempt += 1;

            if self.ctx.fs.exists(&candidate) {
                continue;
            }
            match self.ctx.fs.write_new(dir, &file_name, contents) {
                Ok(WriteOutcome::Written(path)) => return Ok(path),
                // Another process claimed the name after the existence check.
                Ok(WriteOutcome::AlreadyExists) => {}
                Err(source) => return Err(RecordError::Storage { path: candidate, source }),
            }
        }
    }
}

/// Parses a response body as JSON, falling back to lossy UTF-8 text.
#[must_use]
pub fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        debug!(%err, "response body is not JSON, storing as text");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}
