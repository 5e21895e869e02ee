//! Persisted fixture document.
//!
//! The three top-level keys (`_meta`, `request`, `response`) and their
//! nesting are read by fixture consumers and must stay stable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded exchange, normalized for reuse as canned test data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureDocument {
    /// Audit data about the concrete request.
    #[serde(rename = "_meta")]
    pub meta: FixtureMeta,
    /// How a consumer should match requests against this fixture.
    pub request: FixtureRequest,
    /// The canned response.
    pub response: FixtureResponse,
}

/// Concrete request details captured at recording time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureMeta {
    /// When the exchange was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Request method as sent.
    pub method: String,
    /// Request path without query.
    pub path: String,
    /// Query parameters, one value per key.
    pub query: BTreeMap<String, String>,
}

/// Matching criteria for replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureRequest {
    /// Request method as sent.
    pub method: String,
    /// Anchored regular expression over the request path.
    pub path_pattern: String,
}

/// Recorded response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Parsed JSON body, or the body text when it was not JSON.
    pub body: serde_json::Value,
}
