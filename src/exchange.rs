//! Observed request/response pairs handed to the recorder.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One observed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Request host, compared against the configured target host.
    pub host: String,
    /// Request method as sent (`GET`, `POST`, ...).
    pub method: String,
    /// Request path; may still carry a `?query` component.
    pub path: String,
    /// Query parameters, one value per key.
    pub query: BTreeMap<String, String>,
    /// Response status code.
    pub status_code: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Exchange {
    /// Builds an exchange from a raw request target such as
    /// `/api/v1/users/me.json?auth_token=x`.
    ///
    /// Query parameters are decoded from the target. When a key repeats, the
    /// first value is kept.
    #[must_use]
    pub fn from_target(
        host: impl Into<String>,
        method: impl Into<String>,
        target: &str,
        status_code: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            host: host.into(),
            method: method.into(),
            path: target.to_string(),
            query: parse_query(target),
            status_code,
            body: body.into(),
        }
    }

    /// The path with any query component removed.
    #[must_use]
    pub fn route(&self) -> &str {
        strip_query(&self.path)
    }
}

/// Returns `target` up to (not including) the first `?`.
#[must_use]
pub fn strip_query(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

fn parse_query(target: &str) -> BTreeMap<String, String> {
    let mut query = BTreeMap::new();
    if let Some((_, raw)) = target.split_once('?') {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
    }
    query
}

/// Line-oriented wire form of an exchange, as read by `fixturecap ingest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeRecord {
    /// Request host.
    pub host: String,
    /// Request method.
    pub method: String,
    /// Request target, optionally with a query string.
    pub path: String,
    /// Extra query parameters; merged over those parsed from `path`.
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    /// Response status code.
    pub status: u16,
    /// Response body text.
    #[serde(default)]
    pub body: String,
    /// Response body as standard base64, for bodies that are not UTF-8.
    /// Takes precedence over `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_base64: Option<String>,
}

impl TryFrom<ExchangeRecord> for Exchange {
    type Error = base64::DecodeError;

    fn try_from(record: ExchangeRecord) -> Result<Self, Self::Error> {
        let body = match record.body_base64 {
            Some(encoded) => STANDARD.decode(encoded)?,
            None => record.body.into_bytes(),
        };
        let mut exchange =
            Self::from_target(record.host, record.method, &record.path, record.status, body);
        exchange.query.extend(record.query);
        Ok(exchange)
    }
}
