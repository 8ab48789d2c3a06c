//! Classification of what the market-data provider sent back.
//!
//! The fetch collaborator hands over the HTTP status and raw body (or the reason it has
//! neither); [`UpstreamOutcome::classify`] decides which of the four cases applies before
//! any ticker field is looked at. Error payloads are never mined for prices.

use serde_json::Value;

use crate::snapshot::RawTickerSnapshot;

/// Generic text when the provider could not be reached or understood.
pub const UNAVAILABLE_TEXT: &str = "Upstream unavailable";
/// Text when the provider answered successfully with no tickers.
pub const NO_DATA_TEXT: &str = "No data available";

/// What a single provider round trip amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// A usable, non-empty snapshot.
    Snapshot(RawTickerSnapshot),
    /// Success, but zero ticker entries.
    NoData,
    /// The provider answered with a structured error or a non-success status.
    ReportedError {
        /// The provider's `error` or `message`, if it sent one.
        message: Option<String>,
        /// HTTP status of the reply.
        status: u16,
    },
    /// The provider could not be reached, or its reply could not be parsed.
    Unavailable {
        /// Optional human-readable reason.
        message: Option<String>,
    },
}

impl UpstreamOutcome {
    /// Classify an HTTP reply.
    pub fn classify(status: u16, body: &[u8]) -> Self {
        let success = (200..300).contains(&status);
        let document: Value = match serde_json::from_slice(body) {
            Ok(document) => document,
            Err(_) if !success => {
                return UpstreamOutcome::ReportedError { message: None, status };
            }
            Err(e) => {
                return UpstreamOutcome::Unavailable {
                    message: Some(format!("Bad upstream JSON: {}", e)),
                };
            }
        };
        Self::classify_document(status, &document)
    }

    /// Classify an already-parsed reply body.
    pub fn classify_document(status: u16, document: &Value) -> Self {
        let success = (200..300).contains(&status);
        let reported_error = document.get("status").and_then(Value::as_str) == Some("ERROR");
        if !success || reported_error {
            return UpstreamOutcome::ReportedError {
                message: error_message(document),
                status,
            };
        }
        let snapshot = RawTickerSnapshot::from_polygon(document);
        if snapshot.is_empty() {
            UpstreamOutcome::NoData
        } else {
            UpstreamOutcome::Snapshot(snapshot)
        }
    }

    /// The fetch itself failed.
    pub fn unavailable(message: impl Into<String>) -> Self {
        UpstreamOutcome::Unavailable {
            message: Some(message.into()),
        }
    }

    /// Text of the single frame shown instead of tickers; `None` for a usable snapshot.
    pub fn message_text(&self) -> Option<String> {
        match self {
            UpstreamOutcome::Snapshot(_) => None,
            UpstreamOutcome::NoData => Some(NO_DATA_TEXT.to_string()),
            UpstreamOutcome::ReportedError { message, status } => Some(
                message
                    .clone()
                    .unwrap_or_else(|| format!("Polygon error ({})", status)),
            ),
            UpstreamOutcome::Unavailable { message } => Some(
                message
                    .clone()
                    .unwrap_or_else(|| UNAVAILABLE_TEXT.to_string()),
            ),
        }
    }
}

fn error_message(document: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| document.get(*key))
        .find_map(|value| match value {
            Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        })
}
