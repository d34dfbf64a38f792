// Tool outcomes: a reshaped record on success, an error envelope otherwise.
// Either way the caller receives indented JSON text.

use crate::credentials::MissingCredential;
use crate::error::McpResult;
use crate::protocol::CallToolResult;
use chrono::{DateTime, SecondsFormat, Utc};
use finnhub_mcp_client::FinnhubError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything that can go wrong after a tool's arguments were accepted.
#[derive(Debug, thiserror::Error)]
pub enum ToolFailure {
    #[error(transparent)]
    MissingCredential(#[from] MissingCredential),

    #[error(transparent)]
    Upstream(#[from] FinnhubError),

    #[error("timestamp {0} is out of range")]
    Timestamp(i64),
}

/// Failure payload returned in place of a record.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    /// Caller input echoed back, e.g. `symbol` or `category`.
    #[serde(flatten)]
    pub input: BTreeMap<String, String>,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            input: BTreeMap::new(),
            timestamp: now_iso(),
        }
    }

    pub fn echo(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }
}

/// Exactly one of these is produced per tool call.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome<R> {
    Record(R),
    Error(ErrorEnvelope),
}

impl<R: Serialize> ToolOutcome<R> {
    /// Turn a fetch result into an outcome, building the envelope on failure.
    pub fn capture(
        result: Result<R, ToolFailure>,
        on_error: impl FnOnce(ToolFailure) -> ErrorEnvelope,
    ) -> Self {
        match result {
            Ok(record) => Self::Record(record),
            Err(failure) => Self::Error(on_error(failure)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Two-space indented JSON.
    pub fn to_text(&self) -> McpResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_call_result(self) -> McpResult<CallToolResult> {
        Ok(CallToolResult::text(self.to_text()?))
    }
}

/// Current UTC time, e.g. `2024-05-01T12:30:00.123456+00:00`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Unix seconds as a UTC ISO-8601 timestamp without offset, e.g.
/// `2022-01-01T00:00:00`.
pub fn epoch_to_iso(secs: i64) -> Result<String, ToolFailure> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .ok_or(ToolFailure::Timestamp(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_epoch_to_iso() {
        assert_eq!(epoch_to_iso(1640995200).unwrap(), "2022-01-01T00:00:00");
        assert_eq!(epoch_to_iso(0).unwrap(), "1970-01-01T00:00:00");
    }

    #[test]
    fn test_epoch_out_of_range() {
        assert!(matches!(
            epoch_to_iso(i64::MAX),
            Err(ToolFailure::Timestamp(_))
        ));
    }

    #[test]
    fn test_now_iso_is_parseable_utc() {
        let parsed = DateTime::parse_from_rfc3339(&now_iso()).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_envelope_shape() {
        let outcome: ToolOutcome<Sample> =
            ToolOutcome::Error(ErrorEnvelope::new("boom").echo("symbol", "AAPL"));
        let value: serde_json::Value = serde_json::from_str(&outcome.to_text().unwrap()).unwrap();

        assert_eq!(value["error"], "boom");
        assert_eq!(value["symbol"], "AAPL");
        assert!(value["timestamp"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_record_is_indented_without_error_key() {
        let outcome = ToolOutcome::Record(Sample { value: 7 });
        let text = outcome.to_text().unwrap();

        assert_eq!(text, "{\n  \"value\": 7\n}");
        assert!(!outcome.is_error());
    }

    #[test]
    fn test_capture_builds_envelope_from_failure() {
        let result: Result<Sample, ToolFailure> = Err(ToolFailure::Timestamp(-1));
        let outcome = ToolOutcome::capture(result, |e| ErrorEnvelope::new(format!("failed: {}", e)));

        match outcome {
            ToolOutcome::Error(envelope) => {
                assert_eq!(envelope.error, "failed: timestamp -1 is out of range")
            }
            ToolOutcome::Record(_) => panic!("expected an envelope"),
        }
    }
}
