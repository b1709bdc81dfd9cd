//! Backend failure classification and user-facing wording.
//!
//! # Responsibility
//! - Carry the cause of a failed request for diagnostics.
//! - Derive one human-readable message for the notification layer.
//!
//! # Invariants
//! - A server-provided message wins over any generic wording.
//! - Transport and decode causes are never shown verbatim to the user.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one backend request.
#[derive(Debug)]
pub enum FetchError {
    /// Server answered with a non-success status.
    Status { status: u16, body: String },
    /// No response was obtained (connection refused, aborted, timed out).
    Transport(String),
    /// A success response could not be decoded.
    Decode(serde_json::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, body } => {
                write!(f, "request failed with status {status} ({} byte body)", body.len())
            }
            Self::Transport(message) => write!(f, "request transport failed: {message}"),
            Self::Decode(err) => write!(f, "response decode failed: {err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Status { .. } | Self::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl FetchError {
    /// Message suitable for an error notification.
    ///
    /// `fallback` names the failed operation in user terms.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { status, body } => describe_failure(*status, body, fallback),
            Self::Transport(_) | Self::Decode(_) => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Picks the best user message for a failed response.
///
/// Order: JSON `message`, `error`, `details`, a bare JSON string, then
/// `fallback` for other JSON bodies. Non-JSON bodies fall back to wording
/// keyed by status.
///
/// A field counts when it is a non-empty string or a non-zero number.
/// Booleans, objects and arrays are skipped since they carry no readable text.
pub fn describe_failure(status: u16, body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => ["message", "error", "details"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(readable_field))
            .unwrap_or_else(|| fallback.to_string()),
        Ok(Value::String(text)) if !text.is_empty() => text,
        Ok(_) => fallback.to_string(),
        Err(_) => status_message(status, fallback),
    }
}

fn readable_field(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        _ => None,
    }
}

fn status_message(status: u16, fallback: &str) -> String {
    match status {
        400 => "Invalid data. Check the fields you entered.".to_string(),
        409 => "This record already exists.".to_string(),
        422 => "Invalid data. Check all required fields.".to_string(),
        500 => "Internal server error. Try again later.".to_string(),
        other => format!("{fallback} (code: {other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::{describe_failure, FetchError};

    #[test]
    fn message_field_wins() {
        let body = r#"{"message": "Tax code already registered.", "error": "conflict"}"#;
        assert_eq!(
            describe_failure(409, body, "Could not save client"),
            "Tax code already registered."
        );
    }

    #[test]
    fn falls_through_error_then_details() {
        assert_eq!(
            describe_failure(400, r#"{"error": "bad payload"}"#, "x"),
            "bad payload"
        );
        assert_eq!(
            describe_failure(400, r#"{"message": "", "details": "nome missing"}"#, "x"),
            "nome missing"
        );
        assert_eq!(describe_failure(400, r#""plain text""#, "x"), "plain text");
    }

    #[test]
    fn any_non_empty_string_or_number_counts() {
        assert_eq!(describe_failure(400, r#"{"message": "  "}"#, "x"), "  ");
        assert_eq!(describe_failure(500, r#"{"error": 42}"#, "x"), "42");
        assert_eq!(
            describe_failure(500, r#"{"message": 0, "error": false, "details": "disk full"}"#, "x"),
            "disk full"
        );
        assert_eq!(
            describe_failure(500, r#"{"error": {"code": 7}}"#, "Could not save"),
            "Could not save"
        );
    }

    #[test]
    fn json_without_known_fields_uses_fallback() {
        assert_eq!(
            describe_failure(500, r#"{"code": 17}"#, "Could not delete cost"),
            "Could not delete cost"
        );
    }

    #[test]
    fn non_json_uses_status_wording() {
        assert_eq!(
            describe_failure(409, "<html>", "x"),
            "This record already exists."
        );
        assert_eq!(
            describe_failure(500, "", "x"),
            "Internal server error. Try again later."
        );
        assert_eq!(
            describe_failure(503, "Service Unavailable", "Could not load stats"),
            "Could not load stats (code: 503)"
        );
    }

    #[test]
    fn transport_errors_hide_cause() {
        let err = FetchError::Transport("connection refused 10.0.0.3:8000".to_string());
        assert_eq!(err.user_message("Could not load stats"), "Could not load stats");
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.status(), None);
    }
}
