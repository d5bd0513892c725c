//! Log domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::log::RemoteLogEntry;

/// Condensed log entry returned to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub severity: Option<String>,
    pub summary: String,
}

impl From<RemoteLogEntry> for LogEntry {
    fn from(remote: RemoteLogEntry) -> Self {
        let summary = summarize(&remote);
        Self {
            timestamp: remote.timestamp,
            severity: remote.severity,
            summary,
        }
    }
}

/// Derives a human-readable summary from whichever payloads are present
///
/// The shapes are applied in a fixed order and later ones overwrite earlier
/// ones, except the JSON payload which is appended to the text payload:
/// text, then JSON `message`, then proto `status.message`, then HTTP
/// `statusMessage`. Empty payloads are ignored, as is a payload whose nested
/// message field is missing.
pub fn summarize(entry: &RemoteLogEntry) -> String {
    let mut summary = String::new();

    if let Some(text) = entry.text_payload.as_deref().filter(|t| !t.is_empty()) {
        summary = text.to_string();
    }

    if let Some(message) = entry
        .json_payload
        .as_ref()
        .filter(|payload| is_truthy(payload))
        .and_then(|payload| payload.get("message"))
    {
        summary = format!("{} {}", summary, render(message));
    }

    if let Some(message) = entry
        .proto_payload
        .as_ref()
        .filter(|payload| is_truthy(payload))
        .and_then(|payload| payload.pointer("/status/message"))
    {
        summary = render(message);
    }

    if let Some(message) = entry
        .http_request
        .as_ref()
        .filter(|payload| is_truthy(payload))
        .and_then(|payload| payload.get("statusMessage"))
    {
        summary = render(message);
    }

    summary
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> RemoteLogEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_payload() {
        let e = entry(json!({ "textPayload": "worker started" }));
        assert_eq!(summarize(&e), "worker started");
    }

    #[test]
    fn test_json_payload_alone_keeps_leading_space() {
        let e = entry(json!({ "jsonPayload": { "message": "task failed" } }));
        assert_eq!(summarize(&e), " task failed");
    }

    #[test]
    fn test_json_payload_appends_to_text() {
        let e = entry(json!({
            "textPayload": "dag run",
            "jsonPayload": { "message": "task failed" }
        }));
        assert_eq!(summarize(&e), "dag run task failed");
    }

    #[test]
    fn test_proto_payload() {
        let e = entry(json!({ "protoPayload": { "status": { "message": "PERMISSION_DENIED" } } }));
        assert_eq!(summarize(&e), "PERMISSION_DENIED");
    }

    #[test]
    fn test_http_request() {
        let e = entry(json!({ "httpRequest": { "status": 502, "statusMessage": "Bad Gateway" } }));
        assert_eq!(summarize(&e), "Bad Gateway");
    }

    #[test]
    fn test_all_shapes_later_overwrites_earlier() {
        let e = entry(json!({
            "textPayload": "text",
            "jsonPayload": { "message": "json" },
            "protoPayload": { "status": { "message": "proto" } },
            "httpRequest": { "statusMessage": "http" }
        }));
        assert_eq!(summarize(&e), "http");

        let e = entry(json!({
            "textPayload": "text",
            "jsonPayload": { "message": "json" },
            "protoPayload": { "status": { "message": "proto" } }
        }));
        assert_eq!(summarize(&e), "proto");
    }

    #[test]
    fn test_empty_payloads_are_ignored() {
        let e = entry(json!({
            "textPayload": "",
            "jsonPayload": {},
            "httpRequest": {}
        }));
        assert_eq!(summarize(&e), "");
    }

    #[test]
    fn test_missing_nested_message_skips_shape() {
        let e = entry(json!({
            "textPayload": "kept",
            "jsonPayload": { "level": "info" },
            "protoPayload": { "methodName": "x" }
        }));
        assert_eq!(summarize(&e), "kept");

        let e = entry(json!({ "textPayload": "t", "httpRequest": { "status": 502 } }));
        assert_eq!(summarize(&e), "t");
    }

    #[test]
    fn test_non_string_json_message_is_rendered() {
        let e = entry(json!({ "jsonPayload": { "message": { "code": 7 } } }));
        assert_eq!(summarize(&e), r#" {"code":7}"#);
    }

    #[test]
    fn test_log_entry_conversion() {
        let e = entry(json!({
            "timestamp": "2025-03-01T10:00:00.123456Z",
            "severity": "ERROR",
            "textPayload": "boom"
        }));
        let log: LogEntry = e.into();
        assert_eq!(log.timestamp.as_deref(), Some("2025-03-01T10:00:00.123456Z"));
        assert_eq!(log.severity.as_deref(), Some("ERROR"));
        assert_eq!(log.summary, "boom");
    }
}
