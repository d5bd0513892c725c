//! Cloud Logging DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `entries.list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogEntriesRequest {
    pub resource_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub order_by: String,
    pub page_size: u32,
}

/// Response of `entries.list`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogEntriesResponse {
    #[serde(default)]
    pub entries: Vec<RemoteLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A log entry in its API representation
///
/// The payload fields are kept as raw JSON since the summary derivation
/// only needs a single nested message out of each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLogEntry {
    pub timestamp: Option<String>,
    pub severity: Option<String>,
    pub text_payload: Option<String>,
    pub json_payload: Option<Value>,
    pub proto_payload: Option<Value>,
    pub http_request: Option<Value>,
}
