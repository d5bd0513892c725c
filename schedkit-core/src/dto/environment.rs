//! Composer environment DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `environments.list`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvironmentsResponse {
    #[serde(default)]
    pub environments: Vec<RemoteEnvironment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Environment resource as returned by the Composer API
///
/// Only the fields surfaced to the UI are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEnvironment {
    pub name: String,
    pub state: Option<String>,
    pub config: Option<RemoteEnvironmentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEnvironmentConfig {
    pub dag_gcs_prefix: Option<String>,
    pub software_config: Option<SoftwareConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareConfig {
    #[serde(default)]
    pub pypi_packages: HashMap<String, String>,
}
