//! Environment domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dto::environment::RemoteEnvironment;

/// Workflow-orchestration environment as listed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Short environment name (last segment of the resource name)
    pub name: String,
    pub label: String,
    pub description: String,
    /// Full resource name, usable with `get_environment`
    pub path: String,
    pub state: Option<String>,
    pub dag_gcs_prefix: Option<String>,
    pub pypi_packages: HashMap<String, String>,
}

impl From<RemoteEnvironment> for Environment {
    fn from(remote: RemoteEnvironment) -> Self {
        let name = remote
            .name
            .rsplit('/')
            .next()
            .unwrap_or(remote.name.as_str())
            .to_string();

        let (dag_gcs_prefix, pypi_packages) = match remote.config {
            Some(config) => (
                config.dag_gcs_prefix,
                config
                    .software_config
                    .map(|software| software.pypi_packages)
                    .unwrap_or_default(),
            ),
            None => (None, HashMap::new()),
        };

        Self {
            label: name.clone(),
            description: format!("Environment: {}", name),
            name,
            path: remote.name,
            state: remote.state,
            dag_gcs_prefix,
            pypi_packages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_remote() {
        let remote: RemoteEnvironment = serde_json::from_value(serde_json::json!({
            "name": "projects/p/locations/us-central1/environments/etl-prod",
            "state": "RUNNING",
            "config": {
                "dagGcsPrefix": "gs://bucket/dags",
                "softwareConfig": { "pypiPackages": { "pandas": ">=2.0" } }
            }
        }))
        .unwrap();

        let env: Environment = remote.into();
        assert_eq!(env.name, "etl-prod");
        assert_eq!(env.label, "etl-prod");
        assert_eq!(env.description, "Environment: etl-prod");
        assert_eq!(
            env.path,
            "projects/p/locations/us-central1/environments/etl-prod"
        );
        assert_eq!(env.state.as_deref(), Some("RUNNING"));
        assert_eq!(env.dag_gcs_prefix.as_deref(), Some("gs://bucket/dags"));
        assert_eq!(env.pypi_packages.get("pandas").map(String::as_str), Some(">=2.0"));
    }

    #[test]
    fn test_environment_without_config() {
        let remote: RemoteEnvironment =
            serde_json::from_value(serde_json::json!({ "name": "bare" })).unwrap();

        let env: Environment = remote.into();
        assert_eq!(env.name, "bare");
        assert_eq!(env.label, "bare");
        assert!(env.state.is_none());
        assert!(env.pypi_packages.is_empty());
    }

    #[test]
    fn test_label_ignores_user_labels() {
        let remote: RemoteEnvironment = serde_json::from_value(serde_json::json!({
            "name": "projects/p/locations/r/environments/nightly",
            "labels": { "team": "data", "label": "Nightly ETL" }
        }))
        .unwrap();

        let env: Environment = remote.into();
        assert_eq!(env.label, "nightly");
    }
}
