//! Schedule domain types

use serde::{Deserialize, Serialize};

use crate::dto::schedule::{RemoteMachineConfig, RemoteUiConfig};

/// Machine type offered by the UI, with its accelerator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    pub machine_type: String,
    pub accelerator_configs: Vec<AcceleratorConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorConfig {
    pub accelerator_type: String,
    pub allowed_counts: Vec<i64>,
}

impl From<RemoteMachineConfig> for UiConfig {
    fn from(remote: RemoteMachineConfig) -> Self {
        Self {
            machine_type: remote.machine_type,
            accelerator_configs: remote
                .accelerator_configs
                .into_iter()
                .map(|acc| AcceleratorConfig {
                    accelerator_type: acc.accelerator_type,
                    allowed_counts: acc.allowed_counts,
                })
                .collect(),
        }
    }
}

/// Flattens the UI configuration resource into its machine list
pub fn ui_configs(remote: RemoteUiConfig) -> Vec<UiConfig> {
    remote
        .notebook_runtime_config
        .map(|runtime| runtime.machine_configs)
        .unwrap_or_default()
        .into_iter()
        .map(UiConfig::from)
        .collect()
}
