//! Vertex AI schedule DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::lenient;

// =============================================================================
// UI Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUiConfig {
    pub notebook_runtime_config: Option<NotebookRuntimeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookRuntimeConfig {
    #[serde(default)]
    pub machine_configs: Vec<RemoteMachineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMachineConfig {
    pub machine_type: String,
    #[serde(default)]
    pub accelerator_configs: Vec<RemoteAcceleratorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAcceleratorConfig {
    pub accelerator_type: String,
    #[serde(default)]
    pub allowed_counts: Vec<i64>,
}

// =============================================================================
// Schedule Creation
// =============================================================================

/// Schedule form submitted by the notebook UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    /// Region to create the schedule in; the credential's region otherwise
    pub region: Option<String>,
    pub display_name: String,
    /// `gs://` URI of the notebook to execute
    pub input_filename: String,
    /// `gs://` prefix receiving the executed notebook
    pub cloud_storage_bucket: String,
    pub kernel_name: String,
    pub machine_type: String,
    pub accelerator_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub accelerator_count: Option<u32>,
    pub disk_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub disk_size: Option<u32>,
    /// Cron expression; blank means "run once as soon as possible"
    pub schedule_value: Option<String>,
    pub time_zone: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub max_run_count: Option<u32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub service_account: Option<String>,
    pub network: Option<String>,
    pub subnetwork: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

const RUN_ONCE_CRON: &str = "* * * * *";

impl CreateScheduleRequest {
    /// Builds the Vertex AI schedule resource for this form
    ///
    /// # Arguments
    /// * `parent` - `projects/{project}/locations/{region}`
    pub fn to_schedule(&self, parent: &str) -> Schedule {
        let cron_expr = self
            .schedule_value
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let (cron, max_run_count) = match cron_expr {
            Some(expr) => (expr.to_string(), self.max_run_count),
            None => (RUN_ONCE_CRON.to_string(), Some(1)),
        };

        let cron = match non_blank(&self.time_zone) {
            Some(tz) => format!("TZ={} {}", tz, cron),
            None => cron,
        };

        Schedule {
            display_name: self.display_name.clone(),
            cron,
            max_concurrent_run_count: "1".to_string(),
            max_run_count: max_run_count.map(|n| n.to_string()),
            start_time: non_blank(&self.start_time),
            end_time: non_blank(&self.end_time),
            create_notebook_execution_job_request: CreateNotebookExecutionJobRequest {
                parent: parent.to_string(),
                notebook_execution_job: NotebookExecutionJob {
                    display_name: self.display_name.clone(),
                    gcs_notebook_source: GcsNotebookSource {
                        uri: self.input_filename.clone(),
                    },
                    gcs_output_uri: self.cloud_storage_bucket.clone(),
                    kernel_name: self.kernel_name.clone(),
                    service_account: non_blank(&self.service_account),
                    custom_environment_spec: CustomEnvironmentSpec {
                        machine_spec: MachineSpec {
                            machine_type: self.machine_type.clone(),
                            accelerator_type: non_blank(&self.accelerator_type),
                            accelerator_count: self.accelerator_count,
                        },
                        persistent_disk_spec: PersistentDiskSpec {
                            disk_type: non_blank(&self.disk_type),
                            disk_size_gb: self.disk_size.map(|n| n.to_string()),
                        },
                        network_spec: NetworkSpec {
                            network: non_blank(&self.network),
                            subnetwork: non_blank(&self.subnetwork),
                        },
                    },
                    parameters: self.parameters.clone(),
                },
            },
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Vertex AI `Schedule` resource (subset used for notebook executions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub display_name: String,
    pub cron: String,
    pub max_concurrent_run_count: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_run_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub create_notebook_execution_job_request: CreateNotebookExecutionJobRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotebookExecutionJobRequest {
    pub parent: String,
    pub notebook_execution_job: NotebookExecutionJob,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookExecutionJob {
    pub display_name: String,
    pub gcs_notebook_source: GcsNotebookSource,
    pub gcs_output_uri: String,
    pub kernel_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    pub custom_environment_spec: CustomEnvironmentSpec,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcsNotebookSource {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEnvironmentSpec {
    pub machine_spec: MachineSpec,
    pub persistent_disk_spec: PersistentDiskSpec,
    pub network_spec: NetworkSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    pub machine_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentDiskSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<String>,
}

// =============================================================================
// Storage
// =============================================================================

/// Bucket form submitted by the notebook UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBucketRequest {
    pub bucket_name: String,
}

/// Body of the Cloud Storage `buckets.insert` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
}
