//! Vertex AI schedules and Cloud Storage buckets

use reqwest::Client;
use schedkit_core::domain::credential::CredentialRecord;
use schedkit_core::domain::schedule::{UiConfig, ui_configs};
use schedkit_core::dto::schedule::{Bucket, CreateBucketRequest, CreateScheduleRequest, RemoteUiConfig};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::{Endpoints, handle_response, required};

/// Only schedules that launch notebook executions are listed.
const NOTEBOOK_SCHEDULE_FILTER: &str = "create_notebook_execution_job_request:*";

/// Client for Vertex AI notebook schedules
///
/// The project comes from the credential record; a missing project or token
/// fails the individual call rather than construction.
#[derive(Debug)]
pub struct VertexClient {
    client: Client,
    access_token: Option<String>,
    project_id: Option<String>,
    region_id: Option<String>,
    endpoints: Endpoints,
}

impl VertexClient {
    /// Create a client for a single request
    ///
    /// # Arguments
    /// * `credential` - Credential record for this request
    /// * `client` - Per-request HTTP session
    /// * `endpoints` - Upstream base URLs
    pub fn new(credential: &CredentialRecord, client: Client, endpoints: &Endpoints) -> Self {
        Self {
            client,
            access_token: credential.access_token.clone(),
            project_id: credential.project_id.clone(),
            region_id: credential.region_id.clone(),
            endpoints: endpoints.clone(),
        }
    }

    fn token(&self) -> Result<&str> {
        required(&self.access_token, "access_token")
    }

    /// `projects/{project}/locations/{region}`
    fn parent(&self, region_id: &str) -> Result<String> {
        let project_id = required(&self.project_id, "project_id")?;
        Ok(format!("projects/{}/locations/{}", project_id, region_id))
    }

    fn schedule_name(&self, region_id: &str, schedule_id: &str) -> Result<String> {
        Ok(format!("{}/schedules/{}", self.parent(region_id)?, schedule_id))
    }

    fn v1_url(&self, region_id: &str, resource: &str) -> String {
        format!("{}/v1/{}", self.endpoints.vertex(region_id), resource)
    }

    // =============================================================================
    // Configuration & Setup
    // =============================================================================

    /// List machine types (and their accelerators) available in a region
    pub async fn list_uiconfig(&self, region_id: &str) -> Result<Vec<UiConfig>> {
        let url = format!(
            "{}/ui/{}/uiConfig",
            self.endpoints.vertex(region_id),
            self.parent(region_id)?
        );
        tracing::debug!("Fetching ui config: {}", url);

        let response = self.client.get(&url).bearer_auth(self.token()?).send().await?;

        let remote: RemoteUiConfig = handle_response(response).await?;
        Ok(ui_configs(remote))
    }

    /// Create a Cloud Storage bucket in the credential's project
    pub async fn create_new_bucket(&self, req: &CreateBucketRequest) -> Result<Value> {
        if req.bucket_name.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "bucket_name cannot be empty".to_string(),
            ));
        }

        let url = format!(
            "{}/storage/v1/b",
            self.endpoints.storage.trim_end_matches('/')
        );
        let project_id = required(&self.project_id, "project_id")?;
        tracing::info!("Creating bucket {} in project {}", req.bucket_name, project_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .query(&[("project", project_id)])
            .json(&Bucket {
                name: req.bucket_name.clone(),
            })
            .send()
            .await?;

        handle_response(response).await
    }

    // =============================================================================
    // Schedule Lifecycle
    // =============================================================================

    /// Create a notebook execution schedule from the UI form
    pub async fn create_job_schedule(&self, req: &CreateScheduleRequest) -> Result<Value> {
        let region_id = match req.region.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => region,
            None => required(&self.region_id, "region_id")?,
        };
        let parent = self.parent(region_id)?;
        let url = self.v1_url(region_id, &format!("{}/schedules", parent));
        tracing::info!("Creating schedule {} under {}", req.display_name, parent);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(&req.to_schedule(&parent))
            .send()
            .await?;

        handle_response(response).await
    }

    /// List one page of schedules
    ///
    /// The upstream body is returned untouched, `nextPageToken` included.
    ///
    /// # Arguments
    /// * `region_id` - Region to list
    /// * `page_size` - Maximum number of schedules in the page
    /// * `page_token` - Continuation token from a previous page, if any
    pub async fn list_schedules(
        &self,
        region_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Value> {
        let url = self.v1_url(region_id, &format!("{}/schedules", self.parent(region_id)?));
        tracing::debug!("Listing schedules: {}", url);

        let mut query = vec![
            ("filter", NOTEBOOK_SCHEDULE_FILTER.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(token) = page_token.filter(|t| !t.is_empty()) {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token()?)
            .query(&query)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Get a schedule
    pub async fn get_schedule(&self, region_id: &str, schedule_id: &str) -> Result<Value> {
        let url = self.v1_url(region_id, &self.schedule_name(region_id, schedule_id)?);
        let response = self.client.get(&url).bearer_auth(self.token()?).send().await?;

        handle_response(response).await
    }

    /// Pause a schedule
    pub async fn pause_schedule(&self, region_id: &str, schedule_id: &str) -> Result<Value> {
        self.schedule_action(region_id, schedule_id, "pause").await
    }

    /// Resume a paused schedule
    pub async fn resume_schedule(&self, region_id: &str, schedule_id: &str) -> Result<Value> {
        self.schedule_action(region_id, schedule_id, "resume").await
    }

    async fn schedule_action(
        &self,
        region_id: &str,
        schedule_id: &str,
        action: &str,
    ) -> Result<Value> {
        let name = self.schedule_name(region_id, schedule_id)?;
        let url = self.v1_url(region_id, &format!("{}:{}", name, action));
        tracing::info!("Schedule {}: {}", action, name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        handle_response(response).await
    }

    /// Run a schedule's notebook once, outside its cadence
    ///
    /// Vertex AI has no trigger verb for schedules, so this reads the
    /// schedule and submits its notebook execution job directly.
    pub async fn trigger_schedule(&self, region_id: &str, schedule_id: &str) -> Result<Value> {
        let schedule = self.get_schedule(region_id, schedule_id).await?;
        let job = schedule
            .pointer("/createNotebookExecutionJobRequest/notebookExecutionJob")
            .cloned()
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!(
                    "Schedule {} has no notebook execution job",
                    schedule_id
                ))
            })?;

        let url = self.v1_url(
            region_id,
            &format!("{}/notebookExecutionJobs", self.parent(region_id)?),
        );
        tracing::info!("Triggering schedule {}", schedule_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(&job)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Patch a schedule with the fields present in `body`
    pub async fn update_schedule(
        &self,
        region_id: &str,
        schedule_id: &str,
        body: &Value,
    ) -> Result<Value> {
        let mask = update_mask(body)?;
        let url = self.v1_url(region_id, &self.schedule_name(region_id, schedule_id)?);
        tracing::info!("Updating schedule {} ({})", schedule_id, mask);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.token()?)
            .query(&[("updateMask", mask)])
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Delete a schedule
    pub async fn delete_schedule(&self, region_id: &str, schedule_id: &str) -> Result<Value> {
        let url = self.v1_url(region_id, &self.schedule_name(region_id, schedule_id)?);
        tracing::info!("Deleting schedule {}", schedule_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.token()?)
            .send()
            .await?;

        handle_response(response).await
    }

    // =============================================================================
    // Executions
    // =============================================================================

    /// List notebook execution jobs launched by a schedule
    ///
    /// # Arguments
    /// * `order_by` - Sort expression forwarded as-is (e.g. `createTime desc`)
    /// * `page_size` - Optional page size
    /// * `start_date` - Optional lower bound on `createTime` (RFC 3339)
    pub async fn list_notebook_execution_jobs(
        &self,
        region_id: &str,
        schedule_id: &str,
        order_by: &str,
        page_size: Option<u32>,
        start_date: Option<&str>,
    ) -> Result<Value> {
        let schedule_name = self.schedule_name(region_id, schedule_id)?;
        let url = self.v1_url(
            region_id,
            &format!("{}/notebookExecutionJobs", self.parent(region_id)?),
        );

        let mut query = vec![
            ("filter", execution_job_filter(&schedule_name, start_date)),
            ("orderBy", order_by.to_string()),
        ];
        if let Some(size) = page_size {
            query.push(("pageSize", size.to_string()));
        }
        tracing::debug!("Listing notebook execution jobs for {}", schedule_name);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token()?)
            .query(&query)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Comma-separated top-level keys of a patch body
pub fn update_mask(body: &Value) -> Result<String> {
    let fields = body.as_object().ok_or_else(|| {
        ClientError::InvalidRequest("update body must be a JSON object".to_string())
    })?;

    if fields.is_empty() {
        return Err(ClientError::InvalidRequest(
            "update body has no fields".to_string(),
        ));
    }

    Ok(fields.keys().map(String::as_str).collect::<Vec<_>>().join(","))
}

fn execution_job_filter(schedule_name: &str, start_date: Option<&str>) -> String {
    let mut filter = format!("schedule=\"{}\"", schedule_name);
    if let Some(start) = start_date.filter(|s| !s.is_empty()) {
        filter.push_str(&format!(" AND createTime>=\"{}\"", start));
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(credential: CredentialRecord) -> VertexClient {
        VertexClient::new(&credential, Client::new(), &Endpoints::default())
    }

    #[test]
    fn test_resource_names() {
        let vertex = client(CredentialRecord::new("t", "my-project", "us-central1"));
        assert_eq!(
            vertex.parent("europe-west4").unwrap(),
            "projects/my-project/locations/europe-west4"
        );
        assert_eq!(
            vertex.schedule_name("us-central1", "123").unwrap(),
            "projects/my-project/locations/us-central1/schedules/123"
        );
        assert_eq!(
            vertex.v1_url("us-central1", "projects/x"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/x"
        );
    }

    #[test]
    fn test_missing_project_fails_per_call() {
        let mut credential = CredentialRecord::new("t", "p", "r");
        credential.project_id = None;
        let vertex = client(credential);
        assert!(matches!(
            vertex.parent("us-central1"),
            Err(ClientError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_update_mask() {
        let body = json!({ "displayName": "renamed", "cron": "0 * * * *" });
        let mask = update_mask(&body).unwrap();
        let mut fields: Vec<&str> = mask.split(',').collect();
        fields.sort();
        assert_eq!(fields, vec!["cron", "displayName"]);
    }

    #[test]
    fn test_update_mask_rejects_non_objects() {
        assert!(update_mask(&json!([1, 2])).is_err());
        assert!(update_mask(&json!({})).is_err());
    }

    #[test]
    fn test_execution_job_filter() {
        let name = "projects/p/locations/r/schedules/42";
        assert_eq!(
            execution_job_filter(name, None),
            r#"schedule="projects/p/locations/r/schedules/42""#
        );
        assert_eq!(
            execution_job_filter(name, Some("2025-01-01T00:00:00Z")),
            r#"schedule="projects/p/locations/r/schedules/42" AND createTime>="2025-01-01T00:00:00Z""#
        );
        assert_eq!(execution_job_filter(name, Some("")), execution_job_filter(name, None));
    }
}
