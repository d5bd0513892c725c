//! Composer environment directory

use reqwest::Client;
use schedkit_core::domain::credential::CredentialRecord;
use schedkit_core::domain::environment::Environment;
use schedkit_core::dto::environment::ListEnvironmentsResponse;
use serde_json::Value;

use crate::error::Result;
use crate::{Endpoints, handle_response, required};

/// Client for the Composer environments API
#[derive(Debug)]
pub struct ComposerClient {
    client: Client,
    access_token: Option<String>,
    base_url: String,
}

impl ComposerClient {
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
            base_url: endpoints.composer.trim_end_matches('/').to_string(),
        }
    }

    /// List environments in a project and region
    ///
    /// Only the first page returned by the API is read.
    pub async fn list_environments(
        &self,
        project_id: &str,
        region_id: &str,
    ) -> Result<Vec<Environment>> {
        let url = format!(
            "{}/v1/projects/{}/locations/{}/environments",
            self.base_url, project_id, region_id
        );
        tracing::debug!("Listing composer environments: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(required(&self.access_token, "access_token")?)
            .send()
            .await?;

        let list: ListEnvironmentsResponse = handle_response(response).await?;
        Ok(list.environments.into_iter().map(Environment::from).collect())
    }

    /// Get one environment by its full resource name
    ///
    /// # Arguments
    /// * `env_name` - `projects/{p}/locations/{r}/environments/{name}`
    pub async fn get_environment(&self, env_name: &str) -> Result<Value> {
        let url = format!("{}/v1/{}", self.base_url, env_name.trim_start_matches('/'));
        tracing::debug!("Getting composer environment: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(required(&self.access_token, "access_token")?)
            .send()
            .await?;

        handle_response(response).await
    }
}
