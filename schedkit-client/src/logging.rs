//! Cloud Logging entry queries

use reqwest::Client;
use schedkit_core::domain::credential::CredentialRecord;
use schedkit_core::domain::log::LogEntry;
use schedkit_core::dto::log::{ListLogEntriesRequest, ListLogEntriesResponse};

use crate::error::{ClientError, Result};
use crate::{Endpoints, handle_response};

const PAGE_SIZE: u32 = 1000;
const ORDER_BY: &str = "timestamp desc";

/// Client for Cloud Logging
///
/// Unlike the other wrappers, construction requires a complete credential
/// record and fails before any network call when a field is missing.
#[derive(Debug)]
pub struct LoggingClient {
    client: Client,
    access_token: String,
    project_id: String,
    base_url: String,
}

impl LoggingClient {
    /// Create a client for a single request
    ///
    /// # Errors
    /// [`ClientError::MissingCredentials`] when the access token, project id
    /// or region id is absent.
    pub fn new(credential: &CredentialRecord, client: Client, endpoints: &Endpoints) -> Result<Self> {
        if !credential.is_complete() {
            tracing::error!("Missing required credentials");
            return Err(ClientError::MissingCredentials(
                "access_token, project_id and region_id are required".to_string(),
            ));
        }

        Ok(Self {
            client,
            access_token: credential.access_token.clone().unwrap_or_default(),
            project_id: credential.project_id.clone().unwrap_or_default(),
            base_url: endpoints.logging.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the most recent log entries, newest first
    ///
    /// Reads a single page of up to 1000 entries matching `filter` and
    /// condenses each into timestamp, severity and summary.
    pub async fn list_log_entries(&self, filter: Option<&str>) -> Result<Vec<LogEntry>> {
        match self.fetch(filter).await {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::error!("Error fetching log entries: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, filter: Option<&str>) -> Result<Vec<LogEntry>> {
        let url = format!("{}/v2/entries:list", self.base_url);
        let body = ListLogEntriesRequest {
            resource_names: vec![format!("projects/{}", self.project_id)],
            filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
            order_by: ORDER_BY.to_string(),
            page_size: PAGE_SIZE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let list: ListLogEntriesResponse = handle_response(response).await?;
        tracing::debug!("Fetched {} log entries", list.entries.len());

        Ok(list.entries.into_iter().map(LogEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(credential: &CredentialRecord) -> Result<LoggingClient> {
        LoggingClient::new(credential, Client::new(), &Endpoints::default())
    }

    #[test]
    fn test_complete_credentials() {
        let credential = CredentialRecord::new("t", "p", "r");
        let client = build(&credential).unwrap();
        assert_eq!(client.project_id, "p");
    }

    #[test]
    fn test_each_missing_field_fails_construction() {
        let full = CredentialRecord::new("t", "p", "r");

        let mut no_token = full.clone();
        no_token.access_token = None;
        let mut no_project = full.clone();
        no_project.project_id = None;
        let mut no_region = full;
        no_region.region_id = None;

        for credential in [no_token, no_project, no_region] {
            assert!(matches!(
                build(&credential),
                Err(ClientError::MissingCredentials(_))
            ));
        }
    }
}
