//! Schedkit Service Clients
//!
//! Thin, typed wrappers over the Google Cloud REST APIs the notebook
//! scheduler talks to:
//! - [`ComposerClient`]: Composer environment directory
//! - [`VertexClient`]: Vertex AI notebook schedules and Cloud Storage buckets
//! - [`LoggingClient`]: Cloud Logging entry queries
//!
//! Each wrapper is built per request from a credential record and an HTTP
//! session, performs the remote call and maps the response. Nothing is
//! retained between requests.
//!
//! # Example
//!
//! ```no_run
//! use schedkit_client::{ComposerClient, Endpoints};
//! use schedkit_core::domain::credential::CredentialRecord;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credential = CredentialRecord::new("ya29.token", "my-project", "us-central1");
//!     let session = schedkit_client::new_session()?;
//!     let client = ComposerClient::new(&credential, session, &Endpoints::default());
//!
//!     for env in client.list_environments("my-project", "us-central1").await? {
//!         println!("{}", env.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod composer;
mod logging;
mod vertex;

// Re-export commonly used types
pub use composer::ComposerClient;
pub use error::{ClientError, Result};
pub use logging::LoggingClient;
pub use vertex::{VertexClient, update_mask};

use reqwest::Client;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("schedkit/", env!("CARGO_PKG_VERSION"));

/// Base URLs of the upstream APIs
///
/// Defaults point at the public Google endpoints; overrides exist for
/// private endpoints and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub composer: String,
    /// Fixed Vertex AI base URL; when unset the regional endpoint is used
    pub vertex: Option<String>,
    pub storage: String,
    pub logging: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            composer: "https://composer.googleapis.com".to_string(),
            vertex: None,
            storage: "https://storage.googleapis.com".to_string(),
            logging: "https://logging.googleapis.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every API at the same base URL
    pub fn uniform(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            composer: base_url.clone(),
            vertex: Some(base_url.clone()),
            storage: base_url.clone(),
            logging: base_url,
        }
    }

    /// Vertex AI base URL for a region
    pub fn vertex(&self, region_id: &str) -> String {
        match &self.vertex {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", region_id),
        }
    }
}

/// Opens a fresh HTTP session for a single request
///
/// The session is dropped with the wrapper that owns it, closing its
/// connections whether the call succeeded or not.
pub fn new_session() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Error statuses become [`ClientError::ApiError`]. An empty success body
/// (as returned by pause/resume) is read as `{}`.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::from_body(status.as_u16(), &error_text));
    }

    let text = response.text().await?;
    let body = if text.trim().is_empty() { "{}" } else { text.as_str() };

    serde_json::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ClientError::MissingCredentials(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.composer, "https://composer.googleapis.com");
        assert_eq!(
            endpoints.vertex("europe-west1"),
            "https://europe-west1-aiplatform.googleapis.com"
        );
    }

    #[test]
    fn test_uniform_endpoints_trim_trailing_slash() {
        let endpoints = Endpoints::uniform("http://127.0.0.1:9000/");
        assert_eq!(endpoints.composer, "http://127.0.0.1:9000");
        assert_eq!(endpoints.vertex("us-central1"), "http://127.0.0.1:9000");
        assert_eq!(endpoints.logging, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_required_field() {
        assert_eq!(required(&Some("p".to_string()), "project_id").unwrap(), "p");
        let err = required(&None, "project_id").unwrap_err();
        assert!(matches!(err, ClientError::MissingCredentials(f) if f == "project_id"));
    }

    #[test]
    fn test_session_creation() {
        assert!(new_session().is_ok());
    }
}
