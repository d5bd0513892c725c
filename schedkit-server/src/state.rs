//! Shared router state
//!
//! Holds only immutable wiring: the credential provider, upstream endpoints
//! and the optional server token. Every service wrapper, and the HTTP
//! session under it, is created per request from here and dropped when the
//! handler returns.

use std::sync::Arc;

use schedkit_client::{ComposerClient, Endpoints, LoggingClient, VertexClient, new_session};
use schedkit_core::domain::credential::CredentialRecord;

use crate::api::error::ProxyError;
use crate::credentials::CredentialProvider;

#[derive(Clone)]
pub struct AppState {
    credentials: Arc<dyn CredentialProvider>,
    endpoints: Arc<Endpoints>,
    auth_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(credentials: Arc<dyn CredentialProvider>, endpoints: Endpoints) -> Self {
        Self {
            credentials,
            endpoints: Arc::new(endpoints),
            auth_token: None,
        }
    }

    /// Requires callers to present `token` on every API route
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.auth_token = Some(Arc::from(token));
        self
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Acquires the credential and opens a fresh session
    async fn open(&self) -> Result<(CredentialRecord, reqwest::Client), ProxyError> {
        let credential = self.credentials.get_cached().await?;
        let session = new_session()?;
        Ok((credential, session))
    }

    pub async fn composer(&self) -> Result<ComposerClient, ProxyError> {
        let (credential, session) = self.open().await?;
        Ok(ComposerClient::new(&credential, session, &self.endpoints))
    }

    pub async fn vertex(&self) -> Result<VertexClient, ProxyError> {
        let (credential, session) = self.open().await?;
        Ok(VertexClient::new(&credential, session, &self.endpoints))
    }

    /// Fails before any network call when the credential is incomplete
    pub async fn logging(&self) -> Result<LoggingClient, ProxyError> {
        let (credential, session) = self.open().await?;
        Ok(LoggingClient::new(&credential, session, &self.endpoints)?)
    }
}
