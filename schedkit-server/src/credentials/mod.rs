//! Credential providers
//!
//! Handlers never fetch tokens themselves; they ask an injected
//! [`CredentialProvider`] for the current record once per request.

mod gcloud;

pub use gcloud::GcloudCredentialProvider;

use async_trait::async_trait;
use schedkit_core::domain::credential::CredentialRecord;
use thiserror::Error;

/// Errors raised while obtaining a credential
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The credential helper could not be run or exited with an error
    #[error("Failed to run credential helper: {0}")]
    CommandFailed(String),

    /// The credential helper produced output we could not read
    #[error("Failed to parse credential helper output: {0}")]
    ParseError(String),
}

/// Source of the current short-lived credential
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current credential, possibly from a cache
    async fn get_cached(&self) -> Result<CredentialRecord, CredentialError>;
}

/// Provider that always hands out the same record
///
/// Used when the token is supplied through configuration, and in tests.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    record: CredentialRecord,
}

impl StaticCredentialProvider {
    pub fn new(record: CredentialRecord) -> Self {
        Self { record }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn get_cached(&self) -> Result<CredentialRecord, CredentialError> {
        Ok(self.record.clone())
    }
}
