//! Credential domain types

use serde::{Deserialize, Serialize};

/// Short-lived credential plus the ambient project and region
///
/// Supplied by a credential provider for the lifetime of a single request.
/// Every field is optional because providers may not know all of them; the
/// service wrappers decide whether a missing field is fatal.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub access_token: Option<String>,
    pub project_id: Option<String>,
    pub region_id: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CredentialRecord {
    /// Creates a record with all three identifiers set and no expiry
    pub fn new(
        access_token: impl Into<String>,
        project_id: impl Into<String>,
        region_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            project_id: Some(project_id.into()),
            region_id: Some(region_id.into()),
            expires_at: None,
        }
    }

    /// True when the access token, project id and region id are all present
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.project_id.is_some() && self.region_id.is_some()
    }

    /// True when the token carries an expiry that is at or before `now`
    pub fn is_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

// Keeps tokens out of log lines.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .field("region_id", &self.region_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_complete_record() {
        let record = CredentialRecord::new("token", "my-project", "us-central1");
        assert!(record.is_complete());
    }

    #[test]
    fn test_incomplete_record() {
        let mut record = CredentialRecord::new("token", "my-project", "us-central1");
        record.region_id = None;
        assert!(!record.is_complete());
        assert!(!CredentialRecord::default().is_complete());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let mut record = CredentialRecord::new("token", "p", "r");
        assert!(!record.is_expired_at(now));

        record.expires_at = Some(now - Duration::seconds(1));
        assert!(record.is_expired_at(now));

        record.expires_at = Some(now + Duration::minutes(5));
        assert!(!record.is_expired_at(now));
    }

    #[test]
    fn test_debug_redacts_token() {
        let record = CredentialRecord::new("super-secret", "p", "r");
        let rendered = format!("{:?}", record);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
