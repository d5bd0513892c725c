//! Credentials from the local gcloud CLI
//!
//! Runs `gcloud config config-helper --format=json`, which reports the
//! active account's access token with its expiry together with the
//! configured project and compute region.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use schedkit_core::domain::credential::CredentialRecord;
use serde::Deserialize;
use tokio::process::Command;
use tokio::sync::Mutex;

use super::{CredentialError, CredentialProvider};

/// Tokens this close to expiry are refreshed early.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Records without a token expiry are reused for this long.
const UNDATED_TTL_SECS: i64 = 300;

/// Provider backed by the gcloud CLI, caching the record until it expires
///
/// The cache lock is held across a refresh, so concurrent requests share a
/// single gcloud run.
pub struct GcloudCredentialProvider {
    command: String,
    cached: Mutex<Option<CachedRecord>>,
}

struct CachedRecord {
    record: CredentialRecord,
    fetched_at: DateTime<Utc>,
}

impl CachedRecord {
    fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        match self.record.expires_at {
            Some(_) => !self
                .record
                .is_expired_at(now + Duration::seconds(EXPIRY_MARGIN_SECS)),
            None => now < self.fetched_at + Duration::seconds(UNDATED_TTL_SECS),
        }
    }
}

impl GcloudCredentialProvider {
    /// Creates a provider invoking `command` (usually `gcloud`)
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cached: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<CredentialRecord, CredentialError> {
        let output = Command::new(&self.command)
            .args(["config", "config-helper", "--format=json"])
            .output()
            .await
            .map_err(|e| CredentialError::CommandFailed(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CredentialError::CommandFailed(stderr.trim().to_string()));
        }

        parse_config_helper(&output.stdout)
    }
}

#[async_trait]
impl CredentialProvider for GcloudCredentialProvider {
    async fn get_cached(&self) -> Result<CredentialRecord, CredentialError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(entry) = cached.as_ref().filter(|entry| entry.is_fresh_at(now)) {
            return Ok(entry.record.clone());
        }

        tracing::debug!("Refreshing gcloud credentials");
        let record = self.fetch().await?;
        *cached = Some(CachedRecord {
            record: record.clone(),
            fetched_at: now,
        });
        Ok(record)
    }
}

#[derive(Deserialize)]
struct ConfigHelperOutput {
    configuration: Configuration,
    credential: HelperCredential,
}

#[derive(Deserialize)]
struct Configuration {
    #[serde(default)]
    properties: Properties,
}

#[derive(Default, Deserialize)]
struct Properties {
    #[serde(default)]
    core: CoreProperties,
    #[serde(default)]
    compute: ComputeProperties,
}

#[derive(Default, Deserialize)]
struct CoreProperties {
    project: Option<String>,
}

#[derive(Default, Deserialize)]
struct ComputeProperties {
    region: Option<String>,
}

#[derive(Deserialize)]
struct HelperCredential {
    access_token: Option<String>,
    token_expiry: Option<DateTime<Utc>>,
}

fn parse_config_helper(stdout: &[u8]) -> Result<CredentialRecord, CredentialError> {
    let parsed: ConfigHelperOutput =
        serde_json::from_slice(stdout).map_err(|e| CredentialError::ParseError(e.to_string()))?;

    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    Ok(CredentialRecord {
        access_token: non_empty(parsed.credential.access_token),
        project_id: non_empty(parsed.configuration.properties.core.project),
        region_id: non_empty(parsed.configuration.properties.compute.region),
        expires_at: parsed.credential.token_expiry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_helper() {
        let stdout = br#"{
            "configuration": {
                "active_configuration": "default",
                "properties": {
                    "core": { "account": "dev@example.com", "project": "my-project" },
                    "compute": { "region": "us-central1" }
                }
            },
            "credential": {
                "access_token": "ya29.abc",
                "token_expiry": "2025-03-01T12:00:00Z"
            },
            "sentinels": { "config_sentinel": "/tmp/sentinel" }
        }"#;

        let record = parse_config_helper(stdout).unwrap();
        assert_eq!(record.access_token.as_deref(), Some("ya29.abc"));
        assert_eq!(record.project_id.as_deref(), Some("my-project"));
        assert_eq!(record.region_id.as_deref(), Some("us-central1"));
        assert_eq!(
            record.expires_at.unwrap().to_rfc3339(),
            "2025-03-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_parse_without_region() {
        let stdout = br#"{
            "configuration": { "properties": { "core": { "project": "" } } },
            "credential": { "access_token": "ya29.abc" }
        }"#;

        let record = parse_config_helper(stdout).unwrap();
        assert!(record.project_id.is_none());
        assert!(record.region_id.is_none());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_config_helper(b"not json"),
            Err(CredentialError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_is_command_failure() {
        let provider = GcloudCredentialProvider::new("schedkit-no-such-gcloud-binary");
        assert!(matches!(
            provider.get_cached().await,
            Err(CredentialError::CommandFailed(_))
        ));
    }

    #[test]
    fn test_dated_record_refreshes_before_expiry() {
        let now = Utc::now();
        let mut record = CredentialRecord::new("t", "p", "r");
        record.expires_at = Some(now + Duration::seconds(EXPIRY_MARGIN_SECS * 2));
        let entry = CachedRecord {
            record,
            fetched_at: now,
        };

        assert!(entry.is_fresh_at(now));
        assert!(!entry.is_fresh_at(now + Duration::seconds(EXPIRY_MARGIN_SECS + 1)));
    }

    #[test]
    fn test_undated_record_is_cached_for_fixed_time() {
        let now = Utc::now();
        let entry = CachedRecord {
            record: CredentialRecord::new("t", "p", "r"),
            fetched_at: now,
        };

        assert!(entry.is_fresh_at(now + Duration::seconds(UNDATED_TTL_SECS - 1)));
        assert!(!entry.is_fresh_at(now + Duration::seconds(UNDATED_TTL_SECS)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_undated_record_runs_gcloud_once() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("schedkit-gcloud-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("gcloud");
        let calls = dir.join("calls");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho run >> '{}'\necho '{}'\n",
                calls.display(),
                r#"{"configuration":{"properties":{"core":{"project":"p"},"compute":{"region":"r"}}},"credential":{"access_token":"ya29.t"}}"#
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let provider = GcloudCredentialProvider::new(script.display().to_string());
        let first = provider.get_cached().await.unwrap();
        let second = provider.get_cached().await.unwrap();

        assert_eq!(first, second);
        assert!(first.expires_at.is_none());
        let runs = std::fs::read_to_string(&calls).unwrap();
        assert_eq!(runs.lines().count(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
