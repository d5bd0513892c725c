//! Server configuration
//!
//! Bind address, route prefix, server token, credential source and the
//! upstream API endpoints.

use schedkit_client::Endpoints;
use schedkit_core::domain::credential::CredentialRecord;

/// Where per-request credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `gcloud config config-helper`, cached until token expiry
    Gcloud,
    /// Fixed token, project and region from the environment
    Env,
}

impl std::str::FromStr for CredentialSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcloud" => Ok(Self::Gcloud),
            "env" => Ok(Self::Env),
            other => anyhow::bail!("unknown credential source '{}' (expected gcloud or env)", other),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on (e.g., "127.0.0.1:8888")
    pub bind_addr: String,

    /// Prefix for the API routes
    pub base_path: String,

    /// Token callers must present; `None` disables the check
    pub auth_token: Option<String>,

    pub credential_source: CredentialSource,

    /// gcloud executable used by the gcloud credential source
    pub gcloud_command: String,

    /// Record served by the env credential source
    pub static_credential: CredentialRecord,

    pub endpoints: Endpoints,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - SCHEDKIT_BIND_ADDR (default: 127.0.0.1:8888)
    /// - SCHEDKIT_BASE_PATH (default: /scheduler-plugin)
    /// - SCHEDKIT_AUTH_TOKEN
    /// - SCHEDKIT_CREDENTIALS (gcloud or env, default: gcloud)
    /// - SCHEDKIT_GCLOUD (default: gcloud)
    /// - SCHEDKIT_ACCESS_TOKEN, SCHEDKIT_PROJECT_ID, SCHEDKIT_REGION_ID
    /// - SCHEDKIT_COMPOSER_URL, SCHEDKIT_VERTEX_URL, SCHEDKIT_STORAGE_URL,
    ///   SCHEDKIT_LOGGING_URL
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = env_var("SCHEDKIT_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(path) = env_var("SCHEDKIT_BASE_PATH") {
            config.base_path = path;
        }
        config.auth_token = env_var("SCHEDKIT_AUTH_TOKEN");

        if let Some(source) = env_var("SCHEDKIT_CREDENTIALS") {
            config.credential_source = source.parse()?;
        }
        if let Some(command) = env_var("SCHEDKIT_GCLOUD") {
            config.gcloud_command = command;
        }

        config.static_credential = CredentialRecord {
            access_token: env_var("SCHEDKIT_ACCESS_TOKEN"),
            project_id: env_var("SCHEDKIT_PROJECT_ID"),
            region_id: env_var("SCHEDKIT_REGION_ID"),
            expires_at: None,
        };

        if let Some(url) = env_var("SCHEDKIT_COMPOSER_URL") {
            config.endpoints.composer = url;
        }
        config.endpoints.vertex = env_var("SCHEDKIT_VERTEX_URL");
        if let Some(url) = env_var("SCHEDKIT_STORAGE_URL") {
            config.endpoints.storage = url;
        }
        if let Some(url) = env_var("SCHEDKIT_LOGGING_URL") {
            config.endpoints.logging = url;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            anyhow::bail!("base_path must start with /");
        }

        if self.auth_token.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("auth_token cannot be empty when set");
        }

        if self.credential_source == CredentialSource::Env
            && self.static_credential.access_token.is_none()
        {
            anyhow::bail!("SCHEDKIT_ACCESS_TOKEN is required with the env credential source");
        }

        let urls = [
            Some(&self.endpoints.composer),
            self.endpoints.vertex.as_ref(),
            Some(&self.endpoints.storage),
            Some(&self.endpoints.logging),
        ];
        for url in urls.into_iter().flatten() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("endpoint '{}' must start with http:// or https://", url);
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8888".to_string(),
            base_path: "/scheduler-plugin".to_string(),
            auth_token: None,
            credential_source: CredentialSource::Gcloud,
            gcloud_command: "gcloud".to_string(),
            static_credential: CredentialRecord::default(),
            endpoints: Endpoints::default(),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
