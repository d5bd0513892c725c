use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schedkit_server::api;
use schedkit_server::config::{Config, CredentialSource};
use schedkit_server::credentials::{
    CredentialProvider, GcloudCredentialProvider, StaticCredentialProvider,
};
use schedkit_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schedkit_server=debug,schedkit_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting schedkit server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let credentials: Arc<dyn CredentialProvider> = match config.credential_source {
        CredentialSource::Gcloud => {
            tracing::info!("Using gcloud credentials ({})", config.gcloud_command);
            Arc::new(GcloudCredentialProvider::new(config.gcloud_command.clone()))
        }
        CredentialSource::Env => {
            tracing::info!("Using credentials from the environment");
            Arc::new(StaticCredentialProvider::new(config.static_credential.clone()))
        }
    };

    let mut state = AppState::new(credentials, config.endpoints.clone());
    if let Some(token) = &config.auth_token {
        state = state.with_auth_token(token.clone());
    } else {
        tracing::warn!("SCHEDKIT_AUTH_TOKEN not set; API routes are unauthenticated");
    }

    // Build router with all API endpoints
    let app = api::create_router(state, &config.base_path);

    tracing::info!("Listening on {}{}", config.bind_addr, config.base_path);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
