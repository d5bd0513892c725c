//! Composer API Handlers
//!
//! Environment directory lookups.

use axum::extract::{Query, State};
use schedkit_core::domain::environment::Environment;
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::{ApiResult, guarded};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnvironmentListQuery {
    pub project_id: String,
    pub region_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EnvironmentQuery {
    pub env_name: String,
}

/// GET /composerList
/// Names and metadata of the environments in a project/region
pub async fn list_environments(
    State(state): State<AppState>,
    Query(params): Query<EnvironmentListQuery>,
) -> ApiResult<Vec<Environment>> {
    tracing::debug!(
        "Listing composer environments in {}/{}",
        params.project_id,
        params.region_id
    );

    guarded("Error fetching composer environments", async move {
        let client = state.composer().await?;
        Ok(client
            .list_environments(&params.project_id, &params.region_id)
            .await?)
    })
    .await
}

/// GET /getComposerEnvironment
/// Details of one environment
pub async fn get_environment(
    State(state): State<AppState>,
    Query(params): Query<EnvironmentQuery>,
) -> ApiResult<Value> {
    tracing::debug!("Getting composer environment: {}", params.env_name);

    guarded("Error fetching composer environment", async move {
        let client = state.composer().await?;
        Ok(client.get_environment(&params.env_name).await?)
    })
    .await
}
