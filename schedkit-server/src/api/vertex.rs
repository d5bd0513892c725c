//! Vertex API Handlers
//!
//! Notebook schedule lifecycle, UI configuration and bucket creation.

use axum::{
    Json,
    extract::{Query, State},
};
use schedkit_core::domain::schedule::UiConfig;
use schedkit_core::dto::schedule::{CreateBucketRequest, CreateScheduleRequest};
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::{ApiResult, guarded};
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    pub region_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleListQuery {
    pub region_id: String,
    pub page_size: u32,
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub region_id: String,
    pub schedule_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ExecutionJobsQuery {
    pub region_id: String,
    pub schedule_id: String,
    pub order_by: String,
    pub page_size: Option<u32>,
    pub start_date: Option<String>,
}

// =============================================================================
// Configuration & Setup
// =============================================================================

/// GET /api/vertex/uiConfig
/// Machine types available to scheduled notebooks in a region
pub async fn list_uiconfig(
    State(state): State<AppState>,
    Query(params): Query<RegionQuery>,
) -> ApiResult<Vec<UiConfig>> {
    tracing::debug!("Fetching ui config for {}", params.region_id);

    guarded("Error fetching ui config", async move {
        let client = state.vertex().await?;
        Ok(client.list_uiconfig(&params.region_id).await?)
    })
    .await
}

/// POST /api/storage/createNewBucket
pub async fn create_bucket(
    State(state): State<AppState>,
    Json(req): Json<CreateBucketRequest>,
) -> ApiResult<Value> {
    guarded("Error creating a new bucket", async move {
        let client = state.vertex().await?;
        Ok(client.create_new_bucket(&req).await?)
    })
    .await
}

// =============================================================================
// Schedule Lifecycle
// =============================================================================

/// POST /api/vertex/createJobScheduler
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(req): Json<CreateScheduleRequest>,
) -> ApiResult<Value> {
    tracing::info!("Creating job schedule: {}", req.display_name);

    guarded("Error creating job schedule", async move {
        let client = state.vertex().await?;
        Ok(client.create_job_schedule(&req).await?)
    })
    .await
}

/// GET /api/vertex/listSchedules
/// One page of schedules, passed through as Vertex returns it
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleListQuery>,
) -> ApiResult<Value> {
    tracing::debug!(
        "Listing schedules in {} (page_size={})",
        params.region_id,
        params.page_size
    );

    guarded("Error fetching list of schedules", async move {
        let client = state.vertex().await?;
        Ok(client
            .list_schedules(
                &params.region_id,
                params.page_size,
                params.page_token.as_deref(),
            )
            .await?)
    })
    .await
}

/// GET /api/vertex/getSchedule
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Value> {
    tracing::debug!("Getting schedule: {}", params.schedule_id);

    guarded("Error getting the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .get_schedule(&params.region_id, &params.schedule_id)
            .await?)
    })
    .await
}

/// POST /api/vertex/pauseSchedule
pub async fn pause_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Value> {
    guarded("Error pausing the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .pause_schedule(&params.region_id, &params.schedule_id)
            .await?)
    })
    .await
}

/// POST /api/vertex/resumeSchedule
pub async fn resume_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Value> {
    guarded("Error resuming the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .resume_schedule(&params.region_id, &params.schedule_id)
            .await?)
    })
    .await
}

/// POST /api/vertex/triggerSchedule
/// Run the schedule's notebook once now
pub async fn trigger_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Value> {
    guarded("Error triggering the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .trigger_schedule(&params.region_id, &params.schedule_id)
            .await?)
    })
    .await
}

/// POST /api/vertex/updateSchedule
/// Patch the fields present in the body
pub async fn update_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    guarded("Error updating the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .update_schedule(&params.region_id, &params.schedule_id, &body)
            .await?)
    })
    .await
}

/// DELETE /api/vertex/deleteSchedule
pub async fn delete_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Value> {
    tracing::info!("Deleting schedule: {}", params.schedule_id);

    guarded("Error deleting the schedule", async move {
        let client = state.vertex().await?;
        Ok(client
            .delete_schedule(&params.region_id, &params.schedule_id)
            .await?)
    })
    .await
}

// =============================================================================
// Executions
// =============================================================================

/// GET /api/vertex/listNotebookExecutionJobs
pub async fn list_notebook_execution_jobs(
    State(state): State<AppState>,
    Query(params): Query<ExecutionJobsQuery>,
) -> ApiResult<Value> {
    tracing::debug!(
        "Listing notebook execution jobs for schedule {}",
        params.schedule_id
    );

    guarded("Error fetching notebook execution jobs", async move {
        let client = state.vertex().await?;
        Ok(client
            .list_notebook_execution_jobs(
                &params.region_id,
                &params.schedule_id,
                &params.order_by,
                params.page_size,
                params.start_date.as_deref(),
            )
            .await?)
    })
    .await
}
