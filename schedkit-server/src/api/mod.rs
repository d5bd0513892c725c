//! API Module
//!
//! HTTP API layer of the scheduler extension.
//! Each submodule handles the endpoints proxying one upstream service.

pub mod auth;
pub mod composer;
pub mod error;
pub mod health;
pub mod logs;
pub mod vertex;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main router with all endpoints
///
/// # Arguments
/// * `state` - Shared wiring for the handlers
/// * `base_path` - Prefix for the API routes (e.g. "/scheduler-plugin");
///   `/health` always stays at the root
pub fn create_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        // Composer endpoints
        .route("/composerList", get(composer::list_environments))
        .route("/getComposerEnvironment", get(composer::get_environment))
        // Vertex endpoints
        .route("/api/vertex/uiConfig", get(vertex::list_uiconfig))
        .route("/api/vertex/createJobScheduler", post(vertex::create_schedule))
        .route("/api/storage/createNewBucket", post(vertex::create_bucket))
        .route("/api/vertex/listSchedules", get(vertex::list_schedules))
        .route("/api/vertex/getSchedule", get(vertex::get_schedule))
        .route("/api/vertex/pauseSchedule", post(vertex::pause_schedule))
        .route("/api/vertex/resumeSchedule", post(vertex::resume_schedule))
        .route("/api/vertex/triggerSchedule", post(vertex::trigger_schedule))
        .route("/api/vertex/updateSchedule", post(vertex::update_schedule))
        .route("/api/vertex/deleteSchedule", delete(vertex::delete_schedule))
        .route(
            "/api/vertex/listNotebookExecutionJobs",
            get(vertex::list_notebook_execution_jobs),
        )
        // Log endpoints
        .route("/api/logEntries/listEntries", get(logs::list_log_entries))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    let base_path = base_path.trim_end_matches('/');
    let router = if base_path.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(base_path, api)
    };

    router
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
