//! Log API Handlers

use axum::extract::{Query, State};
use schedkit_core::domain::log::LogEntry;
use serde::Deserialize;

use crate::api::error::{ApiResult, guarded};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogEntriesQuery {
    pub filter_query: Option<String>,
}

/// GET /api/logEntries/listEntries
/// Newest-first log entries matching an optional Cloud Logging filter
pub async fn list_log_entries(
    State(state): State<AppState>,
    Query(params): Query<LogEntriesQuery>,
) -> ApiResult<Vec<LogEntry>> {
    guarded("Error fetching log entries", async move {
        let client = state.logging().await?;
        Ok(client
            .list_log_entries(params.filter_query.as_deref())
            .await?)
    })
    .await
}
