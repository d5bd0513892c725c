//! API Error Handling
//!
//! Every handler failure is logged with a per-route context and answered
//! with `200 OK` and `{"error": "<message>"}`. Callers distinguish failures
//! by the `error` key, never by status code.

use std::future::Future;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schedkit_client::ClientError;
use thiserror::Error;

use crate::credentials::CredentialError;

/// Failure of one proxied call
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Upstream(#[from] ClientError),
}

/// A failed call together with the route context it is logged under
#[derive(Debug)]
pub struct ApiError {
    context: &'static str,
    source: ProxyError,
}

impl ApiError {
    pub fn new(context: &'static str, source: impl Into<ProxyError>) -> Self {
        Self {
            context,
            source: source.into(),
        }
    }

    pub fn message(&self) -> String {
        self.source.to_string()
    }

    /// Failures caused by the caller's input rather than by this server or
    /// the upstream service
    pub fn is_client_fault(&self) -> bool {
        match &self.source {
            ProxyError::Upstream(err) => {
                err.is_client_error() || matches!(err, ClientError::InvalidRequest(_))
            }
            ProxyError::Credentials(_) => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.message();
        if self.is_client_fault() {
            tracing::warn!("{}: {}", self.context, message);
        } else {
            tracing::error!("{}: {}", self.context, message);
        }

        (StatusCode::OK, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Runs one proxied call, turning any failure into the error envelope
///
/// # Arguments
/// * `context` - Log prefix for failures (e.g. "Error pausing the schedule")
/// * `call` - The credential, session and upstream work for the request
pub async fn guarded<T, F>(context: &'static str, call: F) -> ApiResult<T>
where
    F: Future<Output = Result<T, ProxyError>>,
{
    call.await
        .map(Json)
        .map_err(|source| ApiError { context, source })
}
