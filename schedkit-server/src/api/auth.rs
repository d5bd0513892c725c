//! Server token check
//!
//! Accepts the token as `Authorization: token <t>`, `Authorization: Bearer <t>`
//! or a `?token=<t>` query parameter. With no token configured every request
//! passes.

use axum::{
    Json,
    extract::{Query, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

pub async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.auth_token() else {
        return next.run(req).await;
    };

    let accepted = presented_token(&req)
        .is_some_and(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()));
    if accepted {
        return next.run(req).await;
    }

    tracing::warn!("Rejected unauthenticated request to {}", req.uri().path());
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({ "error": "Forbidden" })),
    )
        .into_response()
}

fn presented_token(req: &Request) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("token ")
                .or_else(|| value.strip_prefix("Bearer "))
        })
        .map(|token| token.trim().to_string());

    from_header.or_else(|| {
        Query::<TokenQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(q)| q.token)
    })
}

/// Compares without short-circuiting on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, authorization: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_presented_token_sources() {
        assert_eq!(
            presented_token(&request("/x", Some("token abc"))).as_deref(),
            Some("abc")
        );
        assert_eq!(
            presented_token(&request("/x", Some("Bearer abc"))).as_deref(),
            Some("abc")
        );
        assert_eq!(
            presented_token(&request("/x?token=abc&region_id=r", None)).as_deref(),
            Some("abc")
        );
        assert_eq!(presented_token(&request("/x", Some("Basic abc"))), None);
        assert_eq!(presented_token(&request("/x", None)), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"s3cret", b"s3cret"));
        assert!(!constant_time_eq(b"s3cret", b"s3creT"));
        assert!(!constant_time_eq(b"s3cret", b"s3cre"));
        assert!(!constant_time_eq(b"", b"x"));
    }
}
