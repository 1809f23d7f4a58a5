//! Bearer-key authentication for the gateway surface.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use slipstream_types::error::GatewayError;

use crate::handlers::error_response;
use crate::server::AppState;

/// Extract the bearer value from the Authorization header. A value
/// without the `Bearer ` prefix is used as-is.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s))
}

/// Direct equality against the configured key. Not constant-time. An
/// empty configured key denies everything.
pub fn key_matches(provided: Option<&str>, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    provided.is_some_and(|k| k == expected)
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let provided = bearer_token(request.headers());
    if !key_matches(provided, &state.config.api_key) {
        tracing::warn!("rejected request to {} without valid API key", request.uri().path());
        return Err(error_response(GatewayError::Unauthorized));
    }
    Ok(next.run(request).await)
}
