//! Bearer-key token administration API.
//!
//! Equivalent operations to the manager console, for scripts: list the
//! pool status map, add a credential from a raw seed value, delete one.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use slipstream_core::middleware::{bearer_token, key_matches};
use slipstream_core::pool::format_session_cookie;

use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct SsoBody {
    pub sso: String,
}

fn authorize(state: &ServerState, headers: &HeaderMap) -> Result<(), Response> {
    if key_matches(bearer_token(headers), &state.gateway.config.api_key) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response())
    }
}

pub async fn list_tokens(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(state.gateway.pool.status_snapshot()).into_response()
}

pub async fn add_token(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<SsoBody>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if body.sso.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "sso value is required"})))
            .into_response();
    }

    let cookie = format_session_cookie(body.sso.trim());
    state.gateway.pool.add(&cookie);

    // Answer with the new entry's status, keyed like the snapshot.
    let snapshot = state.gateway.pool.status_snapshot();
    match snapshot.get(body.sso.trim()) {
        Some(status) => Json(status).into_response(),
        None => Json(json!({})).into_response(),
    }
}

pub async fn delete_token(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<SsoBody>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if body.sso.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "sso value is required"})))
            .into_response();
    }

    let cookie = format_session_cookie(body.sso.trim());
    state.gateway.pool.remove(&cookie);
    Json(json!({"message": "token deleted"})).into_response()
}
