//! HTTP handlers for the OpenAI-compatible surface.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::json;
use slipstream_types::chat::ChatRequest;
use slipstream_types::error::GatewayError;

use crate::orchestrator::ChatOutcome;
use crate::relay;
use crate::server::AppState;

pub async fn chat_completions(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match state.orchestrator().execute(&request).await {
        Ok(ChatOutcome::Json(value)) => Json(value).into_response(),
        Ok(ChatOutcome::Raw(text)) => text.into_response(),
        Ok(ChatOutcome::Stream(response)) => stream_response(response),
        Err(err) => error_response(err),
    }
}

pub async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    let created = chrono::Utc::now().timestamp();
    let data: Vec<_> = state
        .registry
        .ids()
        .map(|id| {
            json!({
                "id": id,
                "object": "model",
                "created": created,
                "owned_by": "grok",
            })
        })
        .collect();

    Json(json!({
        "object": "list",
        "data": data
    }))
}

/// Wrap the open upstream response in the verbatim line relay. Lines go
/// out exactly as the upstream sent them; no OpenAI SSE re-framing.
fn stream_response(response: reqwest::Response) -> Response {
    let lines = relay::relay_lines(response.bytes_stream()).map(Ok::<_, std::io::Error>);
    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(lines))
        .expect("valid streaming response")
}

/// OpenAI-style error envelope with the taxonomy's status code.
pub(crate) fn error_response(err: GatewayError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(json!({
        "error": {
            "message": err.to_string(),
            "type": err.error_type(),
        }
    }));
    (status, body).into_response()
}
