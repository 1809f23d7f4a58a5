use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_state;
use crate::server::build_gateway_router;

fn bearer(value: &'static str) -> (header::HeaderName, HeaderValue) {
    (header::AUTHORIZATION, HeaderValue::from_static(value))
}

#[tokio::test]
async fn test_requests_without_key_are_rejected() {
    let state = test_state("https://grok.com", 2);
    let server = TestServer::new(build_gateway_router(state)).unwrap();

    let response = server.get("/v1/models").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("Bearer wrong");
    let response = server.get("/v1/models").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_models_shape() {
    let state = test_state("https://grok.com", 2);
    let server = TestServer::new(build_gateway_router(state)).unwrap();

    let (name, value) = bearer("Bearer secret");
    let response = server.get("/v1/models").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["object"], "list");
    let ids: Vec<&str> =
        body["data"].as_array().unwrap().iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&"grok-3"));
    assert!(ids.contains(&"grok-4-reasoning"));
    assert_eq!(body["data"][0]["object"], "model");
}

#[tokio::test]
async fn test_unknown_model_maps_to_400_envelope() {
    let state = test_state("https://grok.com", 2);
    state.pool.add("sso-rw=a;sso=a");
    let server = TestServer::new(build_gateway_router(state)).unwrap();

    let (name, value) = bearer("Bearer secret");
    let response = server
        .post("/v1/chat/completions")
        .add_header(name, value)
        .json(&json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_chat_completion_end_to_end() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/app-chat/conversations/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "pong"})))
        .mount(&upstream)
        .await;

    let state = test_state(&upstream.uri(), 2);
    state.pool.add("sso-rw=a;sso=a");
    let server = TestServer::new(build_gateway_router(state)).unwrap();

    let (name, value) = bearer("Bearer secret");
    let response = server
        .post("/v1/chat/completions")
        .add_header(name, value)
        .json(&json!({
            "model": "grok-3",
            "messages": [{"role": "user", "content": "ping"}]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["response"], "pong");
}

#[tokio::test]
async fn test_empty_pool_maps_to_503() {
    let state = test_state("https://grok.com", 2);
    let server = TestServer::new(build_gateway_router(state)).unwrap();

    let (name, value) = bearer("Bearer secret");
    let response = server
        .post("/v1/chat/completions")
        .add_header(name, value)
        .json(&json!({
            "model": "grok-3",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "server_error");
}
