//! Slipstream Server - Headless Daemon
//!
//! A pure Rust HTTP gateway that:
//! - Accepts OpenAI-style chat completions on /v1/* and forwards them to
//!   the upstream chat service over a pool of rotating session cookies
//! - Exposes token administration on /get|add|delete (bearer key) and a
//!   browser console on /manager (session cookie)
//! - Seeds the credential pool once at startup from SLIPSTREAM_SSO

use anyhow::Result;
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod admin;
mod manager;
mod state;

use slipstream_core::{build_gateway_router, pool::format_session_cookie, AppState, GatewayConfig};
use state::ServerState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env();
    if config.api_key.is_empty() {
        tracing::warn!("SLIPSTREAM_API_KEY is not set; every request will be rejected");
    }

    let gateway = AppState::new(config.clone()).map_err(|e| anyhow::anyhow!(e))?;

    let seeded = seed_pool(&gateway);
    info!("credential bootstrap complete: {} token(s) loaded", seeded);

    let state = ServerState::new(gateway.clone());
    let app = build_router(gateway, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);
    info!("chat endpoint at http://{}/v1/chat/completions", addr);
    info!("manager console at http://{}/manager", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Consume the env-provided seed values once, wrapping each as the
/// upstream cookie pair. Duplicates are dropped by the pool.
fn seed_pool(gateway: &AppState) -> usize {
    for seed in &gateway.config.sso_seeds {
        gateway.pool.add(&format_session_cookie(seed));
    }
    gateway.pool.len()
}

fn build_router(gateway: AppState, state: ServerState) -> Router {
    let admin_routes = Router::new()
        .route("/get/tokens", get(admin::list_tokens))
        .route("/add/token", post(admin::add_token))
        .route("/delete/token", post(admin::delete_token))
        .with_state(state.clone());

    let manager_routes = Router::new()
        .route("/manager/login", get(manager::login_page).post(manager::login))
        .route("/manager", get(manager::console))
        .route("/manager/api/get", get(manager::api_get))
        .route("/manager/api/add", post(manager::api_add))
        .route("/manager/api/delete", post(manager::api_delete))
        .with_state(state);

    build_gateway_router(gateway)
        .merge(admin_routes)
        .merge(manager_routes)
        .route("/health", get(health_check))
        .fallback(liveness)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Catch-all liveness answer for probes hitting arbitrary paths.
async fn liveness() -> impl IntoResponse {
    "api运行正常"
}
