//! Gateway router assembly and shared state.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use slipstream_types::registry::ModelRegistry;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers;
use crate::middleware;
use crate::orchestrator::RequestOrchestrator;
use crate::pool::CredentialPool;
use crate::upstream::UpstreamClient;

/// Shared state for the gateway routes.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<CredentialPool>,
    pub registry: Arc<ModelRegistry>,
    pub upstream: Arc<UpstreamClient>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Build state from config. Fails on an unusable upstream client
    /// (e.g. a bad proxy URL).
    pub fn new(config: GatewayConfig) -> Result<Self, String> {
        let upstream = UpstreamClient::from_config(&config)?;
        Ok(Self {
            pool: Arc::new(CredentialPool::new()),
            registry: Arc::new(ModelRegistry::default()),
            upstream: Arc::new(upstream),
            config: Arc::new(config),
        })
    }

    /// Per-request orchestrator over the shared pool and client.
    pub fn orchestrator(&self) -> RequestOrchestrator {
        RequestOrchestrator::new(
            Arc::clone(&self.pool),
            Arc::clone(&self.upstream),
            Arc::clone(&self.registry),
            self.config.max_attempts,
            self.config.temporary_conversations,
        )
    }
}

/// `/v1` proxy router: chat completions and the model list, bearer-gated.
pub fn build_gateway_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route("/v1/models", get(handlers::list_models))
        .layer(axum_middleware::from_fn_with_state(state.clone(), middleware::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
