//! Integration tests: orchestrator against a mock upstream, router-level
//! auth and error mapping.

mod router;

use crate::config::GatewayConfig;
use crate::server::AppState;
use slipstream_types::chat::{ChatRequest, Message, MessageContent};

pub fn test_config(upstream_base_url: &str, max_attempts: usize) -> GatewayConfig {
    GatewayConfig {
        upstream_base_url: upstream_base_url.trim_end_matches('/').to_string(),
        api_key: "secret".to_string(),
        max_attempts,
        ..GatewayConfig::default()
    }
}

pub fn test_state(upstream_base_url: &str, max_attempts: usize) -> AppState {
    AppState::new(test_config(upstream_base_url, max_attempts)).expect("test state")
}

pub fn chat_request(model: &str, text: &str, stream: bool) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![Message {
            role: "user".to_string(),
            content: MessageContent::Text(text.to_string()),
        }],
        stream,
    }
}
