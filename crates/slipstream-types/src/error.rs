//! Gateway error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the gateway to API callers.
///
/// Retry-eligible upstream classifications (429, transient transport
/// faults, unexpected statuses) are consumed inside the orchestrator and
/// never appear here; only terminal outcomes do.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GatewayError {
    /// Bad or missing model/messages in the inbound request
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Missing or wrong API key
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested model is not in the registry
    #[error("Unsupported model: {model}")]
    UnsupportedModel { model: String },

    /// Every message reduced to blank after content extraction
    #[error("Conversation is empty after content extraction")]
    EmptyConversation,

    /// Pool had no credentials when selection started
    #[error("No session credentials available")]
    NoTokensAvailable,

    /// Pool drained by eviction, or the attempt budget ran out
    #[error("All session credentials exhausted")]
    TokensExhausted,

    /// Upstream answered 403: network-level block, retrying won't help
    /// until network/IP conditions change
    #[error("Upstream refused the connection (network-level block)")]
    Forbidden,

    /// Mid-stream read failure; surfaced in-band as a synthetic stream
    /// event, never as an HTTP status
    #[error("Stream interrupted: {message}")]
    StreamInterrupted { message: String },
}

impl GatewayError {
    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::Unauthorized
                | Self::UnsupportedModel { .. }
                | Self::EmptyConversation
        )
    }

    /// OpenAI-style error `type` field for the response envelope.
    pub fn error_type(&self) -> &'static str {
        if self.is_client_error() {
            "invalid_request_error"
        } else {
            "server_error"
        }
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::Unauthorized => 401,
            Self::UnsupportedModel { .. } => 400,
            Self::EmptyConversation => 400,
            Self::NoTokensAvailable => 503,
            Self::TokensExhausted => 502,
            Self::Forbidden => 403,
            Self::StreamInterrupted { .. } => 502,
        }
    }
}
