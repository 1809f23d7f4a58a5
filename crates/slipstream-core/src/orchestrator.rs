//! Request orchestration: validation, credential rotation, upstream
//! dispatch and failure classification.
//!
//! Each attempt gets an explicit classification that the loop matches
//! exhaustively; retry-eligible outcomes never escape mid-loop, only the
//! terminal result does.

use std::sync::Arc;

use serde_json::Value;
use slipstream_types::chat::ChatRequest;
use slipstream_types::error::GatewayError;
use slipstream_types::registry::ModelRegistry;

use crate::pool::{self, CredentialPool};
use crate::transform;
use crate::upstream::UpstreamClient;

/// Classification of one upstream attempt.
#[derive(Debug)]
enum AttemptOutcome {
    /// 403: network-level block unrelated to the credential itself.
    /// Terminal, no eviction.
    Forbidden,
    /// 429: credential burned, evict and rotate.
    RateLimited,
    /// Any other non-200 status: evict and rotate.
    OtherFault(u16),
    /// Connection/timeout/decode failure: rotate without eviction.
    TransportError(String),
}

/// Terminal result of a successful chat request.
pub enum ChatOutcome {
    /// Upstream body parsed as a JSON object.
    Json(Value),
    /// Upstream body that was not a JSON object; relayed unchanged.
    Raw(String),
    /// Open streaming response, ready for the line relay.
    Stream(reqwest::Response),
}

/// Drives the retry state machine for one inbound request.
pub struct RequestOrchestrator {
    pool: Arc<CredentialPool>,
    upstream: Arc<UpstreamClient>,
    registry: Arc<ModelRegistry>,
    max_attempts: usize,
    temporary_conversations: bool,
}

impl RequestOrchestrator {
    pub fn new(
        pool: Arc<CredentialPool>,
        upstream: Arc<UpstreamClient>,
        registry: Arc<ModelRegistry>,
        max_attempts: usize,
        temporary_conversations: bool,
    ) -> Self {
        Self { pool, upstream, registry, max_attempts, temporary_conversations }
    }

    /// Validate model and messages against the registry. Fails before
    /// any credential is consumed.
    fn validate(&self, request: &ChatRequest) -> Result<(), GatewayError> {
        if request.model.is_empty() {
            return Err(GatewayError::InvalidRequest { message: "model is required".to_string() });
        }
        if !self.registry.is_valid(&request.model) {
            return Err(GatewayError::UnsupportedModel { model: request.model.clone() });
        }
        if request.messages.is_empty() {
            return Err(GatewayError::InvalidRequest {
                message: "messages must be a non-empty list".to_string(),
            });
        }
        Ok(())
    }

    pub async fn execute(&self, request: &ChatRequest) -> Result<ChatOutcome, GatewayError> {
        self.validate(request)?;

        // Built once: attempts stay idempotent and an empty conversation
        // fails before any credential is consumed.
        let payload = transform::build_payload(
            &request.messages,
            &request.model,
            &self.registry,
            self.temporary_conversations,
        )?;

        let mut last_outcome: Option<AttemptOutcome> = None;
        for attempt in 0..self.max_attempts {
            let Some(cookie) = self.pool.next() else {
                return Err(if attempt == 0 {
                    GatewayError::NoTokensAvailable
                } else {
                    GatewayError::TokensExhausted
                });
            };
            tracing::info!(attempt, "using credential {}...", pool::preview(&cookie));

            let outcome = match self.upstream.send_chat(&payload, &cookie).await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    tracing::info!(status, "upstream responded");
                    match status {
                        200 => {
                            if request.stream {
                                return Ok(ChatOutcome::Stream(response));
                            }
                            match buffer_response(response).await {
                                Ok(done) => return Ok(done),
                                // Body read failure after 200 is still a
                                // transport fault: rotate, keep the token.
                                Err(message) => AttemptOutcome::TransportError(message),
                            }
                        }
                        403 => AttemptOutcome::Forbidden,
                        429 => AttemptOutcome::RateLimited,
                        status => AttemptOutcome::OtherFault(status),
                    }
                }
                Err(message) => AttemptOutcome::TransportError(message),
            };

            match &outcome {
                AttemptOutcome::Forbidden => {
                    tracing::error!("upstream returned 403: network-level block, aborting");
                    return Err(GatewayError::Forbidden);
                }
                AttemptOutcome::RateLimited => {
                    tracing::warn!("credential rate limited, evicting {}...", pool::preview(&cookie));
                    self.pool.remove(&cookie);
                    if self.pool.is_empty() {
                        return Err(GatewayError::TokensExhausted);
                    }
                }
                AttemptOutcome::OtherFault(status) => {
                    tracing::error!(status, "unexpected upstream status, evicting credential");
                    self.pool.remove(&cookie);
                }
                AttemptOutcome::TransportError(message) => {
                    tracing::warn!("transport failure, keeping credential: {message}");
                }
            }
            last_outcome = Some(outcome);
        }

        match last_outcome {
            Some(AttemptOutcome::Forbidden) => Err(GatewayError::Forbidden),
            _ => Err(GatewayError::TokensExhausted),
        }
    }
}

/// Read the full body. A JSON object passes through parsed; anything
/// else comes back as raw text.
async fn buffer_response(response: reqwest::Response) -> Result<ChatOutcome, String> {
    let text = response.text().await.map_err(|e| format!("failed to read upstream body: {e}"))?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value @ Value::Object(_)) => Ok(ChatOutcome::Json(value)),
        _ => Ok(ChatOutcome::Raw(text)),
    }
}
