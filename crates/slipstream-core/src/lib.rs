//! Slipstream gateway core.
//!
//! The resilience and translation layer between the OpenAI-compatible
//! surface and the upstream chat service:
//! - credential pool with round-robin rotation and eviction
//! - message transformer (role coalescing, content flattening)
//! - verbatim stream relay
//! - request orchestrator driving the retry state machine

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod orchestrator;
pub mod pool;
pub mod relay;
pub mod server;
pub mod transform;
pub mod upstream;

pub use config::GatewayConfig;
pub use orchestrator::{ChatOutcome, RequestOrchestrator};
pub use pool::CredentialPool;
pub use server::{build_gateway_router, AppState};
pub use upstream::UpstreamClient;

#[cfg(test)]
mod tests;
