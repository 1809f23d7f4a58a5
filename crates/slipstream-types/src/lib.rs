//! Shared protocol and error types for the Slipstream gateway.
//!
//! Everything here is plain data: the OpenAI-shaped inbound request
//! types, the upstream wire payload, the static model registry and the
//! gateway error taxonomy. Behavior lives in `slipstream-core`.

pub mod chat;
pub mod error;
pub mod registry;
pub mod upstream;

pub use chat::{ChatRequest, ContentPart, Message, MessageContent, Role};
pub use error::GatewayError;
pub use registry::{ModelRegistry, ModelSpec};
pub use upstream::{ToolOverrides, UpstreamPayload};
