//! Wire format for the upstream chat endpoint.
//!
//! The upstream takes the whole conversation as one joined string plus a
//! block of feature toggles. The gateway always disables search, tools
//! and image generation; only the reasoning flag varies per model.

use serde::{Deserialize, Serialize};

/// Tool toggles the upstream expects on every request. All off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolOverrides {
    pub image_gen: bool,
    pub web_search: bool,
    pub x_search: bool,
    pub x_media_search: bool,
    pub trends_search: bool,
    pub x_post_analyze: bool,
}

/// Request body for the upstream conversation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPayload {
    pub temporary: bool,
    pub model_name: String,
    pub message: String,
    pub file_attachments: Vec<String>,
    pub image_attachments: Vec<String>,
    pub disable_search: bool,
    pub enable_image_generation: bool,
    pub return_image_bytes: bool,
    pub return_raw_grok_in_xai_request: bool,
    pub enable_image_streaming: bool,
    pub image_generation_count: u32,
    pub force_concise: bool,
    pub tool_overrides: ToolOverrides,
    pub enable_side_by_side: bool,
    pub send_final_metadata: bool,
    pub custom_personality: String,
    pub deepsearch_preset: String,
    pub is_reasoning: bool,
    pub disable_text_follow_ups: bool,
}

impl UpstreamPayload {
    /// Payload with the fixed toggle block around the given conversation.
    pub fn new(model: &str, message: String, temporary: bool, is_reasoning: bool) -> Self {
        Self {
            temporary,
            model_name: model.to_string(),
            message,
            file_attachments: Vec::new(),
            image_attachments: Vec::new(),
            disable_search: true,
            enable_image_generation: false,
            return_image_bytes: false,
            return_raw_grok_in_xai_request: false,
            enable_image_streaming: false,
            image_generation_count: 0,
            force_concise: false,
            tool_overrides: ToolOverrides::default(),
            enable_side_by_side: true,
            send_final_metadata: true,
            custom_personality: String::new(),
            deepsearch_preset: String::new(),
            is_reasoning,
            disable_text_follow_ups: true,
        }
    }
}
