//! OpenAI-shaped chat completion request types.
//!
//! Message content arrives in three wire shapes: a plain string, a
//! single content-part object, or an ordered list of parts. The untagged
//! union below models that directly instead of sniffing `serde_json`
//! values at call sites.

use serde::{Deserialize, Serialize};

/// Normalized message role. Anything that is not exactly `assistant`
/// collapses to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn normalize(raw: &str) -> Self {
        if raw == "assistant" {
            Self::Assistant
        } else {
            Self::User
        }
    }

    /// Upper-case label used in the joined conversation string.
    pub fn as_upper(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
        }
    }
}

/// One part of a multi-part message body, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    /// Image parts carry a payload the gateway never forwards; it is
    /// kept only so the wire shape round-trips.
    #[serde(rename = "image_url")]
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<serde_json::Value>,
    },
}

/// Message content union: plain text, one part, or an ordered part list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Part(ContentPart),
    Parts(Vec<ContentPart>),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Inbound chat message. The role arrives as a raw string and is
/// normalized during transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: MessageContent,
}

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_shapes_deserialize() {
        let plain: MessageContent = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(plain, MessageContent::Text("hello".to_string()));

        let part: MessageContent =
            serde_json::from_str(r#"{"type": "text", "text": "hi"}"#).unwrap();
        assert_eq!(part, MessageContent::Part(ContentPart::Text { text: "hi".to_string() }));

        let parts: MessageContent = serde_json::from_str(
            r#"[{"type": "text", "text": "a"}, {"type": "image_url", "image_url": {"url": "https://x/y.png"}}]"#,
        )
        .unwrap();
        match parts {
            MessageContent::Parts(list) => {
                assert_eq!(list.len(), 2);
                assert!(matches!(list[1], ContentPart::Image { .. }));
            }
            other => panic!("expected part list, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_defaults_to_empty_text() {
        let message: Message = serde_json::from_str(r#"{"role": "user"}"#).unwrap();
        assert_eq!(message.content, MessageContent::Text(String::new()));
    }

    #[test]
    fn test_role_normalization() {
        assert_eq!(Role::normalize("assistant"), Role::Assistant);
        assert_eq!(Role::normalize("user"), Role::User);
        assert_eq!(Role::normalize("system"), Role::User);
        assert_eq!(Role::normalize("Assistant"), Role::User);
    }
}
