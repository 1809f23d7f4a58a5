//! Message transformation: OpenAI-shaped message lists into the
//! upstream's single-string conversation format.
//!
//! Pure functions, no state. Adjacent same-role messages coalesce,
//! image parts become a fixed placeholder, `<think>` spans and inline
//! base64 image markdown are stripped before joining.

use std::sync::LazyLock;

use regex::Regex;
use slipstream_types::chat::{ContentPart, Message, MessageContent, Role};
use slipstream_types::error::GatewayError;
use slipstream_types::registry::ModelRegistry;
use slipstream_types::upstream::UpstreamPayload;

/// Placeholder the upstream understands for inline images.
pub const IMAGE_PLACEHOLDER: &str = "[图片]";

static THINK_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid literal regex"));
static BASE64_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[image\]\(data:.*?base64,.*?\)").expect("valid literal regex"));

/// Strip `<think>…</think>` spans, trim, and replace embedded base64
/// image markdown with the image placeholder.
pub fn sanitize(text: &str) -> String {
    let stripped = THINK_SPAN.replace_all(text, "");
    let trimmed = stripped.trim();
    BASE64_IMAGE.replace_all(trimmed, IMAGE_PLACEHOLDER).into_owned()
}

fn part_text(part: &ContentPart) -> String {
    match part {
        ContentPart::Text { text } => sanitize(text),
        ContentPart::Image { .. } => IMAGE_PLACEHOLDER.to_string(),
    }
}

/// Flatten message content into text. Image parts contribute the
/// placeholder on their own line; multi-part lists join with newlines,
/// with no leading newline before the first emitted piece.
pub fn extract_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => sanitize(text),
        MessageContent::Part(part) => part_text(part),
        MessageContent::Parts(parts) => {
            let mut out = String::new();
            for part in parts {
                let piece = part_text(part);
                if piece.is_empty() {
                    continue;
                }
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&piece);
            }
            out
        }
    }
}

/// Merge adjacent same-role messages. Messages whose content extracts to
/// nothing are dropped entirely: they neither start an entry nor merge.
pub fn coalesce(messages: &[Message]) -> Vec<(Role, String)> {
    let mut entries: Vec<(Role, String)> = Vec::new();
    for message in messages {
        let role = Role::normalize(&message.role);
        let text = extract_text(&message.content);
        if text.is_empty() {
            continue;
        }
        match entries.last_mut() {
            Some((last_role, last_text)) if *last_role == role => {
                last_text.push('\n');
                last_text.push_str(&text);
            }
            _ => entries.push((role, text)),
        }
    }
    entries
}

/// Join coalesced entries as `ROLE: text` lines.
pub fn build_conversation(messages: &[Message]) -> Result<String, GatewayError> {
    let conversation = coalesce(messages)
        .into_iter()
        .map(|(role, text)| format!("{}: {}", role.as_upper(), text))
        .collect::<Vec<_>>()
        .join("\n");
    if conversation.trim().is_empty() {
        return Err(GatewayError::EmptyConversation);
    }
    Ok(conversation)
}

/// Conversation string plus the fixed upstream toggles and the model's
/// reasoning flag from the registry.
pub fn build_payload(
    messages: &[Message],
    model: &str,
    registry: &ModelRegistry,
    temporary: bool,
) -> Result<UpstreamPayload, GatewayError> {
    let conversation = build_conversation(messages)?;
    Ok(UpstreamPayload::new(model, conversation, temporary, registry.is_reasoning(model)))
}
