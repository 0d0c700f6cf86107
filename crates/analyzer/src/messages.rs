//! Anthropic Messages API wire types.
//!
//! Only the subset vidaio sends and reads: base64 image blocks, text blocks,
//! and the text content of the reply.

use serde::{Deserialize, Serialize};

/// Media type of every frame vidaio sends.
pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// Body of `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system: String,
    pub messages: Vec<Message>,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One element of a user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

impl ContentBlock {
    /// Image block carrying base64-encoded JPEG bytes.
    pub fn jpeg_base64(data: String) -> Self {
        Self::Image {
            source: ImageSource {
                kind: ImageSourceKind::Base64,
                media_type: JPEG_MEDIA_TYPE.to_string(),
                data,
            },
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: ImageSourceKind,
    pub media_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSourceKind {
    Base64,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Decoded `POST /v1/messages` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    /// Text of the first text block, if the model returned one.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ResponseBlock::Text { text } => Some(text.as_str()),
            ResponseBlock::Other => None,
        })
    }
}

/// A block of the assistant reply. Non-text blocks are not used.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Token accounting reported by the service.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_block_wire_shape() {
        let block = ContentBlock::jpeg_base64("AAAA".to_string());
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": "image/jpeg",
                    "data": "AAAA"
                }
            })
        );
    }

    #[test]
    fn request_wire_shape() {
        let request = MessagesRequest {
            model: "claude-sonnet-4-5".to_string(),
            max_tokens: 1000,
            temperature: 0.5,
            system: "be terse".to_string(),
            messages: vec![Message {
                role: Role::User,
                content: vec![ContentBlock::text("hello")],
            }],
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "claude-sonnet-4-5");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["system"], "be terse");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][0]["text"], "hello");
    }

    #[test]
    fn response_first_text_skips_other_blocks() {
        let raw = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-5",
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "{\"threat_level\": 1}"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1200, "output_tokens": 80}
        }"#;
        let response: MessagesResponse = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(response.first_text(), Some("{\"threat_level\": 1}"));
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(response.usage.map(|u| u.output_tokens), Some(80));
    }

    #[test]
    fn response_without_text() {
        let response: MessagesResponse =
            serde_json::from_str(r#"{"content": []}"#).expect("deserialize");
        assert!(response.first_text().is_none());
    }
}
