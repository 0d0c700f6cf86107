//! Frame directory → request → verdict.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use validator::Validate;
use vidaio_core::error::CoreError;
use vidaio_core::frames::FrameSet;

use crate::api::ApiError;
use crate::client::InferenceClient;
use crate::messages::{ContentBlock, Message, MessagesRequest, Role};
use crate::prompt::ANALYST_PROMPT;
use crate::response;
use crate::result::AnalysisResult;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
/// Output token ceiling used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Low temperature so repeated runs score the same footage alike.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Errors from the analysis step.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("failed to list frames: {0}")]
    Frames(#[from] CoreError),

    #[error("failed to read frame {path}: {source}")]
    ReadFrame {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("inference request failed: {0}")]
    Transport(#[from] ApiError),

    #[error("analysis response malformed: {reason}")]
    MalformedResponse {
        reason: String,
        /// Reply text as received, for diagnostics.
        raw: String,
    },
}

/// Request parameters sent with every analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Sends a directory of frames to the model and parses its verdict.
pub struct VisionAnalyzer<C> {
    client: C,
    settings: AnalyzerSettings,
}

impl<C: InferenceClient> VisionAnalyzer<C> {
    pub fn new(client: C, settings: AnalyzerSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Analyze every JPEG in `dir`, in file-name order.
    ///
    /// An empty directory still produces a request (text block only).
    pub async fn analyze(&self, dir: &Path) -> Result<AnalysisResult, AnalyzerError> {
        let frames = FrameSet::collect(dir).await?;
        if frames.is_empty() {
            tracing::warn!(dir = %dir.display(), "No frames found; sending prompt without images");
        }

        let request = self.build_request(&frames).await?;
        tracing::info!(
            image_count = frames.len(),
            model = %request.model,
            "Submitting frames for analysis",
        );

        let response = self.client.create_message(&request).await?;
        if let Some(usage) = response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
                "Analysis response received",
            );
        }

        let text = response
            .first_text()
            .ok_or_else(|| AnalyzerError::MalformedResponse {
                reason: "response contained no text block".to_string(),
                raw: String::new(),
            })?;

        parse_analysis(text)
    }

    /// Build the single-turn request: one image block per frame, then the
    /// analyst prompt as the closing text block.
    pub async fn build_request(&self, frames: &FrameSet) -> Result<MessagesRequest, AnalyzerError> {
        let mut content = Vec::with_capacity(frames.len() + 1);

        for path in frames.iter() {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| AnalyzerError::ReadFrame {
                    path: path.to_path_buf(),
                    source,
                })?;
            content.push(ContentBlock::jpeg_base64(STANDARD.encode(&bytes)));
        }

        content.push(ContentBlock::text(ANALYST_PROMPT));

        Ok(MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system: ANALYST_PROMPT.to_string(),
            messages: vec![Message {
                role: Role::User,
                content,
            }],
        })
    }
}

/// Clean, parse and validate a raw model reply.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    let result: AnalysisResult =
        response::parse_reply(raw).map_err(|e| AnalyzerError::MalformedResponse {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;

    result
        .validate()
        .map_err(|e| AnalyzerError::MalformedResponse {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;
    use crate::messages::{MessagesResponse, ResponseBlock};

    const VERDICT: &str = r#"{
        "vehicle_detected": true,
        "person_detected": false,
        "license_plates": ["ABC-1234"],
        "possible_vehicle_accident": false,
        "smoke_detected": false,
        "fire_detected": false,
        "firearm_detected": false,
        "threat_level": 2,
        "summary": "A parked car."
    }"#;

    /// Records requests and answers with a canned reply.
    struct FakeClient {
        reply: Result<String, u16>,
        seen: Mutex<Vec<MessagesRequest>>,
    }

    impl FakeClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl InferenceClient for FakeClient {
        async fn create_message(
            &self,
            request: &MessagesRequest,
        ) -> Result<MessagesResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(MessagesResponse {
                    id: "msg_test".to_string(),
                    model: request.model.clone(),
                    content: vec![ResponseBlock::Text { text: text.clone() }],
                    stop_reason: Some("end_turn".to_string()),
                    usage: None,
                }),
                Err(status) => Err(ApiError::ApiError {
                    status: *status,
                    body: "overloaded".to_string(),
                }),
            }
        }
    }

    fn write_frames(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), name.as_bytes()).expect("write frame");
        }
    }

    #[tokio::test]
    async fn request_has_images_in_order_then_one_text_block() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_frames(
            dir.path(),
            &["frame_0002.jpg", "frame_0003.jpg", "frame_0001.jpg", "notes.txt"],
        );

        let analyzer = VisionAnalyzer::new(FakeClient::replying(VERDICT), AnalyzerSettings::default());
        let frames = FrameSet::collect(dir.path()).await.expect("collect");
        let request = analyzer.build_request(&frames).await.expect("build");

        let content = &request.messages[0].content;
        assert_eq!(content.len(), 4);
        assert!(content[..3].iter().all(ContentBlock::is_image));
        assert_eq!(content[3], ContentBlock::text(ANALYST_PROMPT));

        let data: Vec<String> = content[..3]
            .iter()
            .map(|block| match block {
                ContentBlock::Image { source } => source.data.clone(),
                ContentBlock::Text { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(
            data,
            [
                STANDARD.encode("frame_0001.jpg"),
                STANDARD.encode("frame_0002.jpg"),
                STANDARD.encode("frame_0003.jpg"),
            ]
        );
    }

    #[tokio::test]
    async fn request_carries_settings_and_system_prompt() {
        let settings = AnalyzerSettings::default();
        let analyzer = VisionAnalyzer::new(FakeClient::replying(VERDICT), settings.clone());
        let request = analyzer
            .build_request(&FrameSet::default())
            .await
            .expect("build");

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, settings.temperature);
        assert_eq!(request.system, ANALYST_PROMPT);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn empty_directory_sends_text_only() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let analyzer = VisionAnalyzer::new(FakeClient::replying(VERDICT), AnalyzerSettings::default());

        let result = analyzer.analyze(dir.path()).await.expect("analyze");
        assert_eq!(result.threat_level, 2);

        let seen = analyzer.client().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages[0].content, [ContentBlock::text(ANALYST_PROMPT)]);
    }

    #[tokio::test]
    async fn fenced_reply_is_parsed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_frames(dir.path(), &["frame_0001.jpg"]);
        let reply = format!("```json\n{VERDICT}\n```");
        let analyzer = VisionAnalyzer::new(FakeClient::replying(&reply), AnalyzerSettings::default());

        let result = analyzer.analyze(dir.path()).await.expect("analyze");
        assert!(result.vehicle_detected);
        assert_eq!(result.license_plates, ["ABC-1234"]);
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let analyzer = VisionAnalyzer::new(FakeClient::failing(529), AnalyzerSettings::default());

        let result = analyzer.analyze(dir.path()).await;
        assert_matches!(
            result,
            Err(AnalyzerError::Transport(ApiError::ApiError { status: 529, .. }))
        );
    }

    #[tokio::test]
    async fn prose_reply_is_malformed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let analyzer = VisionAnalyzer::new(
            FakeClient::replying("I'm unable to analyze these images."),
            AnalyzerSettings::default(),
        );

        let result = analyzer.analyze(dir.path()).await;
        assert_matches!(result, Err(AnalyzerError::MalformedResponse { raw, .. }) => {
            assert!(raw.starts_with("I'm unable"));
        });
    }

    #[test]
    fn out_of_range_threat_level_is_malformed() {
        let raw = VERDICT.replace("\"threat_level\": 2", "\"threat_level\": 11");
        assert_matches!(parse_analysis(&raw), Err(AnalyzerError::MalformedResponse { .. }));
    }

    #[test]
    fn missing_key_is_malformed() {
        let raw = r#"{"vehicle_detected": true, "threat_level": 1}"#;
        assert_matches!(parse_analysis(raw), Err(AnalyzerError::MalformedResponse { .. }));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let raw = VERDICT.replace("\"summary\"", "\"confidence\": 0.9, \"summary\"");
        let result = parse_analysis(&raw).expect("parse");
        assert_eq!(result.summary, "A parked car.");
    }
}
