//! Vision analysis of extracted frames through the Anthropic Messages API.
//!
//! Builds a single multimodal request out of a directory of JPEG frames,
//! sends it through an [`InferenceClient`], and repairs/parses the reply
//! into an [`AnalysisResult`].

pub mod analyzer;
pub mod api;
pub mod client;
pub mod messages;
pub mod prompt;
pub mod response;
pub mod result;

pub use analyzer::{AnalyzerError, AnalyzerSettings, VisionAnalyzer};
pub use api::{AnthropicApi, ApiError};
pub use client::InferenceClient;
pub use result::{AnalysisResult, ThreatLevel};
