//! REST client for the Anthropic Messages API.
//!
//! Wraps `POST /v1/messages` using [`reqwest`]. One request per call; no
//! retries and no streaming.

use std::time::Duration;

use crate::client::InferenceClient;
use crate::messages::{MessagesRequest, MessagesResponse};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Value sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// HTTP client for the Messages API.
pub struct AnthropicApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Errors from the Messages API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Messages API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl AnthropicApi {
    /// Create a client for `base_url` (e.g. `https://api.anthropic.com`).
    pub fn new(api_key: String, base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_key, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl InferenceClient for AnthropicApi {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, ApiError> {
        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            "Sending Messages API request",
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<MessagesResponse>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
