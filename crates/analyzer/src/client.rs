//! Seam between the analyzer and the hosted model.

use crate::api::ApiError;
use crate::messages::{MessagesRequest, MessagesResponse};

/// Anything that can answer a Messages API request.
///
/// [`crate::AnthropicApi`] talks to the real service; tests substitute an
/// in-memory fake.
pub trait InferenceClient: Send + Sync {
    /// Send `request` once and return the decoded response.
    fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> impl std::future::Future<Output = Result<MessagesResponse, ApiError>> + Send;
}
