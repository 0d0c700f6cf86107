//! Cleanup of model replies that should have been raw JSON.
//!
//! The model is told to answer with a bare JSON object, but sometimes wraps
//! it in a Markdown code fence or adds a sentence around it. Parsing tries
//! the fence-stripped text first, then the span between the first `{` and
//! the last `}` of the reply.

use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Trim `raw` and, if it opens with a code fence, return the fenced body.
///
/// An optional language tag after the opening fence (`json`, `JSON`, ...)
/// is dropped. A missing closing fence keeps everything after the opener.
pub fn clean_response_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let body = match body.find(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}

/// Slice from the first `{` to the last `}` inclusive, if both exist in order.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a model reply into `T`, tolerating fences and surrounding prose.
///
/// Returns the error from the fence-stripped attempt when every candidate
/// fails.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    let cleaned = clean_response_text(raw);
    let first_err = match serde_json::from_str::<T>(cleaned) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    match brace_span(raw) {
        Some(span) if span != cleaned => {
            tracing::debug!("Reply was not bare JSON; retrying on the outer object span");
            serde_json::from_str::<T>(span).map_err(|_| first_err)
        }
        _ => Err(first_err),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
