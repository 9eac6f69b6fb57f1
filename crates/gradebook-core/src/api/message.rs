//! Error-message extraction for non-2xx answers.
//!
//! The service is inconsistent about error bodies: some are JSON objects
//! with `message` or `title`, some are plain text, some are empty. The
//! policy is the same for every endpoint:
//!
//! 1. JSON object with a non-empty string `message`, else `title`
//! 2. non-empty body text, verbatim (trimmed)
//! 3. the status reason phrase
//! 4. the caller's fallback

use crate::error::ConsoleError;
use crate::http::HttpResponse;

/// Picks the message to show for a failed response.
pub fn extract_error_message(response: &HttpResponse, fallback: &str) -> String {
    let text = response.text();
    let trimmed = text.trim();

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        for key in ["message", "title"] {
            if let Some(msg) = map.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.to_string();
                }
            }
        }
    }

    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    if !response.reason.trim().is_empty() {
        return response.reason.trim().to_string();
    }
    fallback.to_string()
}

/// Wraps a non-2xx response into [`ConsoleError::Remote`].
pub(crate) fn remote_error(response: &HttpResponse, fallback: &str) -> ConsoleError {
    let message = extract_error_message(response, fallback);
    tracing::warn!(status = response.status, %message, "request rejected");
    ConsoleError::Remote {
        status: response.status,
        message,
    }
}
