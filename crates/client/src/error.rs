//! API error taxonomy and response classification.
//!
//! Classification is a pure function of status code and body so it can be
//! tested without a network. The taxonomy mirrors how failures surface to
//! the user: session expiry tears the session down, field errors land on
//! the offending input, 5xx and transport errors get a retry affordance.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 anywhere; the interceptor has already torn the session down.
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Client-side or backend (400) validation, mapped to the first
    /// relevant field message.
    #[error("validation failed: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// 5xx; shown as a generic try-again-later message.
    #[error("server error, please try again later")]
    Server(u16),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The fixed request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The response body did not match the expected shape.
    #[error("unexpected response format: {0}")]
    Parse(String),

    /// Any other non-success status.
    #[error("unexpected response ({0}): {1}")]
    Unexpected(u16, String),
}

impl ApiError {
    pub fn validation(field: Option<&str>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    /// Whether a retry affordance makes sense (no automatic retry is ever
    /// performed).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Server(_) | ApiError::Network(_) | ApiError::Timeout
        )
    }
}

/// Map a non-success HTTP response to an [`ApiError`].
pub fn classify_response(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        400 => classify_bad_request(body),
        500..=599 => ApiError::Server(status),
        _ => ApiError::Unexpected(status, truncate(body)),
    }
}

/// Extract the first relevant field message from a 400 body.
///
/// Django-style bodies come as `{"field": ["msg", ...]}` or
/// `{"detail": "msg"}`. Field keys are preferred over the generic
/// `detail`/`message`/`non_field_errors` keys.
fn classify_bad_request(body: &str) -> ApiError {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return ApiError::validation(None, "invalid request");
    };

    let mut generic: Option<String> = None;
    for (key, value) in &map {
        let message = match value {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        };
        let Some(message) = message else { continue };

        if matches!(key.as_str(), "detail" | "message" | "error" | "non_field_errors") {
            generic.get_or_insert(message);
        } else {
            return ApiError::validation(Some(key), message);
        }
    }

    match generic {
        Some(message) => ApiError::validation(None, message),
        None => ApiError::validation(None, "invalid request"),
    }
}

fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &body[..cut])
    }
}
