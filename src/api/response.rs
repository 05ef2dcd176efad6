//! Response classification.
//!
//! DESIGN
//! ======
//! A response is classified before its body is trusted, in a fixed order:
//!
//! 1. HTML content type: misconfigured server, whatever the status.
//! 2. Non-2xx: the server's message if one can be extracted, else the
//!    status text, else a generic line with the numeric status.
//! 3. 2xx: the body must parse as the expected payload or the whole
//!    response is rejected.
//!
//! Classification is a pure function of the status line, content type and
//! body bytes so it can be exercised without a network.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

pub const HTML_CONTENT_TYPE: &str = "text/html";

/// The parts of an HTTP response that classification looks at.
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    pub status: u16,
    pub status_text: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

/// Where a JSON error body may carry its human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    /// FastAPI's `HTTPException` convention.
    Detail,
    Message,
}

impl MessageField {
    /// Extraction strategies, tried in order.
    pub const ORDER: [Self; 2] = [Self::Detail, Self::Message];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Message => "message",
        }
    }

    /// Message from `body`, if this field is present and not null.
    /// Strings are used verbatim; other values in compact JSON form.
    #[must_use]
    pub fn extract(self, body: &Value) -> Option<String> {
        match body.get(self.key())? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Classify a response and decode its payload.
///
/// # Errors
///
/// Returns [`ApiError::MisconfiguredServer`] for HTML, [`ApiError::Status`]
/// for non-2xx statuses and [`ApiError::MalformedPayload`] when a 2xx body
/// does not decode as `T`.
pub fn classify<T: DeserializeOwned>(raw: &RawResponse<'_>) -> Result<T, ApiError> {
    if is_html(raw.content_type) {
        return Err(ApiError::MisconfiguredServer);
    }

    if !(200..300).contains(&raw.status) {
        return Err(ApiError::Status {
            status: raw.status,
            message: error_message(raw.status, raw.status_text, raw.body),
        });
    }

    serde_json::from_slice::<T>(raw.body).map_err(|e| {
        tracing::debug!(error = %e, "response body did not decode");
        ApiError::MalformedPayload
    })
}

/// Human-readable message for a failed request.
#[must_use]
pub fn error_message(status: u16, status_text: Option<&str>, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| MessageField::ORDER.iter().find_map(|field| field.extract(&json)));
    if let Some(message) = from_body {
        return message;
    }

    match status_text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => format!("Request failed with status {status}"),
    }
}

fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains(HTML_CONTENT_TYPE))
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
