//! Provider-agnostic classification of HTTP outcomes.
//!
//! Adapters never map statuses to errors themselves; they hand the decoded body to
//! [`classify`] (or [`classify_with`] when their error payload has its own shape).

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LLMError;
use crate::http::HttpResponse;

/// Extracts a human-readable error message from a decoded error body.
pub type ErrorMessageExtractor = fn(&Value) -> Option<String>;

/// Classifies a response using the common `{"error": {"message": ...}}` body shape.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use unillm::error::LLMError;
/// use unillm::response::classify;
///
/// let ok = classify(201, json!({"id": 1})).unwrap();
/// assert_eq!(ok, json!({"id": 1}));
///
/// let err = classify(400, json!({"error": {"message": "Invalid request format"}})).unwrap_err();
/// assert!(matches!(err, LLMError::Api { status: Some(400), .. }));
/// assert!(err.to_string().contains("Invalid request format"));
/// ```
///
/// # Errors
///
/// `401` yields [`LLMError::Authentication`], `429` yields [`LLMError::RateLimit`], and any
/// other status outside `200..300` yields [`LLMError::Api`].
pub fn classify(status: u16, body: Value) -> Result<Value, LLMError> {
    classify_with(status, body, error_message)
}

/// Same policy as [`classify`], with a caller-supplied message extractor.
///
/// # Errors
///
/// See [`classify`].
pub fn classify_with(
    status: u16,
    body: Value,
    extract: ErrorMessageExtractor,
) -> Result<Value, LLMError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }
    let message =
        extract(&body).unwrap_or_else(|| format!("request failed with status {status}"));
    Err(match status {
        401 => LLMError::Authentication { message },
        429 => LLMError::RateLimit {
            message,
            retry_after: None,
        },
        _ => LLMError::api(Some(status), message),
    })
}

/// Reads `body.error.message`.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Decodes a raw transport response and classifies it.
///
/// A non-JSON error body is kept as a JSON string so classification still sees the
/// status; a non-JSON success body is an [`LLMError::Api`].
pub(crate) fn handle_http_response(
    response: HttpResponse,
    extract: ErrorMessageExtractor,
) -> Result<Value, LLMError> {
    let status = response.status;
    let retry_after = retry_after_from_headers(&response);
    let body = match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => value,
        Err(_) if response.body.is_empty() => Value::Null,
        Err(err) if (200..300).contains(&status) => {
            return Err(LLMError::api(
                Some(status),
                format!("failed to decode response body: {err}"),
            ));
        }
        Err(_) => Value::String(String::from_utf8_lossy(&response.body).into_owned()),
    };

    debug!(status, "classifying provider response");
    classify_with(status, body, extract).map_err(|err| {
        warn!(status, error = %err, "provider request failed");
        match err {
            LLMError::RateLimit { message, .. } => LLMError::RateLimit {
                message,
                retry_after,
            },
            other => other,
        }
    })
}

/// Numeric `Retry-After` header in seconds; HTTP-date values are ignored.
fn retry_after_from_headers(response: &HttpResponse) -> Option<Duration> {
    response
        .header("retry-after")
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
