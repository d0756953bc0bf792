use serde::Deserialize;
use serde_json::Value;

/// Pulls `error.message` out of an Anthropic error body.
///
/// Anthropic wraps errors as `{"type": "error", "error": {"type": ..., "message": ...}}`.
pub(crate) fn extract_anthropic_error(body: &Value) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<InnerError>,
    }

    #[derive(Deserialize)]
    struct InnerError {
        message: Option<String>,
    }

    ErrorBody::deserialize(body).ok()?.error?.message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_message() {
        let body = json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        });
        assert_eq!(
            extract_anthropic_error(&body).as_deref(),
            Some("invalid x-api-key")
        );
    }

    #[test]
    fn unknown_shapes_yield_nothing() {
        assert_eq!(extract_anthropic_error(&json!({"type": "error"})), None);
        assert_eq!(extract_anthropic_error(&json!("overloaded")), None);
    }
}
