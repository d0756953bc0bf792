use serde::Deserialize;
use serde_json::Value;

/// Pulls `error.message` out of an OpenAI error body, appending `error.code` when set.
pub(crate) fn extract_openai_error(body: &Value) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<InnerError>,
    }
    #[derive(Deserialize)]
    struct InnerError {
        message: Option<String>,
        code: Option<Value>,
    }

    let error = ErrorBody::deserialize(body).ok()?.error?;
    let message = error.message?;
    match error.code {
        Some(Value::String(code)) => Some(format!("{message} ({code})")),
        Some(Value::Number(code)) => Some(format!("{message} ({code})")),
        _ => Some(message),
    }
}
