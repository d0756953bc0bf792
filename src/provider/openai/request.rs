use serde_json::{Map, Value, json};

use crate::config::ClientConfig;
use crate::types::{ChatRequest, CompletionRequest, Message, RequestOptions};

const LEGACY_MARKERS: [&str; 3] = ["davinci", "curie", "babbage"];

/// Returns `true` for models served only by the legacy `/v1/completions` endpoint.
///
/// # Examples
///
/// ```
/// use unillm::provider::openai::is_legacy_completion_model;
///
/// assert!(is_legacy_completion_model("text-davinci-003"));
/// assert!(is_legacy_completion_model("gpt-3.5-turbo-instruct"));
/// assert!(!is_legacy_completion_model("gpt-4"));
/// ```
pub fn is_legacy_completion_model(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    LEGACY_MARKERS.iter().any(|marker| model.contains(marker))
        || model == "ada"
        || model.starts_with("ada-")
        || model.starts_with("text-ada-")
        || model.ends_with("-instruct")
}

pub(crate) fn build_chat_body(request: &ChatRequest, config: &ClientConfig, model: &str) -> Value {
    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));
    body.insert(
        "messages".to_string(),
        Value::Array(
            request
                .formatted_messages()
                .iter()
                .map(convert_message)
                .collect(),
        ),
    );
    apply_options(&mut body, &request.options, config);
    Value::Object(body)
}

pub(crate) fn build_completion_body(
    request: &CompletionRequest,
    config: &ClientConfig,
    model: &str,
) -> Value {
    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));
    body.insert("prompt".to_string(), Value::String(request.prompt.clone()));
    apply_options(&mut body, &request.options, config);
    Value::Object(body)
}

fn convert_message(message: &Message) -> Value {
    json!({
        "role": message.role.as_str(),
        "content": message.content,
    })
}

/// Sampling fields first, passthrough options last so callers can override anything.
fn apply_options(body: &mut Map<String, Value>, options: &RequestOptions, config: &ClientConfig) {
    let temperature = options.temperature.unwrap_or(config.temperature);
    body.insert("temperature".to_string(), Value::from(temperature));
    if let Some(max_tokens) = options.max_tokens.or(config.max_tokens) {
        body.insert("max_tokens".to_string(), Value::from(max_tokens));
    }
    for (k, v) in &options.extra {
        body.insert(k.clone(), v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageInput;

    fn config() -> ClientConfig {
        ClientConfig::default()
            .with_api_key("sk")
            .with_model("gpt-4")
            .with_temperature(0.5)
    }

    #[test]
    fn chat_body_promotes_bare_text_and_keeps_order() {
        let request = ChatRequest::new(vec![
            MessageInput::from(Message::system("You are terse.")),
            MessageInput::from("Hello"),
            MessageInput::from(Message::assistant("Hi")),
        ]);
        let body = build_chat_body(&request, &config(), "gpt-4");
        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"},
            ])
        );
        assert_eq!(body["model"], json!("gpt-4"));
        assert_eq!(body["temperature"], json!(0.5));
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn request_overrides_beat_config_and_extra_is_merged_last() {
        let request = ChatRequest::from("Hello")
            .with_temperature(0.1)
            .with_max_tokens(64)
            .with_extra("top_p", 0.9)
            .with_extra("temperature", 0.0);
        let body = build_chat_body(&request, &config().with_max_tokens(16), "gpt-4");
        assert_eq!(body["max_tokens"], json!(64));
        assert_eq!(body["top_p"], json!(0.9));
        assert_eq!(body["temperature"], json!(0.0));
    }

    #[test]
    fn completion_body_uses_prompt_instead_of_messages() {
        let body = build_completion_body(
            &CompletionRequest::new("Complete this"),
            &config(),
            "text-davinci-003",
        );
        assert_eq!(
            body,
            json!({"model": "text-davinci-003", "prompt": "Complete this", "temperature": 0.5})
        );
    }

    #[test]
    fn legacy_detection() {
        for model in [
            "text-davinci-003",
            "davinci-002",
            "text-curie-001",
            "babbage-002",
            "ada",
            "ada-code-search-code",
            "text-ada-001",
            "gpt-3.5-turbo-instruct",
        ] {
            assert!(is_legacy_completion_model(model), "{model} should be legacy");
        }
        for model in [
            "gpt-4",
            "gpt-4o-mini",
            "gpt-3.5-turbo",
            "o1-preview",
            "adaptive-router-v1",
            "adamant-7b",
        ] {
            assert!(!is_legacy_completion_model(model), "{model} should use chat");
        }
    }
}
