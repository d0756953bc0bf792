use serde_json::{Map, Value, json};

use crate::config::ClientConfig;
use crate::types::{ChatRequest, Message, Role};

/// Anthropic requires `max_tokens` on every call.
pub(crate) const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Builds the Messages API body.
///
/// The first system-role entry is lifted into the top-level `system` field. Later system
/// entries stay in `messages` where they were.
pub(crate) fn build_anthropic_body(
    request: &ChatRequest,
    config: &ClientConfig,
    model: &str,
) -> Value {
    let (system, messages) = split_system(request.formatted_messages());

    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));
    body.insert(
        "messages".to_string(),
        Value::Array(messages.iter().map(convert_message).collect()),
    );
    if let Some(system) = system {
        body.insert("system".to_string(), Value::String(system));
    }

    let max_tokens = request
        .options
        .max_tokens
        .or(config.max_tokens)
        .unwrap_or(DEFAULT_MAX_TOKENS);
    body.insert("max_tokens".to_string(), Value::from(max_tokens));
    let temperature = request.options.temperature.unwrap_or(config.temperature);
    body.insert("temperature".to_string(), Value::from(temperature));

    // top_k, stop_sequences, metadata, ...
    for (k, v) in &request.options.extra {
        body.insert(k.clone(), v.clone());
    }

    Value::Object(body)
}

pub(crate) fn split_system(messages: Vec<Message>) -> (Option<String>, Vec<Message>) {
    let mut system = None;
    let mut rest = Vec::with_capacity(messages.len());
    for message in messages {
        if system.is_none() && message.role == Role::System {
            system = Some(message.content);
        } else {
            rest.push(message);
        }
    }
    (system, rest)
}

fn convert_message(message: &Message) -> Value {
    json!({
        "role": message.role.as_str(),
        "content": message.content,
    })
}
