use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ProviderKind;
use crate::error::LLMError;
use crate::types::{ChatResponse, Role, TokenUsage};

use super::types::{OpenAiCompletionResponse, OpenAiModelList, OpenAiUsage};

/// Unwraps a chat or legacy completion body into the uniform shape.
///
/// `choices[0].message.content` is used when present, `choices[0].text` otherwise.
pub(crate) fn map_response(body: Value, fallback_model: &str) -> Result<ChatResponse, LLMError> {
    let resp: OpenAiCompletionResponse = parse(&body)?;
    let choice = resp
        .choices
        .first()
        .ok_or_else(|| LLMError::api(None, "OpenAI response contained no choices"))?;
    let content = choice
        .message
        .as_ref()
        .and_then(|message| message.content.clone())
        .or_else(|| choice.text.clone())
        .unwrap_or_default();

    Ok(ChatResponse {
        content,
        role: Role::Assistant,
        finish_reason: choice.finish_reason.clone(),
        provider: ProviderKind::OpenAi,
        usage: resp.usage.map(convert_usage).unwrap_or_default(),
        model: resp.model.unwrap_or_else(|| fallback_model.to_string()),
        raw: body,
    })
}

pub(crate) fn map_model_list(body: Value) -> Result<Vec<String>, LLMError> {
    let list: OpenAiModelList = parse(&body)?;
    Ok(list.data.into_iter().map(|model| model.id).collect())
}

pub(crate) fn convert_usage(usage: OpenAiUsage) -> TokenUsage {
    TokenUsage::from_counts(
        usage.prompt_tokens,
        usage.completion_tokens,
        usage.total_tokens,
    )
}

fn parse<T: DeserializeOwned>(body: &Value) -> Result<T, LLMError> {
    T::deserialize(body)
        .map_err(|err| LLMError::api(None, format!("failed to parse OpenAI response: {err}")))
}
