use serde::Deserialize;
use serde_json::Value;

use crate::config::ProviderKind;
use crate::error::LLMError;
use crate::types::{ChatResponse, Role, TokenUsage};

use super::types::{AnthropicMessageResponse, AnthropicUsage};

pub(crate) fn map_response(body: Value, fallback_model: &str) -> Result<ChatResponse, LLMError> {
    let resp = AnthropicMessageResponse::deserialize(&body).map_err(|err| {
        LLMError::api(None, format!("failed to parse Anthropic response: {err}"))
    })?;
    let content = resp
        .content
        .first()
        .and_then(|block| block.text.clone())
        .unwrap_or_default();

    Ok(ChatResponse {
        content,
        role: Role::Assistant,
        finish_reason: resp.stop_reason,
        provider: ProviderKind::Anthropic,
        usage: resp.usage.as_ref().map(convert_usage).unwrap_or_default(),
        model: resp.model.unwrap_or_else(|| fallback_model.to_string()),
        raw: body,
    })
}

/// Total is computed locally from input + output.
pub(crate) fn convert_usage(usage: &AnthropicUsage) -> TokenUsage {
    TokenUsage::from_counts(usage.input_tokens, usage.output_tokens, None)
}
