use serde::Deserialize;

/// Non-streaming response payload returned by the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicMessageResponse {
    /// Some compatibility layers omit the model, so keep it optional.
    #[serde(default)]
    pub(crate) model: Option<String>,
    /// Ordered list of content blocks.
    #[serde(default)]
    pub(crate) content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    pub(crate) stop_reason: Option<String>,
    #[serde(default)]
    pub(crate) usage: Option<AnthropicUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicContentBlock {
    /// Absent on non-text blocks such as `tool_use`.
    #[serde(default)]
    pub(crate) text: Option<String>,
}

/// Usage counters; Anthropic never reports a total.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicUsage {
    #[serde(default)]
    pub(crate) input_tokens: Option<u64>,
    #[serde(default)]
    pub(crate) output_tokens: Option<u64>,
}
