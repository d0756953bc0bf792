use serde::Deserialize;

/// Body shared by `/v1/chat/completions` and `/v1/completions`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiCompletionResponse {
    #[serde(default)]
    pub(crate) model: Option<String>,
    #[serde(default)]
    pub(crate) choices: Vec<OpenAiChoice>,
    #[serde(default)]
    pub(crate) usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiChoice {
    /// Chat shape.
    #[serde(default)]
    pub(crate) message: Option<OpenAiResponseMessage>,
    /// Legacy completion shape.
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiResponseMessage {
    /// `null` when the assistant only emitted tool calls.
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiUsage {
    #[serde(default)]
    pub(crate) prompt_tokens: Option<u64>,
    #[serde(default)]
    pub(crate) completion_tokens: Option<u64>,
    #[serde(default)]
    pub(crate) total_tokens: Option<u64>,
}

/// `/v1/models` listing.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiModelList {
    #[serde(default)]
    pub(crate) data: Vec<OpenAiModel>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiModel {
    pub(crate) id: String,
}
