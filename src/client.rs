use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ClientConfig, ProviderKind};
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::LLMProvider;
use crate::provider::anthropic::AnthropicProvider;
use crate::provider::openai::OpenAiProvider;
use crate::types::{ChatRequest, ChatResponse, CompletionRequest};

/// Entry point: one closed set of provider adapters behind the [`LLMProvider`] interface.
///
/// # Examples
///
/// ```
/// use unillm::{ClientConfig, LLMClient, LLMProvider, ProviderKind};
///
/// let config = ClientConfig::default()
///     .with_openai_api_key("sk-test")
///     .with_model("gpt-4");
/// let client = LLMClient::new(ProviderKind::OpenAi, config).expect("valid config");
/// assert_eq!(client.kind(), ProviderKind::OpenAi);
///
/// let err = LLMClient::new(ProviderKind::Anthropic, unillm::ClientConfig::default());
/// assert!(err.is_err());
/// ```
pub enum LLMClient {
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
}

impl LLMClient {
    /// Builds and validates the adapter for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when `config` lacks what `provider` requires.
    pub fn new(
        provider: ProviderKind,
        config: impl Into<Arc<ClientConfig>>,
    ) -> Result<Self, LLMError> {
        let config = config.into();
        Ok(match provider {
            ProviderKind::OpenAi => LLMClient::OpenAi(OpenAiProvider::new(config)?),
            ProviderKind::Anthropic => LLMClient::Anthropic(AnthropicProvider::new(config)?),
        })
    }

    /// Same as [`LLMClient::new`], sending every call through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when `config` lacks what `provider` requires.
    pub fn with_transport(
        provider: ProviderKind,
        config: impl Into<Arc<ClientConfig>>,
        transport: DynHttpTransport,
    ) -> Result<Self, LLMError> {
        let config = config.into();
        Ok(match provider {
            ProviderKind::OpenAi => {
                LLMClient::OpenAi(OpenAiProvider::with_transport(config, transport)?)
            }
            ProviderKind::Anthropic => {
                LLMClient::Anthropic(AnthropicProvider::with_transport(config, transport)?)
            }
        })
    }

    fn inner(&self) -> &dyn LLMProvider {
        match self {
            LLMClient::OpenAi(provider) => provider,
            LLMClient::Anthropic(provider) => provider,
        }
    }
}

#[async_trait]
impl LLMProvider for LLMClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        self.inner().chat(request).await
    }

    async fn complete(&self, request: CompletionRequest) -> Result<ChatResponse, LLMError> {
        self.inner().complete(request).await
    }

    async fn models(&self) -> Result<Vec<String>, LLMError> {
        self.inner().models().await
    }

    fn kind(&self) -> ProviderKind {
        self.inner().kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dispatches_on_provider_kind() {
        let config = Arc::new(
            ClientConfig::default()
                .with_api_key("sk-any")
                .with_model("some-model"),
        );
        let openai = LLMClient::new(ProviderKind::OpenAi, config.clone()).expect("openai");
        let anthropic = LLMClient::new(ProviderKind::Anthropic, config).expect("anthropic");
        assert!(matches!(openai, LLMClient::OpenAi(_)));
        assert!(matches!(anthropic, LLMClient::Anthropic(_)));
        assert_eq!(anthropic.kind(), ProviderKind::Anthropic);
    }

    #[test]
    fn invalid_config_is_rejected_per_provider() {
        let config = ClientConfig::default()
            .with_openai_api_key("sk-openai")
            .with_model("gpt-4");
        let err = LLMClient::new(ProviderKind::Anthropic, config)
            .err()
            .expect("should fail");
        assert_eq!(
            err.to_string(),
            "configuration error: Anthropic API key is required"
        );
    }
}
