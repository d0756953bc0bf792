use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ClientConfig, ProviderKind};
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::{BaseClient, LLMProvider};
use crate::types::{ChatRequest, ChatResponse};

use super::error::extract_anthropic_error;
use super::request::build_anthropic_body;
use super::response::map_response;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Models returned by [`AnthropicProvider::models`]; the API has no listing endpoint.
pub const KNOWN_MODELS: [&str; 5] = [
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

/// Anthropic Messages adapter.
pub struct AnthropicProvider {
    base: BaseClient,
}

impl AnthropicProvider {
    /// Validates `config`; the default reqwest transport is created on first use.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when no Anthropic credential or model is
    /// configured.
    pub fn new(config: impl Into<Arc<ClientConfig>>) -> Result<Self, LLMError> {
        Ok(Self {
            base: BaseClient::new(config.into(), ProviderKind::Anthropic)?,
        })
    }

    /// Same as [`AnthropicProvider::new`] with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when no Anthropic credential or model is
    /// configured.
    pub fn with_transport(
        config: impl Into<Arc<ClientConfig>>,
        transport: DynHttpTransport,
    ) -> Result<Self, LLMError> {
        Ok(Self {
            base: BaseClient::with_transport(config.into(), ProviderKind::Anthropic, transport)?,
        })
    }

    pub fn base(&self) -> &BaseClient {
        &self.base
    }

    pub(crate) fn endpoint(&self) -> String {
        let base = self
            .base
            .config()
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/messages")
        } else {
            format!("{base}/v1/messages")
        }
    }

    /// Base headers plus credentials and the pinned `anthropic-version`.
    pub fn build_headers(&self) -> HashMap<String, String> {
        let api_key = self.base.api_key();
        let mut headers = self.base.build_headers();
        headers.insert("x-api-key".to_string(), api_key.to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {api_key}"));
        headers.insert("anthropic-version".to_string(), API_VERSION.to_string());
        headers
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let model = self.base.model();
        let body = build_anthropic_body(&request, self.base.config(), model);
        let response = self
            .base
            .post_json(self.endpoint(), &body, self.build_headers())
            .await?;
        let body = self.base.handle_response(response, extract_anthropic_error)?;
        map_response(body, model)
    }

    async fn models(&self) -> Result<Vec<String>, LLMError> {
        Ok(KNOWN_MODELS.iter().map(|model| model.to_string()).collect())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::reqwest::default_dyn_transport;

    fn provider() -> AnthropicProvider {
        let config = ClientConfig::default()
            .with_api_key("sk-generic")
            .with_model("claude-3-5-sonnet-20241022");
        AnthropicProvider::with_transport(config, default_dyn_transport().expect("transport"))
            .expect("provider")
    }

    #[test]
    fn headers_carry_auth_and_version() {
        let provider = provider();
        let headers = provider.build_headers();
        assert_eq!(headers["anthropic-version"], "2023-06-01");
        assert_eq!(headers["x-api-key"], "sk-generic");
        assert_eq!(headers["Authorization"], "Bearer sk-generic");
        assert_eq!(headers["Content-Type"], "application/json");
        assert!(headers.contains_key("User-Agent"));
    }

    #[test]
    fn endpoint_is_the_messages_api() {
        assert_eq!(provider().endpoint(), "https://api.anthropic.com/v1/messages");
    }

    #[tokio::test]
    async fn models_is_a_fixed_list() {
        let models = provider().models().await.expect("models");
        for expected in [
            "claude-3-opus-20240229",
            "claude-3-sonnet-20240229",
            "claude-3-haiku-20240307",
            "claude-3-5-sonnet-20241022",
        ] {
            assert!(models.iter().any(|m| m == expected), "{expected} missing");
        }
    }
}
