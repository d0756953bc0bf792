use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{ClientConfig, ProviderKind};
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::{BaseClient, LLMProvider};
use crate::types::{ChatRequest, ChatResponse, CompletionRequest};

use super::error::extract_openai_error;
use super::request::{build_chat_body, build_completion_body, is_legacy_completion_model};
use super::response::{map_model_list, map_response};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-style adapter.
pub struct OpenAiProvider {
    base: BaseClient,
}

impl OpenAiProvider {
    /// Validates `config`; the default reqwest transport is created on first use.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when no OpenAI credential or model is configured.
    pub fn new(config: impl Into<Arc<ClientConfig>>) -> Result<Self, LLMError> {
        Ok(Self {
            base: BaseClient::new(config.into(), ProviderKind::OpenAi)?,
        })
    }

    /// Same as [`OpenAiProvider::new`] with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when no OpenAI credential or model is configured.
    pub fn with_transport(
        config: impl Into<Arc<ClientConfig>>,
        transport: DynHttpTransport,
    ) -> Result<Self, LLMError> {
        Ok(Self {
            base: BaseClient::with_transport(config.into(), ProviderKind::OpenAi, transport)?,
        })
    }

    pub fn base(&self) -> &BaseClient {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        let base = self
            .base
            .config()
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/{path}")
        } else {
            format!("{base}/v1/{path}")
        }
    }

    pub(crate) fn chat_endpoint(&self) -> String {
        self.url("chat/completions")
    }

    pub(crate) fn completions_endpoint(&self) -> String {
        self.url("completions")
    }

    pub(crate) fn models_endpoint(&self) -> String {
        self.url("models")
    }

    /// Base headers plus bearer auth and the optional organization header.
    pub fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = self.base.build_headers();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.base.api_key()),
        );
        if let Some(org) = &self.base.config().openai_organization {
            headers.insert("OpenAI-Organization".to_string(), org.clone());
        }
        headers
    }
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let model = self.base.model();
        let body = build_chat_body(&request, self.base.config(), model);
        let response = self
            .base
            .post_json(self.chat_endpoint(), &body, self.build_headers())
            .await?;
        let body = self.base.handle_response(response, extract_openai_error)?;
        map_response(body, model)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<ChatResponse, LLMError> {
        let model = self.base.model();
        if !is_legacy_completion_model(model) {
            return self.chat(request.into_chat()).await;
        }
        debug!(model, "using legacy completions endpoint");
        let body = build_completion_body(&request, self.base.config(), model);
        let response = self
            .base
            .post_json(self.completions_endpoint(), &body, self.build_headers())
            .await?;
        let body = self.base.handle_response(response, extract_openai_error)?;
        map_response(body, model)
    }

    async fn models(&self) -> Result<Vec<String>, LLMError> {
        let response = self
            .base
            .get(self.models_endpoint(), &[], self.build_headers())
            .await?;
        let body = self.base.handle_response(response, extract_openai_error)?;
        map_model_list(body)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }
}
