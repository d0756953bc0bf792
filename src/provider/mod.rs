use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderKind;
use crate::error::LLMError;
use crate::types::{ChatRequest, ChatResponse, CompletionRequest};

pub mod anthropic;
pub mod base;
pub mod openai;

pub use base::BaseClient;

/// Uniform contract every provider adapter implements.
///
/// Only [`LLMProvider::kind`] is mandatory so partially built adapters still compile, but an
/// adapter that forgets to override [`LLMProvider::chat`] fails every call with
/// [`LLMError::NotImplemented`] instead of silently doing nothing.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Sends a chat request and waits for the full response.
    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, LLMError> {
        Err(LLMError::NotImplemented { feature: "chat" })
    }

    /// Text completion. Defaults to [`LLMProvider::chat`] with a single user message.
    async fn complete(&self, request: CompletionRequest) -> Result<ChatResponse, LLMError> {
        self.chat(request.into_chat()).await
    }

    /// Model identifiers the provider exposes.
    async fn models(&self) -> Result<Vec<String>, LLMError> {
        Err(LLMError::NotImplemented { feature: "models" })
    }

    /// Provider family.
    fn kind(&self) -> ProviderKind;
}

/// Thread-safe provider handle.
pub type DynProvider = Arc<dyn LLMProvider>;
