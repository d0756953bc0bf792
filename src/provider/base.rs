use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::{ClientConfig, ProviderKind, validate};
use crate::error::LLMError;
use crate::http::reqwest::default_dyn_transport;
use crate::http::{DynHttpTransport, HttpMethod, HttpRequest, HttpResponse};
use crate::response::{ErrorMessageExtractor, handle_http_response};

/// Value sent in the `User-Agent` header.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a transport on first use.
pub type TransportFactory = Arc<dyn Fn() -> Result<DynHttpTransport, LLMError> + Send + Sync>;

/// State and plumbing shared by every adapter.
///
/// Holds the validated configuration and a transport handle created at most once, even
/// when several calls race to use it first. Nothing here changes between calls.
pub struct BaseClient {
    config: Arc<ClientConfig>,
    provider: ProviderKind,
    transport: OnceCell<DynHttpTransport>,
    /// `None` when the transport was supplied at construction.
    factory: Option<TransportFactory>,
}

impl BaseClient {
    /// Validates `config` for `provider`; the default reqwest transport is built lazily.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when validation fails.
    pub fn new(config: Arc<ClientConfig>, provider: ProviderKind) -> Result<Self, LLMError> {
        Self::with_transport_factory(config, provider, Arc::new(default_dyn_transport))
    }

    /// Validates `config` and uses `transport` for every call.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when validation fails.
    pub fn with_transport(
        config: Arc<ClientConfig>,
        provider: ProviderKind,
        transport: DynHttpTransport,
    ) -> Result<Self, LLMError> {
        validate(&config, provider)?;
        Ok(Self {
            config,
            provider,
            transport: OnceCell::new_with(Some(transport)),
            factory: None,
        })
    }

    /// Validates `config`; `factory` runs once, on the first call that needs a transport.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Configuration`] when validation fails.
    pub fn with_transport_factory(
        config: Arc<ClientConfig>,
        provider: ProviderKind,
        factory: TransportFactory,
    ) -> Result<Self, LLMError> {
        validate(&config, provider)?;
        Ok(Self {
            config,
            provider,
            transport: OnceCell::new(),
            factory: Some(factory),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Credential resolved for this provider. Never empty after construction.
    pub fn api_key(&self) -> &str {
        self.config.api_key_for(self.provider).unwrap_or_default()
    }

    /// Configured model. Never empty after construction.
    pub fn model(&self) -> &str {
        self.config.model().unwrap_or_default()
    }

    /// Headers sent with every request; adapters add their auth headers on top.
    pub fn build_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ])
    }

    async fn transport(&self) -> Result<&DynHttpTransport, LLMError> {
        self.transport
            .get_or_try_init(|| async {
                match &self.factory {
                    Some(factory) => factory(),
                    None => default_dyn_transport(),
                }
            })
            .await
    }

    /// Serializes `body` and POSTs it once.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Api`] if serialization fails, otherwise whatever the transport
    /// returns.
    pub async fn post_json<T: Serialize>(
        &self,
        url: impl Into<String>,
        body: &T,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, LLMError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| LLMError::api(None, format!("failed to serialize request: {err}")))?;
        let request = HttpRequest::post_json(url, payload).with_headers(headers);
        self.send(request).await
    }

    /// Issues a single GET with `query`.
    ///
    /// # Errors
    ///
    /// Forwards transport failures.
    pub async fn get(
        &self,
        url: impl Into<String>,
        query: &[(&str, &str)],
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, LLMError> {
        let request = HttpRequest::get(url, query.iter().copied()).with_headers(headers);
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
        let request = request.with_timeout(self.config.timeout());
        let method = match request.method {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        debug!(
            provider = self.provider.tag(),
            method,
            url = %request.url,
            "sending provider request"
        );
        let transport = self.transport().await?;
        transport.send(request).await
    }

    /// Decodes and classifies a provider response.
    ///
    /// # Errors
    ///
    /// See [`crate::response::classify`].
    pub fn handle_response(
        &self,
        response: HttpResponse,
        extract: ErrorMessageExtractor,
    ) -> Result<Value, LLMError> {
        handle_http_response(response, extract)
    }
}
