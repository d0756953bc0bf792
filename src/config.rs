use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LLMError;

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Provider family backing a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
        }
    }

    /// Short tag used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Client configuration, owned by the caller and read-only to clients.
///
/// Every field is optional on the wire so the struct can be deserialized from partial
/// sources; [`validate`] decides what a given provider actually needs.
///
/// # Examples
///
/// ```
/// use unillm::config::{ClientConfig, ProviderKind, validate};
///
/// let config = ClientConfig::default()
///     .with_anthropic_api_key("sk-ant-test")
///     .with_model("claude-3-5-sonnet-20241022");
/// assert!(validate(&config, ProviderKind::Anthropic).is_ok());
/// assert!(validate(&config, ProviderKind::OpenAi).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Generic key accepted by every provider.
    pub api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    /// Optional `OpenAI-Organization` header value.
    pub openai_organization: Option<String>,
    pub model: Option<String>,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    /// Per-request timeout in milliseconds. Must be non-zero.
    pub timeout_ms: u64,
    /// Overrides the provider's default API origin (proxies, compatible gateways).
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_organization: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    pub fn with_openai_organization(mut self, organization: impl Into<String>) -> Self {
        self.openai_organization = Some(organization.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sub-millisecond remainders are dropped; a zero result fails [`validate`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Credential for `provider`: the provider-specific key wins over the generic one.
    /// Blank values are treated as absent.
    pub fn api_key_for(&self, provider: ProviderKind) -> Option<&str> {
        let named = match provider {
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
        };
        non_blank(named).or_else(|| non_blank(self.api_key.as_deref()))
    }

    /// Configured model identifier, if any.
    pub fn model(&self) -> Option<&str> {
        non_blank(self.model.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks that `config` carries what `provider` requires: a credential and a model.
///
/// # Errors
///
/// Returns [`LLMError::Configuration`] naming the provider when no credential is usable,
/// when the model identifier is missing, or when the timeout is zero.
pub fn validate(config: &ClientConfig, provider: ProviderKind) -> Result<(), LLMError> {
    if config.api_key_for(provider).is_none() {
        return Err(LLMError::configuration(format!(
            "{} API key is required",
            provider.display_name()
        )));
    }
    if config.model().is_none() {
        return Err(LLMError::configuration(format!(
            "model is required for {}",
            provider.display_name()
        )));
    }
    if config.timeout_ms == 0 {
        return Err(LLMError::configuration("timeout must be greater than zero"));
    }
    Ok(())
}
