use std::time::Duration;

use thiserror::Error;

/// Closed set of failures surfaced by every client and adapter.
///
/// The four runtime kinds (`Configuration`, `Authentication`, `RateLimit`, `Api`) describe
/// what went wrong with a call; `NotImplemented` marks a programmer error and never comes
/// from the network.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Missing or invalid client configuration. Raised at construction, never at call time.
    #[error("configuration error: {message}")]
    Configuration { message: String },
    /// The provider rejected the credentials (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },
    /// The provider throttled the request (HTTP 429).
    #[error("rate limited: {message}")]
    RateLimit {
        /// Raw message returned by the upstream provider.
        message: String,
        /// Wait duration suggested through `Retry-After`, if the provider sent one.
        retry_after: Option<Duration>,
    },
    /// Any other failed call: non-2xx statuses, undecodable bodies, transport failures and
    /// timeouts. `status` is `None` when no HTTP response was received.
    #[error("{}", format_api_error(.status, .message))]
    Api {
        status: Option<u16>,
        message: String,
    },
    /// An operation the concrete client never overrode.
    #[error("not implemented: {feature}")]
    NotImplemented { feature: &'static str },
}

impl LLMError {
    /// Creates an [`LLMError::Configuration`].
    ///
    /// # Examples
    ///
    /// ```
    /// use unillm::error::LLMError;
    ///
    /// let err = LLMError::configuration("OpenAI API key is required");
    /// assert!(matches!(err, LLMError::Configuration { .. }));
    /// ```
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an [`LLMError::Api`] carrying an optional HTTP status.
    ///
    /// # Examples
    ///
    /// ```
    /// use unillm::error::LLMError;
    ///
    /// let err = LLMError::api(Some(500), "upstream exploded");
    /// assert_eq!(err.to_string(), "API error (status 500): upstream exploded");
    /// ```
    pub fn api<T: Into<String>>(status: Option<u16>, message: T) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an [`LLMError::Api`] for failures below the HTTP layer (DNS, TLS, timeouts).
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::api(None, message)
    }

    /// HTTP status associated with the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::RateLimit { .. } => Some(429),
            Self::Api { status, .. } => *status,
            Self::Configuration { .. } | Self::NotImplemented { .. } => None,
        }
    }
}

fn format_api_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("API error (status {status}): {message}"),
        None => format!("API error: {message}"),
    }
}
