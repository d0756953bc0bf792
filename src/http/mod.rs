use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LLMError;

/// HTTP methods the clients issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One fully-shaped provider call: adapters build it, a transport executes it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    /// Query parameters appended to `url` by the transport.
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// POST carrying an already-serialized JSON payload; only `Content-Type` is preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use unillm::http::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::post_json("https://example.com", br"{}".to_vec());
    /// assert_eq!(request.method, HttpMethod::Post);
    /// assert_eq!(request.headers.get("Content-Type"), Some(&"application/json".to_string()));
    /// ```
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            query: Vec::new(),
            body: Some(body),
            timeout: None,
        }
    }

    /// Builds a GET request with query parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use unillm::http::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::get("https://example.com/v1/models", [("limit", "10")]);
    /// assert_eq!(request.method, HttpMethod::Get);
    /// assert_eq!(request.query, vec![("limit".to_string(), "10".to_string())]);
    /// assert!(request.body.is_none());
    /// ```
    pub fn get<K, V>(url: impl Into<String>, query: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: HashMap::new(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            body: None,
            timeout: None,
        }
    }

    /// Replaces the request headers.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the per-request timeout the transport must honor.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status, headers and raw body of a provider reply, before any classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use unillm::http::HttpResponse;
    ///
    /// let response = HttpResponse {
    ///     status: 429,
    ///     headers: HashMap::from([("retry-after".to_string(), "3".to_string())]),
    ///     body: Vec::new(),
    /// };
    /// assert_eq!(response.header("Retry-After"), Some("3"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The seam between adapters and the network.
///
/// Adapters never see an HTTP client; tests swap in scripted transports here and the
/// default is [`ReqwestTransport`](self::reqwest::ReqwestTransport). Connection pooling,
/// TLS and redirects stay on the transport's side of this boundary.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs exactly one exchange and buffers the whole reply body.
    ///
    /// # Examples
    ///
    /// ```
    /// # use async_trait::async_trait;
    /// # use unillm::http::{HttpTransport, HttpRequest, HttpResponse};
    /// # use unillm::error::LLMError;
    /// struct MemoryTransport;
    ///
    /// #[async_trait]
    /// impl HttpTransport for MemoryTransport {
    ///     async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
    ///         Ok(HttpResponse { status: 200, headers: request.headers, body: b"ok".to_vec() })
    ///     }
    /// }
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let response = MemoryTransport
    ///     .send(HttpRequest::post_json("https://example.com", br"{}".to_vec()))
    ///     .await
    ///     .unwrap();
    /// assert_eq!(response.status, 200);
    /// # });
    /// ```
    ///
    /// # Errors
    ///
    /// Implementations map failures below the HTTP layer, timeouts included, to
    /// [`LLMError::Api`] with no status. Non-2xx responses are returned as `Ok`; classifying
    /// them is the client's job.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError>;
}

/// Thread-safe handle to a transport implementation.
pub type DynHttpTransport = Arc<dyn HttpTransport>;

pub mod reqwest;
