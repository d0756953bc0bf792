use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use tracing::warn;

use crate::error::LLMError;

use super::{DynHttpTransport, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// [`HttpTransport`] backed by a shared reqwest [`Client`].
///
/// The client pools connections, so one transport is meant to serve every call an adapter
/// makes. Timeouts are taken from each [`HttpRequest`], not from the client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps a caller-configured reqwest client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a transport on a client with reqwest's default settings.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Api`] without a status if the TLS backend cannot be initialised.
    pub fn default_client() -> Result<Self, LLMError> {
        Client::builder()
            .build()
            .map(Self::new)
            .map_err(|err| LLMError::transport(format!("failed to create reqwest client: {err}")))
    }

    fn to_header_map(headers: HashMap<String, String>) -> Result<HeaderMap, LLMError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| LLMError::transport(format!("invalid header name {name:?}: {err}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|err| LLMError::transport(format!("invalid value for header {name}: {err}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    fn build_request(&self, request: HttpRequest) -> Result<RequestBuilder, LLMError> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
            timeout,
        } = request;

        let method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self
            .client
            .request(method, url)
            .headers(Self::to_header_map(headers)?);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder)
    }

    /// Non-UTF-8 header values are dropped; nothing downstream reads binary headers.
    fn from_header_map(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect()
    }

    fn map_error(err: reqwest::Error) -> LLMError {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response body: {err}")
        } else {
            err.to_string()
        };
        warn!(url = ?err.url().map(|url| url.as_str()), %message, "transport failure");
        LLMError::transport(message)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(Self::map_error)?;

        let status = response.status().as_u16();
        let headers = Self::from_header_map(response.headers());
        let body = response.bytes().await.map_err(Self::map_error)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builds the transport adapters fall back to when none is supplied.
pub fn default_dyn_transport() -> Result<DynHttpTransport, LLMError> {
    Ok(Arc::new(ReqwestTransport::default_client()?))
}
