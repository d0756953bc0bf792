#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use unillm::error::LLMError;
use unillm::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// In-memory transport that records every request and replays queued responses.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response.
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_with_headers(status, body, &[])
    }

    pub fn respond_with_headers(self, status: u16, body: Value, headers: &[(&str, &str)]) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(HttpResponse {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>(),
                body: serde_json::to_vec(&body).expect("body should serialize"),
            });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    /// Single recorded request, decoded.
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        RecordedRequest::from(requests.into_iter().next().expect("one request"))
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| LLMError::transport("no response queued"))
    }
}

pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl From<HttpRequest> for RecordedRequest {
    fn from(request: HttpRequest) -> Self {
        let body = request
            .body
            .as_deref()
            .map(|bytes| serde_json::from_slice(bytes).expect("request body should be JSON"))
            .unwrap_or(Value::Null);
        Self {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
        }
    }
}
