//! Provider-agnostic request and response shapes.
//!
//! Adapters translate these into their own JSON wire format and back, so callers never
//! see provider-specific field names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ProviderKind;

/// Conversation role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Entry of a message sequence as supplied by the caller.
///
/// A bare text value is shorthand for a user turn; adapters normalize both forms with
/// [`MessageInput::into_message`].
///
/// # Examples
///
/// ```
/// use unillm::types::{Message, MessageInput};
///
/// let bare = MessageInput::from("Hello");
/// let structured = MessageInput::from(Message::user("Hello"));
/// assert_eq!(bare.into_message(), structured.into_message());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageInput {
    Text(String),
    Message(Message),
}

impl MessageInput {
    pub fn into_message(self) -> Message {
        match self {
            MessageInput::Text(text) => Message::user(text),
            MessageInput::Message(message) => message,
        }
    }

    pub fn to_message(&self) -> Message {
        self.clone().into_message()
    }
}

impl From<&str> for MessageInput {
    fn from(value: &str) -> Self {
        MessageInput::Text(value.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(value: String) -> Self {
        MessageInput::Text(value)
    }
}

impl From<Message> for MessageInput {
    fn from(value: Message) -> Self {
        MessageInput::Message(value)
    }
}

/// Per-call overrides shared by chat and completion requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Overrides the configured sampling temperature.
    pub temperature: Option<f64>,
    /// Overrides the configured max-token cap.
    pub max_tokens: Option<u32>,
    /// Provider-specific keys (`top_p`, `top_k`, `stop_sequences`, ...) merged last into the
    /// request body. Never validated.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Adds a passthrough option.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Chat request: ordered messages plus overrides.
///
/// # Examples
///
/// ```
/// use unillm::types::{ChatRequest, Message};
///
/// let request = ChatRequest::new([Message::system("Be brief"), Message::user("Hi")])
///     .with_temperature(0.2)
///     .with_extra("top_p", 0.9);
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.options.extra["top_p"], 0.9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<MessageInput>,
    #[serde(default)]
    pub options: RequestOptions,
}

impl ChatRequest {
    pub fn new<I, M>(messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MessageInput>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.extra.insert(key.into(), value.into());
        self
    }

    /// Normalized message sequence, order preserved.
    pub fn formatted_messages(&self) -> Vec<Message> {
        self.messages.iter().map(MessageInput::to_message).collect()
    }
}

impl From<&str> for ChatRequest {
    fn from(value: &str) -> Self {
        ChatRequest::new([value])
    }
}

impl From<String> for ChatRequest {
    fn from(value: String) -> Self {
        ChatRequest::new([value])
    }
}

impl From<Vec<Message>> for ChatRequest {
    fn from(value: Vec<Message>) -> Self {
        ChatRequest::new(value)
    }
}

/// Text completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    #[serde(default)]
    pub options: RequestOptions,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Equivalent chat request: a single user turn carrying the prompt, same options.
    pub fn into_chat(self) -> ChatRequest {
        ChatRequest {
            messages: vec![MessageInput::Message(Message::user(self.prompt))],
            options: self.options,
        }
    }
}

impl From<&str> for CompletionRequest {
    fn from(value: &str) -> Self {
        CompletionRequest::new(value)
    }
}

impl From<String> for CompletionRequest {
    fn from(value: String) -> Self {
        CompletionRequest::new(value)
    }
}

/// Token accounting in the uniform shape.
///
/// Counts a provider did not report stay `None`; they are never derived as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    /// Builds usage from whatever the provider reported.
    ///
    /// When both sub-counts are known the total is their sum; otherwise the reported total
    /// (if any) is kept as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use unillm::types::TokenUsage;
    ///
    /// let usage = TokenUsage::from_counts(Some(10), Some(20), None);
    /// assert_eq!(usage.total_tokens, Some(30));
    ///
    /// let total_only = TokenUsage::from_counts(None, None, Some(42));
    /// assert_eq!(total_only.prompt_tokens, None);
    /// assert_eq!(total_only.total_tokens, Some(42));
    /// ```
    pub fn from_counts(prompt: Option<u64>, completion: Option<u64>, total: Option<u64>) -> Self {
        // An unrepresentable sum falls back to whatever the provider reported.
        let total_tokens = prompt
            .zip(completion)
            .and_then(|(p, c)| p.checked_add(c))
            .or(total);
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens,
        }
    }
}

/// Normalized result returned by `chat` and `complete` for every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    /// Always [`Role::Assistant`].
    pub role: Role,
    pub finish_reason: Option<String>,
    pub provider: ProviderKind,
    pub usage: TokenUsage,
    pub model: String,
    /// Untouched provider body.
    pub raw: Value,
}
