//! Anthropic-style adapter over the Messages API.

mod error;
mod provider;
mod request;
mod response;
mod types;

pub use provider::{AnthropicProvider, KNOWN_MODELS};
