//! Uniform chat/completion client over multiple LLM provider HTTP APIs.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod response;
pub mod types;

pub use client::LLMClient;
pub use config::{ClientConfig, ProviderKind};
pub use error::LLMError;
pub use provider::{DynProvider, LLMProvider};
pub use types::*;
