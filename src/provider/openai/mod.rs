//! OpenAI-style adapter: chat completions, the legacy text-completions endpoint, and the
//! model listing.

mod error;
mod provider;
mod request;
mod response;
mod types;

pub use provider::OpenAiProvider;
pub use request::is_legacy_completion_model;
