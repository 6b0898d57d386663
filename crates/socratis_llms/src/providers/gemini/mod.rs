//! Gemini provider module
//!
//! Streams `models/{model}:streamGenerateContent?alt=sse` from the Generative
//! Language API. Images travel as base64 `inlineData` parts.

mod convert;
mod provider;
mod stream;
mod types;

pub use provider::GeminiProvider;
pub use types::{GeminiConfig, GeminiRequest, GeminiStreamChunk};
