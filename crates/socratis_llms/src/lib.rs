//! socratis_llms: streaming multimodal completions behind one trait.
//!
//! Every backend implements [`Provider`]: `stream` yields text deltas and a
//! final finish event. [`GeminiProvider`] talks to the Gemini SSE endpoint;
//! [`ScriptedProvider`] and [`EchoProvider`] run offline.
//!
//! ```rust,no_run
//! use socratis_llms::{EchoProvider, GeminiProvider, ProviderRegistry};
//!
//! # fn main() -> socratis_llms::Result<()> {
//! let registry = ProviderRegistry::new()
//!     .with(GeminiProvider::from_env()?)
//!     .with(EchoProvider::new());
//! let gemini = registry.get("gemini")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;


pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

pub use providers::{EchoProvider, GeminiProvider, ScriptedProvider};

pub use types::{
    Content, FinishReason, GenerateRequest, GenerateResponse, GenerateStream, Part, Role,
    StreamEvent, Usage,
};
