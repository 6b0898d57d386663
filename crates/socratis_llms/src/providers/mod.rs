pub mod gemini;
pub mod scripted;

pub use gemini::GeminiProvider;
pub use scripted::{EchoProvider, ScriptedProvider};
