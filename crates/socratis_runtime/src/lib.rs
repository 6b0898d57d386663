//! Socratis runtime: owns the chat session and drives model turns.
//!
//! A turn flows one way: [`ChatSession::submit`] appends the user message and
//! returns a [`TurnRequest`]; [`Runtime::drive_turn`] streams the reply and
//! emits [`ChatEvent`]s into an [`EventSink`]; the session applies them.
//!
//! [`ChatEvent`]: socratis_core::ChatEvent

pub mod assembler;
pub mod attachment;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod sink;

pub use assembler::{AssemblyOutcome, Pull, StreamAssembler};
pub use attachment::{load_image, parse_image_arg};
pub use classify::{FailureKind, TurnFailure};
pub use config::{ProviderKind, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use runtime::{Runtime, TurnOutcome};
pub use session::{ChatSession, TurnRequest};
pub use sink::EventSink;
