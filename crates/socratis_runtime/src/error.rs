//! Runtime error types

use socratis_core::{MessageId, TranscriptError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("A response is still streaming")]
    Busy,

    #[error("Nothing to send: message has no text and no images")]
    EmptySubmission,

    #[error("Message {0} is not the reply in flight")]
    NotInFlight(MessageId),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("LLM error: {0}")]
    Provider(#[from] socratis_llms::Error),

    #[error("Attachment error: {0}")]
    Attachment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event channel closed")]
    ChannelClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
