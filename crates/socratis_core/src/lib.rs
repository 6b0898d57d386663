pub mod content;
pub mod error;
pub mod event;
pub mod export;
pub mod message;
pub mod transcript;

pub use content::{ContentBlock, InlineSpan, parse};
pub use error::{CoreError, Result, TranscriptError};
pub use event::ChatEvent;
pub use message::{ImageAttachment, Message, MessageId, Role};
pub use transcript::{Transcript, TranscriptSnapshot};
