use serde::{Deserialize, Serialize};

use crate::message::MessageId;

/// Events emitted by a running turn and applied by the transcript owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    TurnStart { message_id: MessageId },

    /// Carries the full accumulated text, not the delta.
    TextUpdated { message_id: MessageId, text: String },

    TurnEnd { message_id: MessageId },

    TurnFailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<MessageId>,
        error: String,
    },
}

impl ChatEvent {
    pub fn turn_start(message_id: MessageId) -> Self {
        ChatEvent::TurnStart { message_id }
    }

    pub fn text_updated(message_id: MessageId, text: impl Into<String>) -> Self {
        ChatEvent::TextUpdated {
            message_id,
            text: text.into(),
        }
    }

    pub fn turn_end(message_id: MessageId) -> Self {
        ChatEvent::TurnEnd { message_id }
    }

    pub fn turn_failed(message_id: Option<MessageId>, error: impl Into<String>) -> Self {
        ChatEvent::TurnFailed {
            message_id,
            error: error.into(),
        }
    }

    pub fn message_id(&self) -> Option<&MessageId> {
        match self {
            ChatEvent::TurnStart { message_id }
            | ChatEvent::TextUpdated { message_id, .. }
            | ChatEvent::TurnEnd { message_id } => Some(message_id),
            ChatEvent::TurnFailed { message_id, .. } => message_id.as_ref(),
        }
    }
}
