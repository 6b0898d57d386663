//! The single owner of the transcript.
//!
//! All mutation goes through [`ChatSession`]: [`submit`](ChatSession::submit)
//! starts a turn and [`apply`](ChatSession::apply) folds the turn's events
//! back in. The busy flag guarantees at most one reply is in flight.

use async_trait::async_trait;
use socratis_core::{
    ChatEvent, ImageAttachment, Message, MessageId, Role, Transcript, TranscriptSnapshot,
};
use tracing::{debug, error, info, warn};

use crate::classify::TurnFailure;
use crate::error::{Result, RuntimeError};
use crate::prompt::WELCOME_MESSAGE;
use crate::runtime::{Runtime, TurnOutcome};
use crate::sink::EventSink;

/// Everything a turn driver needs, captured at submit time.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// Id the reply will be created under.
    pub reply_id: MessageId,
    /// Messages before the new user message.
    pub history: Vec<Message>,
    pub user: Message,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Transcript,
    busy: bool,
    in_flight: Option<MessageId>,
    last_failure: Option<TurnFailure>,
}

impl ChatSession {
    /// A session opened with the tutor's welcome message.
    pub fn new() -> Self {
        let mut session = Self::empty();
        session
            .transcript
            .append(Message::model(WELCOME_MESSAGE))
            .unwrap_or_else(|e| error!(error = %e, "failed to seed welcome message"));
        session
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        self.transcript.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn in_flight(&self) -> Option<&MessageId> {
        self.in_flight.as_ref()
    }

    pub fn last_failure(&self) -> Option<&TurnFailure> {
        self.last_failure.as_ref()
    }

    pub fn clear_failure(&mut self) {
        self.last_failure = None;
    }

    /// True while a reply is pending and has no text yet.
    pub fn is_thinking(&self) -> bool {
        match &self.in_flight {
            Some(id) if self.busy => self
                .transcript
                .get(id)
                .is_none_or(|msg| msg.text.is_empty()),
            _ => false,
        }
    }

    /// Starts a turn. Rejected without any change while a reply is streaming,
    /// or when there is neither text nor an image to send.
    pub fn submit(&mut self, text: &str, images: Vec<ImageAttachment>) -> Result<TurnRequest> {
        if self.busy {
            debug!("submit rejected: busy");
            return Err(RuntimeError::Busy);
        }
        let text = text.trim();
        if text.is_empty() && images.is_empty() {
            return Err(RuntimeError::EmptySubmission);
        }

        let history: Vec<Message> = self.transcript.iter().cloned().collect();
        let user = Message::user(text).with_images(images);
        self.transcript.append(user.clone())?;

        let reply_id = MessageId::new();
        self.busy = true;
        self.in_flight = Some(reply_id.clone());
        self.last_failure = None;

        info!(
            message.id = %user.id,
            images = user.images.len(),
            history = history.len(),
            "turn submitted"
        );
        Ok(TurnRequest {
            reply_id,
            history,
            user,
        })
    }

    /// Applies one event from a turn driver. Only the reply in flight may
    /// change: an update aimed at any other message is logged and returned
    /// as an error, and a stale end or failure is ignored.
    pub fn apply(&mut self, event: ChatEvent) -> Result<()> {
        match event {
            ChatEvent::TurnStart { message_id } => {
                if !self.is_in_flight(&message_id) {
                    warn!(message.id = %message_id, "ignoring start of a turn that is not in flight");
                    return Ok(());
                }
                self.transcript
                    .append(Message::new(message_id, Role::Model, ""))?;
            }
            ChatEvent::TextUpdated { message_id, text } => {
                if !self.is_in_flight(&message_id) {
                    error!(message.id = %message_id, "text update for a message not in flight");
                    return Err(RuntimeError::NotInFlight(message_id));
                }
                if let Err(e) = self.transcript.update_text(&message_id, text) {
                    error!(message.id = %message_id, error = %e, "text update for unknown message");
                    return Err(e.into());
                }
            }
            ChatEvent::TurnEnd { message_id } => {
                if !self.is_in_flight(&message_id) {
                    warn!(message.id = %message_id, "ignoring end of a turn that is not in flight");
                    return Ok(());
                }
                debug!(message.id = %message_id, "turn ended");
                self.finish_turn();
            }
            ChatEvent::TurnFailed { message_id, error } => {
                if let Some(id) = &message_id
                    && !self.is_in_flight(id)
                {
                    warn!(message.id = %id, "ignoring failure of a turn that is not in flight");
                    return Ok(());
                }
                if !self.busy {
                    warn!("ignoring failure with no turn in flight");
                    return Ok(());
                }
                let failure = TurnFailure::from_raw(error);
                warn!(
                    message.id = message_id.as_ref().map(MessageId::as_str),
                    kind = ?failure.kind,
                    detail = %failure.detail,
                    "turn failed"
                );
                self.last_failure = Some(failure);
                self.finish_turn();
            }
        }
        Ok(())
    }

    /// Runs a whole turn inline: submit, stream, apply.
    pub async fn send(
        &mut self,
        runtime: &Runtime,
        text: &str,
        images: Vec<ImageAttachment>,
    ) -> Result<TurnOutcome> {
        let request = self.submit(text, images)?;
        runtime.drive_turn(request, self).await
    }

    fn is_in_flight(&self, id: &MessageId) -> bool {
        self.busy && self.in_flight.as_ref() == Some(id)
    }

    fn finish_turn(&mut self) {
        self.busy = false;
        self.in_flight = None;
    }
}

#[async_trait]
impl EventSink for ChatSession {
    async fn emit(&mut self, event: ChatEvent) -> Result<()> {
        self.apply(event)
    }
}
