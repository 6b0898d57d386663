//! Ordered, append-only message log.
//!
//! The only mutation after append is [`Transcript::update_text`], used while a
//! reply is streaming. Messages are `Arc`-shared so a [`TranscriptSnapshot`]
//! taken earlier never observes later edits.

use std::sync::Arc;

use crate::error::TranscriptError;
use crate::message::{Message, MessageId};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Arc<Message>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) -> Result<(), TranscriptError> {
        if self.position(&message.id).is_some() {
            return Err(TranscriptError::DuplicateId(message.id));
        }
        self.messages.push(Arc::new(message));
        Ok(())
    }

    /// Replaces the full text of the message with `id`.
    pub fn update_text(
        &mut self,
        id: &MessageId,
        text: impl Into<String>,
    ) -> Result<(), TranscriptError> {
        let idx = self
            .position(id)
            .ok_or_else(|| TranscriptError::NotFound(id.clone()))?;
        Arc::make_mut(&mut self.messages[idx]).text = text.into();
        Ok(())
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            messages: self.messages.clone().into(),
        }
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.position(id).map(|idx| self.messages[idx].as_ref())
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.messages.iter().map(Arc::as_ref)
    }

    fn position(&self, id: &MessageId) -> Option<usize> {
        // Lookups almost always target the in-flight message at the end.
        self.messages.iter().rposition(|m| &m.id == id)
    }
}

/// Read-only view of a transcript at the moment it was taken.
#[derive(Debug, Clone, Default)]
pub struct TranscriptSnapshot {
    messages: Arc<[Arc<Message>]>,
}

impl TranscriptSnapshot {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index).map(Arc::as_ref)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last().map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().map(Arc::as_ref)
    }

    /// Messages preceding `id`, or all of them if `id` is absent.
    pub fn before(&self, id: &MessageId) -> Vec<Message> {
        self.iter()
            .take_while(|m| &m.id != id)
            .cloned()
            .collect()
    }
}
