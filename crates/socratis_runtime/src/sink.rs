//! Destinations for chat events.

use async_trait::async_trait;
use socratis_core::ChatEvent;
use tokio::sync::mpsc;

use crate::error::{Result, RuntimeError};

/// Receives the events of a running turn, in order.
#[async_trait]
pub trait EventSink: Send {
    async fn emit(&mut self, event: ChatEvent) -> Result<()>;
}

/// Hands events to the transcript owner on another task.
#[async_trait]
impl EventSink for mpsc::Sender<ChatEvent> {
    async fn emit(&mut self, event: ChatEvent) -> Result<()> {
        self.send(event).await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

#[async_trait]
impl EventSink for mpsc::UnboundedSender<ChatEvent> {
    async fn emit(&mut self, event: ChatEvent) -> Result<()> {
        self.send(event).map_err(|_| RuntimeError::ChannelClosed)
    }
}

/// Records events; useful for inspecting a turn after the fact.
#[async_trait]
impl EventSink for Vec<ChatEvent> {
    async fn emit(&mut self, event: ChatEvent) -> Result<()> {
        self.push(event);
        Ok(())
    }
}
