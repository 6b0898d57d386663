//! Streaming one reply into an event sink.

use std::time::Instant;

use socratis_core::{ChatEvent, MessageId};
use socratis_llms::Usage;
use socratis_observability::{record_duration, record_error, turn_span};
use tracing::{Instrument, info};

use super::Runtime;
use crate::assembler::{AssemblyOutcome, StreamAssembler};
use crate::error::Result;
use crate::session::TurnRequest;
use crate::sink::EventSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed {
        message_id: MessageId,
        text: String,
        usage: Option<Usage>,
    },
    /// `message_id` is `None` when the stream never opened and no reply
    /// message was created.
    Failed {
        message_id: Option<MessageId>,
        partial_text: String,
        error: String,
    },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

impl Runtime {
    /// Opens the stream, then emits `TurnStart`, one `TextUpdated` per
    /// fragment and finally `TurnEnd` or `TurnFailed`. Provider failures are
    /// reported through the sink and the outcome; only sink failures are `Err`.
    pub async fn drive_turn<S>(&self, turn: TurnRequest, sink: &mut S) -> Result<TurnOutcome>
    where
        S: EventSink + ?Sized,
    {
        let span = turn_span!(
            turn.reply_id,
            self.provider.provider_id(),
            self.config.model.as_str()
        );
        self.drive_turn_inner(turn, sink).instrument(span).await
    }

    async fn drive_turn_inner<S>(&self, turn: TurnRequest, sink: &mut S) -> Result<TurnOutcome>
    where
        S: EventSink + ?Sized,
    {
        let start = Instant::now();
        let request = self.build_request(&turn);
        let reply_id = turn.reply_id;

        let stream = match self.provider.stream(request).await {
            Ok(stream) => stream,
            Err(e) => {
                record_error(&e);
                let error = e.to_string();
                sink.emit(ChatEvent::turn_failed(None, error.clone())).await?;
                return Ok(TurnOutcome::Failed {
                    message_id: None,
                    partial_text: String::new(),
                    error,
                });
            }
        };

        sink.emit(ChatEvent::turn_start(reply_id.clone())).await?;
        let outcome = StreamAssembler::new(reply_id.clone()).run(stream, sink).await?;

        tracing::Span::current().record("fragments", outcome.fragments() as u64);
        record_duration("duration_ms", start.elapsed());

        match outcome {
            AssemblyOutcome::Completed { text, usage, fragments } => {
                info!(message.id = %reply_id, fragments, chars = text.len(), "turn completed");
                sink.emit(ChatEvent::turn_end(reply_id.clone())).await?;
                Ok(TurnOutcome::Completed {
                    message_id: reply_id,
                    text,
                    usage,
                })
            }
            AssemblyOutcome::Failed { text, error, .. } => {
                record_error(&error);
                let error = error.to_string();
                sink.emit(ChatEvent::turn_failed(Some(reply_id.clone()), error.clone()))
                    .await?;
                Ok(TurnOutcome::Failed {
                    message_id: Some(reply_id),
                    partial_text: text,
                    error,
                })
            }
        }
    }
}
