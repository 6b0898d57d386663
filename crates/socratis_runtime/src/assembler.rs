//! Folds streamed text fragments into one message.
//!
//! The assembler pulls from the stream one step at a time. Each step yields a
//! fragment, the end of the stream, or a failure. After every fragment it
//! publishes the **full** accumulated text for its target message. A failure
//! stops assembly but keeps everything already published.

use futures::StreamExt;
use socratis_core::{ChatEvent, MessageId};
use socratis_llms::{GenerateStream, StreamEvent, Usage};
use tracing::{debug, warn};

use crate::error::Result;
use crate::sink::EventSink;

/// Result of one pull from the provider stream.
#[derive(Debug)]
pub enum Pull {
    Fragment(String),
    Ended,
    Failed(socratis_llms::Error),
}

#[derive(Debug)]
pub enum AssemblyOutcome {
    Completed {
        text: String,
        fragments: usize,
        usage: Option<Usage>,
    },
    /// `text` holds the fragments applied before the failure.
    Failed {
        text: String,
        fragments: usize,
        error: socratis_llms::Error,
    },
}

impl AssemblyOutcome {
    pub fn text(&self) -> &str {
        match self {
            AssemblyOutcome::Completed { text, .. } | AssemblyOutcome::Failed { text, .. } => text,
        }
    }

    pub fn fragments(&self) -> usize {
        match self {
            AssemblyOutcome::Completed { fragments, .. }
            | AssemblyOutcome::Failed { fragments, .. } => *fragments,
        }
    }
}

#[derive(Debug)]
pub struct StreamAssembler {
    target: MessageId,
    text: String,
    fragments: usize,
    usage: Option<Usage>,
}

impl StreamAssembler {
    pub fn new(target: MessageId) -> Self {
        Self {
            target,
            text: String::new(),
            fragments: 0,
            usage: None,
        }
    }

    pub fn target(&self) -> &MessageId {
        &self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Next fragment, end, or failure. Finish metadata is recorded, not returned.
    pub async fn pull(&mut self, stream: &mut GenerateStream) -> Pull {
        loop {
            match stream.next().await {
                None => return Pull::Ended,
                Some(Err(e)) => return Pull::Failed(e),
                Some(Ok(StreamEvent::TextDelta { delta })) => return Pull::Fragment(delta),
                Some(Ok(StreamEvent::Finish { usage, reason })) => {
                    debug!(
                        message.id = %self.target,
                        ?reason,
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        thinking_tokens = usage.thinking_tokens,
                        "stream finished"
                    );
                    self.usage = Some(usage);
                }
            }
        }
    }

    /// Appends `fragment` and returns the update carrying the full text.
    pub fn apply(&mut self, fragment: &str) -> ChatEvent {
        self.text.push_str(fragment);
        self.fragments += 1;
        ChatEvent::text_updated(self.target.clone(), self.text.clone())
    }

    /// Drains `stream` into `sink`. Sink errors abort assembly and are returned.
    pub async fn run<S>(mut self, mut stream: GenerateStream, sink: &mut S) -> Result<AssemblyOutcome>
    where
        S: EventSink + ?Sized,
    {
        loop {
            match self.pull(&mut stream).await {
                Pull::Fragment(fragment) => {
                    let update = self.apply(&fragment);
                    sink.emit(update).await?;
                }
                Pull::Ended => {
                    return Ok(AssemblyOutcome::Completed {
                        text: self.text,
                        fragments: self.fragments,
                        usage: self.usage,
                    });
                }
                Pull::Failed(error) => {
                    warn!(
                        message.id = %self.target,
                        fragments = self.fragments,
                        error = %error,
                        "stream failed; keeping partial text"
                    );
                    return Ok(AssemblyOutcome::Failed {
                        text: self.text,
                        fragments: self.fragments,
                        error,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use socratis_llms::{Error, FinishReason};

    use super::*;

    fn stream(events: Vec<socratis_llms::Result<StreamEvent>>) -> GenerateStream {
        GenerateStream::from_events(events)
    }

    #[tokio::test]
    async fn test_publishes_full_text_per_fragment() {
        let id = MessageId::from("reply");
        let mut events: Vec<ChatEvent> = Vec::new();
        let outcome = StreamAssembler::new(id.clone())
            .run(
                stream(vec![
                    Ok(StreamEvent::text_delta("Hel")),
                    Ok(StreamEvent::text_delta("lo, ")),
                    Ok(StreamEvent::text_delta("World")),
                ]),
                &mut events,
            )
            .await
            .unwrap();

        assert_eq!(outcome.text(), "Hello, World");
        assert_eq!(
            events,
            vec![
                ChatEvent::text_updated(id.clone(), "Hel"),
                ChatEvent::text_updated(id.clone(), "Hello, "),
                ChatEvent::text_updated(id, "Hello, World"),
            ]
        );
    }

    #[tokio::test]
    async fn test_finish_metadata_not_appended() {
        let usage = Usage::new(3, 2);
        let mut events: Vec<ChatEvent> = Vec::new();
        let outcome = StreamAssembler::new(MessageId::from("r"))
            .run(
                stream(vec![
                    Ok(StreamEvent::text_delta("ok")),
                    Ok(StreamEvent::finish(usage, FinishReason::Stop)),
                ]),
                &mut events,
            )
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        match outcome {
            AssemblyOutcome::Completed { text, usage: u, .. } => {
                assert_eq!(text, "ok");
                assert_eq!(u, Some(usage));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_applied_fragments() {
        let mut events: Vec<ChatEvent> = Vec::new();
        let outcome = StreamAssembler::new(MessageId::from("r"))
            .run(
                stream(vec![
                    Ok(StreamEvent::text_delta("a")),
                    Ok(StreamEvent::text_delta("b")),
                    Err(Error::stream_error("reset")),
                    Ok(StreamEvent::text_delta("never")),
                ]),
                &mut events,
            )
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(outcome, AssemblyOutcome::Failed { ref text, fragments: 2, .. } if text == "ab"));
    }

    #[tokio::test]
    async fn test_empty_stream_completes_empty() {
        let mut events: Vec<ChatEvent> = Vec::new();
        let outcome = StreamAssembler::new(MessageId::from("r"))
            .run(stream(vec![]), &mut events)
            .await
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(outcome.fragments(), 0);
        assert_eq!(outcome.text(), "");
    }

    #[tokio::test]
    async fn test_pull_states() {
        let mut s = stream(vec![
            Ok(StreamEvent::text_delta("x")),
            Err(Error::stream_error("boom")),
        ]);
        let mut assembler = StreamAssembler::new(MessageId::from("r"));
        assert!(matches!(assembler.pull(&mut s).await, Pull::Fragment(f) if f == "x"));
        assert!(matches!(assembler.pull(&mut s).await, Pull::Failed(_)));
        assert!(matches!(assembler.pull(&mut s).await, Pull::Ended));
    }
}
