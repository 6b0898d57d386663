//! Offline providers: a scripted one for tests and an echo one for running
//! without credentials.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{FinishReason, GenerateRequest, GenerateStream, StreamEvent, Usage};

#[derive(Debug, Clone)]
enum Failure {
    /// `stream()` itself fails.
    OnOpen { status: u16, message: String },
    /// The stream breaks after this many fragments.
    AfterFragments { count: usize, message: String },
}

/// Replays a fixed list of text fragments.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    fragments: Vec<String>,
    failure: Option<Failure>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing_after(mut self, count: usize, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::AfterFragments {
            count,
            message: message.into(),
        });
        self
    }

    pub fn failing_on_open(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::OnOpen {
            status,
            message: message.into(),
        });
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let fail_after = match &self.failure {
            Some(Failure::OnOpen { status, message }) => {
                return Err(Error::provider_error(*status, message.clone()));
            }
            Some(Failure::AfterFragments { count, message }) => Some((*count, message.clone())),
            None => None,
        };

        let fragments = self.fragments.clone();
        let delay = self.delay;
        let stream = async_stream::stream! {
            for (i, fragment) in fragments.into_iter().enumerate() {
                if let Some((count, message)) = &fail_after {
                    if i == *count {
                        yield Err(Error::stream_error(message.clone()));
                        return;
                    }
                }
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(StreamEvent::text_delta(fragment));
            }
            if let Some((_, message)) = fail_after {
                yield Err(Error::stream_error(message));
                return;
            }
            yield Ok(StreamEvent::finish(Usage::default(), FinishReason::Stop));
        };

        Ok(GenerateStream::new(Box::pin(stream)))
    }
}

/// Streams the user's last message back, one word at a time.
#[derive(Debug, Clone)]
pub struct EchoProvider {
    delay: Duration,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(40),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for EchoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn provider_id(&self) -> &str {
        "echo"
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["echo".to_string()])
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let text = format!("You said: **{}**", request.last_user_text());
        let words: Vec<String> = text.split_inclusive(' ').map(str::to_string).collect();
        ScriptedProvider::new(words)
            .with_delay(self.delay)
            .stream(request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::types::{Content, Part};

    fn request(text: &str) -> GenerateRequest {
        GenerateRequest::new("m", vec![Content::user(vec![Part::text(text)])])
    }

    async fn collect(stream: GenerateStream) -> (String, Option<String>) {
        let mut text = String::new();
        let mut error = None;
        futures::pin_mut!(stream);
        while let Some(event) = stream.next().await {
            match event {
                Ok(StreamEvent::TextDelta { delta }) => text.push_str(&delta),
                Ok(StreamEvent::Finish { .. }) => {}
                Err(e) => error = Some(e.to_string()),
            }
        }
        (text, error)
    }

    #[tokio::test]
    async fn test_scripted_fragments_in_order() {
        let provider = ScriptedProvider::new(["Hel", "lo"]);
        let (text, error) = collect(provider.stream(request("q")).await.unwrap()).await;
        assert_eq!(text, "Hello");
        assert!(error.is_none());
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure_after() {
        let provider = ScriptedProvider::new(["a", "b", "c"]).failing_after(2, "reset");
        let (text, error) = collect(provider.stream(request("q")).await.unwrap()).await;
        assert_eq!(text, "ab");
        assert_eq!(error.as_deref(), Some("stream error: reset"));
    }

    #[tokio::test]
    async fn test_scripted_failure_on_open() {
        let provider = ScriptedProvider::new(["x"]).failing_on_open(403, "forbidden");
        let err = provider.stream(request("q")).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_echo() {
        let provider = EchoProvider::new().with_delay(Duration::ZERO);
        let response = provider.generate(request("debit cash")).await.unwrap();
        assert_eq!(response.text, "You said: **debit cash**");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    }
}
