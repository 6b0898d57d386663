//! Gemini streaming support
//!
//! With `alt=sse` every event is `data: {GenerateContentResponse}`:
//! - `candidates[0].content.parts[].text` carries answer text (parts with
//!   `thought: true` are thinking summaries and are skipped)
//! - `candidates[0].finishReason` marks the last chunk
//! - `usageMetadata` is repeated on each chunk, cumulative
//! - an `error` object may arrive in-band after the stream has opened
//!
//! There is no `[DONE]` sentinel; the server closes the connection.

use futures::stream::StreamExt;
use reqwest_eventsource::{Event, EventSource};

use super::convert::{error_message_from_body, from_gemini_usage};
use super::types::GeminiStreamChunk;
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateStream, StreamEvent, Usage};

/// Create a stream from a Gemini EventSource
pub async fn create_stream(mut event_source: EventSource) -> Result<GenerateStream> {
    let stream = async_stream::stream! {
        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => {
                    if message.data.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<GeminiStreamChunk>(&message.data) {
                        Ok(chunk) => match process_chunk(chunk) {
                            Ok(events) => {
                                for stream_event in events {
                                    yield Ok(stream_event);
                                }
                            }
                            Err(e) => {
                                yield Err(e);
                                break;
                            }
                        },
                        Err(e) => {
                            yield Err(Error::stream_error(format!(
                                "Failed to parse Gemini chunk: {}", e
                            )));
                            break;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(
                        status.as_u16(),
                        error_message_from_body(&error_body),
                    ));
                    break;
                }
                Err(e) => {
                    yield Err(Error::stream_error(format!("Stream error: {}", e)));
                    break;
                }
            }
        }

        event_source.close();
    };

    Ok(GenerateStream::new(Box::pin(stream)))
}

/// Process a single Gemini chunk into unified StreamEvent(s)
fn process_chunk(chunk: GeminiStreamChunk) -> Result<Vec<StreamEvent>> {
    if let Some(error) = chunk.error {
        let message = match error.status {
            Some(status) => format!("{} ({status})", error.message),
            None => error.message,
        };
        return Err(Error::provider_error(error.code.unwrap_or(500), message));
    }

    let mut events = Vec::new();
    let Some(candidate) = chunk.candidates.into_iter().next() else {
        return Ok(events);
    };

    if let Some(content) = candidate.content {
        for part in content.parts {
            if part.thought {
                continue;
            }
            if let Some(text) = part.text.filter(|t| !t.is_empty()) {
                events.push(StreamEvent::text_delta(text));
            }
        }
    }

    if let Some(reason) = candidate.finish_reason {
        let usage = chunk
            .usage_metadata
            .as_ref()
            .map(from_gemini_usage)
            .unwrap_or_else(Usage::default);
        events.push(StreamEvent::finish(usage, FinishReason::parse(&reason)));
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(raw: &str) -> GeminiStreamChunk {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_process_text_delta() {
        let events = process_chunk(chunk(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}"#,
        ))
        .unwrap();
        assert_eq!(events, vec![StreamEvent::text_delta("Hello")]);
    }

    #[test]
    fn test_thought_parts_skipped() {
        let events = process_chunk(chunk(
            r#"{"candidates":[{"content":{"parts":[{"text":"plan","thought":true},{"text":"Answer"}]}}]}"#,
        ))
        .unwrap();
        assert_eq!(events, vec![StreamEvent::text_delta("Answer")]);
    }

    #[test]
    fn test_process_finish() {
        let events = process_chunk(chunk(
            r#"{"candidates":[{"content":{"parts":[{"text":"."}]},"finishReason":"STOP"}],
                "usageMetadata":{"promptTokenCount":10,"candidatesTokenCount":20,"thoughtsTokenCount":5}}"#,
        ))
        .unwrap();
        assert_eq!(events.len(), 2);
        if let StreamEvent::Finish { usage, reason } = &events[1] {
            assert_eq!(usage.prompt_tokens, 10);
            assert_eq!(usage.completion_tokens, 20);
            assert_eq!(usage.thinking_tokens, 5);
            assert_eq!(*reason, FinishReason::Stop);
        } else {
            panic!("Expected Finish");
        }
    }

    #[test]
    fn test_in_band_error() {
        let err = process_chunk(chunk(
            r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_empty_chunk() {
        assert!(process_chunk(chunk("{}")).unwrap().is_empty());
    }
}
