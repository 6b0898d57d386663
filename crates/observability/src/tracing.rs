//! Span and recording helpers

/// Span covering one tutoring turn, from stream open to the last fragment.
///
/// ```rust
/// use socratis_observability::turn_span;
///
/// let span = turn_span!("6f1c", "gemini", "gemini-2.5-flash");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! turn_span {
    ($message_id:expr, $provider:expr, $model:expr) => {
        tracing::info_span!(
            "chat.turn",
            message.id = %$message_id,
            provider = $provider,
            model = $model,
            fragments = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Marks the current span as failed and logs the error.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Records `duration` in milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
