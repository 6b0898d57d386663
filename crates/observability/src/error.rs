use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// Another global subscriber got there first.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),

    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },
}
