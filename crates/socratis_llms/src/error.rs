use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing API key for provider: {0}")]
    MissingApiKey(String),

    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the provider. `message` is the response body.
    #[error("provider error {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider_error(status: u16, message: impl Into<String>) -> Self {
        Error::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::Stream(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Provider { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
