use thiserror::Error;

use crate::message::MessageId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("message not found: {0}")]
    NotFound(MessageId),

    #[error("duplicate message id: {0}")]
    DuplicateId(MessageId),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("invalid data url: {0}")]
    DataUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = TranscriptError::NotFound(MessageId::from("m-1"));
        assert_eq!(err.to_string(), "message not found: m-1");
    }

    #[test]
    fn test_duplicate_id_error() {
        let err = TranscriptError::DuplicateId(MessageId::from("m-2"));
        assert_eq!(err.to_string(), "duplicate message id: m-2");
    }

    #[test]
    fn test_transcript_error_converts() {
        let err = CoreError::from(TranscriptError::NotFound(MessageId::from("x")));
        assert_eq!(err.to_string(), "message not found: x");
    }

    #[test]
    fn test_data_url_error() {
        let err = CoreError::DataUrl("missing payload".to_string());
        assert_eq!(err.to_string(), "invalid data url: missing payload");
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CoreError::from(io_err);
        assert!(err.to_string().contains("file not found"));
    }
}
