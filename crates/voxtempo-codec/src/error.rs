//! Error types for voxtempo-codec

use std::io;
use thiserror::Error;

/// Codec error type
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O error while writing or reading a container
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The payload is not valid base64 text
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The container bytes could not be parsed
    #[error("Malformed WAV container: {0}")]
    Wav(String),

    /// The container is valid but uses a layout we do not handle
    #[error("Unsupported WAV layout: {0}")]
    Unsupported(String),

    /// Invalid audio data (empty buffer, zero rate, odd PCM byte count)
    #[error("Invalid audio data: {0}")]
    InvalidData(String),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

// hound folds I/O and format failures into one enum; keep I/O distinct so
// callers can tell a short buffer from a broken header.
impl From<hound::Error> for CodecError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => CodecError::Io(io),
            other => CodecError::Wav(other.to_string()),
        }
    }
}
