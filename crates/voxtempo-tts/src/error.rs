//! Error types for voxtempo-tts

use thiserror::Error;
use voxtempo_codec::CodecError;

/// TTS error type
#[derive(Error, Debug)]
pub enum TtsError {
    /// Request rejected locally before any network activity
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream answered with a non-success status
    #[error("Speech service error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or body transfer failure
    #[error("Speech service unreachable: {0}")]
    Transport(String),

    /// Response body was not the expected JSON shape
    #[error("Malformed speech response: {0}")]
    Malformed(String),

    /// Response carried no audio payload
    #[error("Speech response contained no audio data")]
    MissingAudio,

    /// Audio payload could not be decoded
    #[error("Audio payload: {0}")]
    Payload(#[from] CodecError),
}

/// Result type for TTS operations
pub type Result<T> = std::result::Result<T, TtsError>;

impl TtsError {
    /// Whether a retry could plausibly succeed (rate limiting, server trouble,
    /// network hiccups).
    pub fn is_transient(&self) -> bool {
        match self {
            TtsError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            TtsError::Transport(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TtsError::Malformed(e.to_string())
        } else {
            TtsError::Transport(e.to_string())
        }
    }
}
