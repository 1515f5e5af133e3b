//! Centralized error type for the voxtempo umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;
use voxtempo_codec::CodecError;
use voxtempo_stretch::StretchError;
use voxtempo_tts::TtsError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Codec: {0}")]
    Codec(#[from] CodecError),

    #[error("Tempo: {0}")]
    Stretch(#[from] StretchError),

    #[error("Speech: {0}")]
    Tts(#[from] TtsError),

    #[error("No speech backend configured")]
    NoBackend,

    #[error("Tempo task: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Input rejected before any network or worker activity.
    ///
    /// A response without audio is an upstream error, not a validation one:
    /// the request was accepted and sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Tts(TtsError::InvalidRequest(_))
                | Error::Stretch(
                    StretchError::InvalidTempo(_)
                        | StretchError::EmptyBuffer
                        | StretchError::InvalidSampleRate
                )
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::from(StretchError::InvalidTempo(3.0)).is_validation());
        assert!(Error::from(TtsError::InvalidRequest("text is empty".into())).is_validation());
        assert!(!Error::from(TtsError::MissingAudio).is_validation());
        assert!(!Error::from(StretchError::Busy).is_validation());
        assert!(!Error::NoBackend.is_validation());
    }

    #[test]
    fn test_messages_are_readable() {
        let err = Error::from(StretchError::Unavailable("no fft".into()));
        assert!(err.to_string().contains("no fft"));
    }
}
