//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StretchError {
    /// Tempo multiplier outside the supported range.
    #[error("Tempo {0} is outside the supported range 0.5-2.0")]
    InvalidTempo(f32),

    /// Job carries no samples.
    #[error("Cannot stretch an empty buffer")]
    EmptyBuffer,

    /// Job sample rate is zero.
    #[error("Sample rate must be positive")]
    InvalidSampleRate,

    /// Worker failed to initialize; permanent for this engine.
    #[error("Tempo engine unavailable: {0}")]
    Unavailable(String),

    /// `dispatch` was called before `start`.
    #[error("Tempo engine has not been started")]
    NotStarted,

    /// Another job is already in flight.
    #[error("Tempo engine is busy with another job")]
    Busy,

    /// The job itself failed.
    #[error("Tempo correction failed: {0}")]
    Failed(String),

    /// The worker went away before replying.
    #[error("Tempo worker stopped before replying")]
    WorkerGone,
}

/// Result type.
pub type Result<T> = std::result::Result<T, StretchError>;
