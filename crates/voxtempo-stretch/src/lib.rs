//! # voxtempo-stretch
//!
//! Pitch-preserving tempo correction for mono speech buffers.
//!
//! ## Architecture
//!
//! - **time_stretch** - phase vocoder and the chunked driver that runs it over
//!   a whole buffer
//! - **worker** - [`StretchEngine`], one long-lived thread that runs
//!   [`TempoJob`]s so the caller never blocks on the computation
//!
//! ## Quick Start
//!
//! ```ignore
//! use voxtempo_stretch::{StretchEngine, TempoJob};
//!
//! let mut engine = StretchEngine::new();
//! engine.start()?;
//!
//! let handle = engine.dispatch(TempoJob::new(samples, 24000, 1.3))?;
//! let faster = handle.wait()?;
//! ```
//!
//! ## Job rules
//!
//! - Tempo must lie in `0.5..=2.0`; output length is `round(len / tempo)`
//! - One job in flight per engine; overlapping dispatches get [`StretchError::Busy`]
//! - No cancellation: a dispatched job always completes or fails

pub mod error;
pub mod time_stretch;
pub mod worker;

pub use error::{Result, StretchError};
pub use time_stretch::{
    expected_len, is_identity_tempo, stretch, stretch_mono, validate_tempo, FftSize,
    PhaseVocoderProcessor, TempoJob, MAX_TEMPO, MIN_TEMPO,
};
pub use worker::{JobId, JobOutcome, JobState, StretchConfig, StretchEngine, StretchHandle};
