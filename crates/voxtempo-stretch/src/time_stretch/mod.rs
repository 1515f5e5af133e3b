//! Pitch-preserving time-stretching.
//!
//! A mono phase vocoder ([`PhaseVocoderProcessor`]) driven over a whole
//! buffer in bounded chunks ([`stretch_mono`]).
//!
//! # Example
//!
//! ```ignore
//! use voxtempo_stretch::{stretch_mono, StretchConfig};
//!
//! // 1.5x faster, same pitch
//! let faster = stretch_mono(&samples, 1.5, &StretchConfig::default());
//! assert_eq!(faster.len(), (samples.len() as f64 / 1.5).round() as usize);
//! ```

mod chunked;
mod phase_vocoder;
mod types;

pub use types::{
    expected_len, is_identity_tempo, validate_tempo, FftSize, TempoJob, MAX_TEMPO, MIN_TEMPO,
};

pub use chunked::{stretch, stretch_mono};
pub(crate) use chunked::stretch_mono_with_planner;
pub use phase_vocoder::PhaseVocoderProcessor;
