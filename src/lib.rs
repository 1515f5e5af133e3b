//! # VoxTempo - speech audio core
//!
//! Turns text into a playable WAV file through a speech backend, then
//! optionally changes its tempo without shifting pitch.
//!
//! ## Architecture
//!
//! VoxTempo is an umbrella crate that coordinates:
//! - **voxtempo-codec** - WAV encode/decode, base64 PCM payloads, MIME sample rates
//! - **voxtempo-stretch** - Phase-vocoder time-stretch on a dedicated worker thread
//! - **voxtempo-tts** - Speech request/response types and the HTTP backend
//!
//! ## Quick Start
//!
//! ```ignore
//! use voxtempo::prelude::*;
//!
//! let voxtempo = VoxTempo::builder()
//!     .http(TtsConfig::new("https://tts.example.com/v1/speak"))
//!     .build()?;
//!
//! let original = voxtempo.generate(&TtsRequest::new("Hola", "Kore")).await?;
//! original.save("out", "hola")?;                       // out/hola_1.0x.wav
//!
//! let slower = voxtempo.correct_tempo(&original, 0.8).await?;
//! slower.save("out", "hola")?;                         // out/hola_0.8x.wav
//! ```

pub mod artifact;
mod builder;
mod engine;
pub mod error;

pub use artifact::{artifact_file_name, DEFAULT_STEM};
pub use builder::VoxTempoBuilder;
pub use engine::{SpeechClip, VoxTempo};
pub use error::{Error, Result};

/// Re-export of voxtempo-codec for direct access
pub use voxtempo_codec as codec;
/// Re-export of voxtempo-stretch for direct access
pub use voxtempo_stretch as stretch;
/// Re-export of voxtempo-tts for direct access
pub use voxtempo_tts as tts;

pub use voxtempo_stretch::{StretchConfig, MAX_TEMPO, MIN_TEMPO};
pub use voxtempo_tts::{
    HttpSpeechBackend, RetryPolicy, SpeechBackend, TtsConfig, TtsRequest, TtsResponse,
};

pub mod prelude {
    pub use crate::{
        artifact_file_name, Error, HttpSpeechBackend, Result, RetryPolicy, SpeechBackend,
        SpeechClip, StretchConfig, TtsConfig, TtsRequest, TtsResponse, VoxTempo,
        VoxTempoBuilder,
    };
}
