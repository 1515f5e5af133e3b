//! # voxtempo-tts
//!
//! Speech synthesis backends for voxtempo.
//!
//! - [`TtsRequest`]: text, voice, optional style and speaking rate
//! - [`TtsResponse`]: base64 PCM plus MIME type, decoded with [`TtsResponse::into_audio`]
//! - [`SpeechBackend`]: async trait implemented by [`HttpSpeechBackend`] and test fakes
//!
//! ```ignore
//! use voxtempo_tts::{HttpSpeechBackend, RetryPolicy, SpeechBackend, TtsConfig, TtsRequest};
//!
//! let backend = HttpSpeechBackend::new(
//!     TtsConfig::new("https://tts.example.com/v1/speak")
//!         .api_key(key)
//!         .retry(RetryPolicy::exponential()),
//! )?;
//! let audio = backend
//!     .synthesize(&TtsRequest::new("Hola", "Kore"))
//!     .await?
//!     .into_audio()?;
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use backend::{HttpSpeechBackend, SpeechBackend};
pub use config::{RetryPolicy, TtsConfig};
pub use error::{Result, TtsError};
pub use request::{TtsRequest, MAX_SPEAKING_RATE, MAX_TEXT_CHARS};
pub use response::{SynthesizedAudio, TtsResponse};
