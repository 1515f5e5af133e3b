//! # voxtempo-codec
//!
//! Container codec for the voxtempo pipeline.
//!
//! This crate is stateless; every function is pure:
//! - **Payload decoding**: base64 text → raw bytes → 16-bit PCM samples
//! - **Container encoding**: mono samples (16-bit or normalized float) → RIFF/WAVE bytes
//! - **Container decoding**: RIFF/WAVE bytes → header fields, float samples, raw payload
//! - **Rate discovery**: `rate=` extraction from `audio/L16` MIME descriptors
//!
//! ```ignore
//! use voxtempo_codec::{decode_base64, encode_wav_i16, parse_sample_rate, pcm16le_to_i16};
//!
//! let rate = parse_sample_rate("audio/L16; rate=24000");
//! let samples = pcm16le_to_i16(&decode_base64(audio_data)?)?;
//! let wav = encode_wav_i16(&samples, rate)?;
//! ```

pub mod error;
pub mod mime;
pub mod pcm;
pub mod wav;

pub use error::{CodecError, Result};
pub use mime::{parse_sample_rate, DEFAULT_SAMPLE_RATE};
pub use pcm::{
    decode_base64, float_to_i16, i16_to_float, i16_to_pcm16le, pcm16le_to_i16, samples_to_float,
    BYTES_PER_SAMPLE,
};
pub use wav::{
    decode_wav, encode_wav, encode_wav_f32, encode_wav_i16, read_header, wav_payload,
    AudioSamples, DecodedAudio, WavHeader, WAV_HEADER_LEN,
};
