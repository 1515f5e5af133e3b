//! Speech backend responses and their conversion into raw PCM.

use serde::{Deserialize, Serialize};
use voxtempo_codec::{decode_base64, parse_sample_rate, pcm16le_to_i16};

use crate::error::{Result, TtsError};

/// Response body: base64 raw samples plus a MIME descriptor such as
/// `audio/L16; rate=24000`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsResponse {
    #[serde(default)]
    pub audio_data: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Decoded upstream audio: raw 16-bit little-endian PCM at `sample_rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub pcm: Vec<u8>,
    pub sample_rate: u32,
}

impl SynthesizedAudio {
    /// Interpret the payload as 16-bit samples.
    pub fn samples(&self) -> Result<Vec<i16>> {
        Ok(pcm16le_to_i16(&self.pcm)?)
    }
}

impl TtsResponse {
    pub fn new(audio_data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            audio_data: Some(audio_data.into()),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Validate and decode the payload.
    ///
    /// A missing or empty `audioData` is [`TtsError::MissingAudio`]. The sample
    /// rate comes from `mimeType`, falling back to 24 kHz.
    pub fn into_audio(self) -> Result<SynthesizedAudio> {
        let audio_data = self
            .audio_data
            .filter(|data| !data.trim().is_empty())
            .ok_or(TtsError::MissingAudio)?;

        let pcm = decode_base64(&audio_data)?;
        if pcm.is_empty() {
            return Err(TtsError::MissingAudio);
        }

        let sample_rate = parse_sample_rate(self.mime_type.as_deref().unwrap_or_default());

        Ok(SynthesizedAudio { pcm, sample_rate })
    }
}
