//! The generate-and-correct pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use voxtempo_codec::{decode_wav, encode_wav_f32, encode_wav_i16, pcm16le_to_i16, DecodedAudio};
use voxtempo_stretch::{is_identity_tempo, validate_tempo, StretchEngine, TempoJob};
use voxtempo_tts::{SpeechBackend, TtsRequest};

use crate::artifact::artifact_file_name;
use crate::builder::VoxTempoBuilder;
use crate::Result;

/// A playable WAV container plus what it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    /// Complete RIFF/WAVE bytes (mono, 16-bit).
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub sample_count: usize,
    /// Tempo applied relative to the synthesized original (1.0 for the original).
    pub tempo: f32,
}

impl SpeechClip {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count as f64 / self.sample_rate as f64
    }

    /// Decode back to normalized float samples.
    pub fn decode(&self) -> Result<DecodedAudio> {
        Ok(decode_wav(&self.wav)?)
    }

    /// Download name for this clip, e.g. `hola_1.5x.wav`.
    pub fn file_name(&self, stem: &str) -> String {
        artifact_file_name(stem, self.tempo)
    }

    /// Write the container into `dir` (created if missing). Returns the path.
    pub fn save(&self, dir: impl AsRef<Path>, stem: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(stem));
        std::fs::write(&path, &self.wav)?;
        debug!(path = %path.display(), bytes = self.wav.len(), "clip saved");
        Ok(path)
    }
}

/// Speech backend plus a long-lived tempo worker.
///
/// ```ignore
/// let voxtempo = VoxTempo::builder()
///     .http(TtsConfig::new(endpoint))
///     .build()?;
///
/// let original = voxtempo.generate(&TtsRequest::new("Hola", "Kore")).await?;
/// let faster = voxtempo.correct_tempo(&original, 1.3).await?;
/// faster.save("out", "hola")?; // out/hola_1.3x.wav
/// ```
pub struct VoxTempo {
    backend: Arc<dyn SpeechBackend>,
    stretcher: StretchEngine,
}

impl VoxTempo {
    pub fn builder() -> VoxTempoBuilder {
        VoxTempoBuilder::default()
    }

    pub(crate) fn from_parts(backend: Arc<dyn SpeechBackend>, stretcher: StretchEngine) -> Self {
        Self { backend, stretcher }
    }

    pub fn stretcher(&self) -> &StretchEngine {
        &self.stretcher
    }

    /// Whether tempo correction can run. `false` after a failed worker start.
    pub fn tempo_available(&self) -> bool {
        self.stretcher.is_running()
    }

    /// Synthesize `request` and wrap the result in a WAV container.
    ///
    /// The request is validated before the backend is called. A response
    /// without audio is an error and produces no clip.
    pub async fn generate(&self, request: &TtsRequest) -> Result<SpeechClip> {
        request.validate()?;

        let audio = self.backend.synthesize(request).await?.into_audio()?;
        let samples = pcm16le_to_i16(&audio.pcm)?;
        let wav = encode_wav_i16(&samples, audio.sample_rate)?;

        info!(
            samples = samples.len(),
            sample_rate = audio.sample_rate,
            bytes = wav.len(),
            "speech generated"
        );

        Ok(SpeechClip {
            wav,
            sample_rate: audio.sample_rate,
            sample_count: samples.len(),
            tempo: 1.0,
        })
    }

    /// Change the clip's duration by `tempo` without changing pitch.
    ///
    /// `tempo` is checked before anything else. At 1.0 the clip is returned
    /// unchanged and the worker is not involved. Tempos compound: correcting a
    /// 1.5x clip by 1.2 yields a 1.8x clip.
    pub async fn correct_tempo(&self, clip: &SpeechClip, tempo: f32) -> Result<SpeechClip> {
        validate_tempo(tempo)?;
        if is_identity_tempo(tempo) {
            return Ok(clip.clone());
        }

        let decoded = clip.decode()?;
        let sample_rate = decoded.sample_rate;
        let stretched = self.stretch(decoded.samples, sample_rate, tempo).await?;
        let wav = encode_wav_f32(&stretched, sample_rate)?;

        info!(
            tempo,
            original = clip.sample_count,
            corrected = stretched.len(),
            "tempo corrected"
        );

        Ok(SpeechClip {
            wav,
            sample_rate,
            sample_count: stretched.len(),
            tempo: clip.tempo * tempo,
        })
    }

    /// Run one tempo job on the worker without blocking the async runtime.
    ///
    /// Fails with `Busy` if another job is still in flight.
    pub async fn stretch(
        &self,
        samples: Vec<f32>,
        sample_rate: u32,
        tempo: f32,
    ) -> Result<Vec<f32>> {
        let handle = self
            .stretcher
            .dispatch(TempoJob::new(samples, sample_rate, tempo))?;
        let result = tokio::task::spawn_blocking(move || handle.wait()).await?;
        Ok(result?)
    }
}

impl fmt::Debug for VoxTempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxTempo")
            .field("tempo_available", &self.tempo_available())
            .field("stretch_config", self.stretcher.config())
            .finish_non_exhaustive()
    }
}
