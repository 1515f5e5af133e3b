//! Builder for configuring and constructing a [`VoxTempo`].

use std::sync::Arc;

use voxtempo_stretch::{StretchConfig, StretchEngine};
use voxtempo_tts::{HttpSpeechBackend, SpeechBackend, TtsConfig};

use crate::{Error, Result, VoxTempo};

/// A speech backend is required: either an explicit [`SpeechBackend`] or a
/// [`TtsConfig`] for the HTTP client. An explicit backend wins if both are set.
///
/// `build()` starts the tempo worker. If it fails to start, the failure is
/// logged once and every later tempo correction returns the same
/// `Unavailable` error; speech generation keeps working.
///
/// # Example
///
/// ```ignore
/// let voxtempo = VoxTempo::builder()
///     .http(TtsConfig::new(endpoint).retry(RetryPolicy::exponential()))
///     .stretch_config(StretchConfig::default().chunk_frames(4096))
///     .build()?;
/// ```
#[derive(Default)]
pub struct VoxTempoBuilder {
    backend: Option<Arc<dyn SpeechBackend>>,
    http: Option<TtsConfig>,
    stretch: StretchConfig,
}

impl VoxTempoBuilder {
    pub fn backend<B: SpeechBackend + 'static>(mut self, backend: B) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    pub fn shared_backend(mut self, backend: Arc<dyn SpeechBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use the HTTP backend with this configuration.
    pub fn http(mut self, config: TtsConfig) -> Self {
        self.http = Some(config);
        self
    }

    /// Default: 8192-frame chunks, 2048-point FFT
    pub fn stretch_config(mut self, config: StretchConfig) -> Self {
        self.stretch = config;
        self
    }

    pub fn build(self) -> Result<VoxTempo> {
        let backend: Arc<dyn SpeechBackend> = match (self.backend, self.http) {
            (Some(backend), _) => backend,
            (None, Some(config)) => Arc::new(HttpSpeechBackend::new(config)?),
            (None, None) => return Err(Error::NoBackend),
        };

        let mut stretcher = StretchEngine::with_config(self.stretch);
        if let Err(e) = stretcher.start() {
            tracing::warn!(error = %e, "tempo correction disabled");
        }

        Ok(VoxTempo::from_parts(backend, stretcher))
    }
}
