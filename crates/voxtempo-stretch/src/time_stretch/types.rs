//! Tempo job and analysis-size types.

use crate::error::{Result, StretchError};

/// Slowest supported tempo (half speed).
pub const MIN_TEMPO: f32 = 0.5;
/// Fastest supported tempo (double speed).
pub const MAX_TEMPO: f32 = 2.0;

/// A unit of work for the tempo engine.
///
/// Consumed exactly once: the worker takes ownership of the buffer and
/// hands back a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoJob {
    /// Mono samples, normalized to -1.0..1.0
    pub buffer: Vec<f32>,
    /// Sample rate in Hz; the result keeps the same rate
    pub sample_rate: u32,
    /// Playback speed multiplier (2.0 = twice as fast, half as long)
    pub tempo: f32,
}

impl TempoJob {
    pub fn new(buffer: Vec<f32>, sample_rate: u32, tempo: f32) -> Self {
        Self {
            buffer,
            sample_rate,
            tempo,
        }
    }

    /// Check the job against the engine's input contract.
    pub fn validate(&self) -> Result<()> {
        validate_tempo(self.tempo)?;
        if self.sample_rate == 0 {
            return Err(StretchError::InvalidSampleRate);
        }
        if self.buffer.is_empty() {
            return Err(StretchError::EmptyBuffer);
        }
        Ok(())
    }

    /// Whether this job would leave the audio unchanged.
    pub fn is_identity(&self) -> bool {
        is_identity_tempo(self.tempo)
    }

    /// Output length the engine produces for this job.
    pub fn expected_len(&self) -> usize {
        expected_len(self.buffer.len(), self.tempo)
    }
}

/// Reject tempos outside `MIN_TEMPO..=MAX_TEMPO` (and NaN).
pub fn validate_tempo(tempo: f32) -> Result<()> {
    if (MIN_TEMPO..=MAX_TEMPO).contains(&tempo) {
        Ok(())
    } else {
        Err(StretchError::InvalidTempo(tempo))
    }
}

/// Tempos this close to 1.0 need no correction.
pub fn is_identity_tempo(tempo: f32) -> bool {
    (tempo - 1.0).abs() < 0.001
}

/// `round(len / tempo)`
pub fn expected_len(len: usize, tempo: f32) -> usize {
    (len as f64 / f64::from(tempo)).round() as usize
}

/// FFT size presets for the latency/quality trade-off
///
/// - **Small (1024)**: tighter transients, coarser frequency resolution
/// - **Medium (2048)**: default, good for speech at 16-48 kHz
/// - **Large (4096)**: smoother sustained tones, smeared consonants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftSize {
    Small = 1024,
    #[default]
    Medium = 2048,
    Large = 4096,
}

impl FftSize {
    pub fn size(&self) -> usize {
        *self as usize
    }

    /// Analysis hop size (FFT size / 4 = 75% overlap)
    pub fn hop_size(&self) -> usize {
        self.size() / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tempo_range() {
        assert!(validate_tempo(0.5).is_ok());
        assert!(validate_tempo(1.3).is_ok());
        assert!(validate_tempo(2.0).is_ok());
        assert_eq!(validate_tempo(0.49), Err(StretchError::InvalidTempo(0.49)));
        assert_eq!(validate_tempo(2.5), Err(StretchError::InvalidTempo(2.5)));
        assert!(validate_tempo(f32::NAN).is_err());
    }

    #[test]
    fn test_job_validation_order() {
        // Tempo is checked first, before the buffer is looked at
        let job = TempoJob::new(Vec::new(), 0, 3.0);
        assert_eq!(job.validate(), Err(StretchError::InvalidTempo(3.0)));

        let job = TempoJob::new(Vec::new(), 0, 1.5);
        assert_eq!(job.validate(), Err(StretchError::InvalidSampleRate));

        let job = TempoJob::new(Vec::new(), 24000, 1.5);
        assert_eq!(job.validate(), Err(StretchError::EmptyBuffer));

        let job = TempoJob::new(vec![0.0; 10], 24000, 1.5);
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_identity_tempo() {
        assert!(TempoJob::new(vec![0.0], 24000, 1.0).is_identity());
        assert!(is_identity_tempo(1.0005));
        assert!(!is_identity_tempo(1.1));
    }

    #[test]
    fn test_expected_len() {
        assert_eq!(expected_len(24000, 2.0), 12000);
        assert_eq!(expected_len(24000, 0.5), 48000);
        assert_eq!(expected_len(1000, 1.3), 769);
        assert_eq!(TempoJob::new(vec![0.0; 300], 8000, 1.0).expected_len(), 300);
    }

    #[test]
    fn test_fft_size() {
        assert_eq!(FftSize::Small.size(), 1024);
        assert_eq!(FftSize::Medium.size(), 2048);
        assert_eq!(FftSize::Large.size(), 4096);
        assert_eq!(FftSize::default(), FftSize::Medium);
        assert_eq!(FftSize::Medium.hop_size(), 512);
    }
}
