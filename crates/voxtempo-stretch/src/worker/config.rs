//! Tempo worker configuration.

use crate::time_stretch::FftSize;

/// Configuration for the stretch driver and its worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchConfig {
    /// Input frames fed to the vocoder per iteration (default: 8192)
    pub chunk_frames: usize,
    /// Analysis FFT size (default: 2048, hop 512)
    pub fft_size: FftSize,
    /// Pending command slots on the worker queue (default: 4)
    pub channel_capacity: usize,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            chunk_frames: 8192,
            fft_size: FftSize::Medium,
            channel_capacity: 4,
        }
    }
}

impl StretchConfig {
    pub fn chunk_frames(mut self, frames: usize) -> Self {
        self.chunk_frames = frames;
        self
    }

    pub fn fft_size(mut self, size: FftSize) -> Self {
        self.fft_size = size;
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Checked by the worker during initialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_frames == 0 {
            return Err("chunk_frames must be at least 1".into());
        }
        if self.channel_capacity == 0 {
            return Err("channel_capacity must be at least 1".into());
        }
        Ok(())
    }
}
