//! Phase Vocoder Processor for Time-Stretching
//!
//! Mono STFT phase vocoder: changes duration while keeping pitch.
//!
//! ## Algorithm Overview
//!
//! 1. **Analysis**: Window input with Hann window, forward FFT, fixed analysis hop
//! 2. **Phase Unwrapping**: Derive each bin's true frequency from the phase advance
//! 3. **Phase Accumulation**: Advance synthesis phases by true frequency × synthesis hop
//! 4. **Synthesis**: Inverse FFT, window, overlap-add at the synthesis hop
//!
//! The synthesis hop is `analysis_hop × stretch_factor`, tracked fractionally so
//! the long-run output/input ratio matches the stretch factor exactly.
//!
//! Input and output are incremental: push any amount, `process`, pop what is
//! ready. `finish` flushes the overlap tail once no more input will arrive.

use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use super::types::FftSize;

/// Phase Vocoder Processor
pub struct PhaseVocoderProcessor {
    // Configuration
    fft_size: usize,
    hop_analysis: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    window_energy: f32,

    // Spectral state
    spectrum: Vec<Complex32>,
    last_phase: Vec<f32>,
    phase_accumulator: Vec<f32>,
    expected_phase_diff: Vec<f32>,

    // Input/output FIFOs
    input_fifo: VecDeque<f32>,
    overlap: Vec<f32>,
    output_fifo: VecDeque<f32>,

    // Fractional synthesis position carried between frames
    synthesis_position: f64,
    frames_processed: usize,
}

impl PhaseVocoderProcessor {
    /// Create a processor, planning both FFT directions up front.
    pub fn new(fft_size: FftSize) -> Self {
        let mut planner = FftPlanner::new();
        Self::with_planner(fft_size, &mut planner)
    }

    /// Create a processor reusing an existing planner's cached plans.
    pub fn with_planner(fft_size: FftSize, planner: &mut FftPlanner<f32>) -> Self {
        let size = fft_size.size();
        let hop = fft_size.hop_size();
        let num_bins = size / 2 + 1;

        let window = Self::create_hann_window(size);
        let window_energy = window.iter().map(|w| w * w).sum();

        // Phase advance of bin k's centre frequency over one analysis hop
        let expected_phase_diff = (0..num_bins)
            .map(|k| TAU * (k as f32) * (hop as f32) / (size as f32))
            .collect();

        Self {
            fft_size: size,
            hop_analysis: hop,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            window,
            window_energy,
            spectrum: vec![Complex32::new(0.0, 0.0); size],
            last_phase: vec![0.0; num_bins],
            phase_accumulator: vec![0.0; num_bins],
            expected_phase_diff,
            input_fifo: VecDeque::with_capacity(size * 2),
            overlap: vec![0.0; size],
            output_fifo: VecDeque::with_capacity(size * 2),
            synthesis_position: 0.0,
            frames_processed: 0,
        }
    }

    /// Periodic Hann window
    fn create_hann_window(size: usize) -> Vec<f32> {
        (0..size)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / size as f32).cos()))
            .collect()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_analysis
    }

    /// Input samples needed ahead of the first real sample so it sees full
    /// window overlap.
    pub fn latency_samples(&self) -> usize {
        self.fft_size - self.hop_analysis
    }

    /// Reset the processor state
    pub fn reset(&mut self) {
        self.spectrum.fill(Complex32::new(0.0, 0.0));
        self.last_phase.fill(0.0);
        self.phase_accumulator.fill(0.0);
        self.input_fifo.clear();
        self.overlap.fill(0.0);
        self.output_fifo.clear();
        self.synthesis_position = 0.0;
        self.frames_processed = 0;
    }

    /// Push input samples into the processor
    #[inline]
    pub fn push_input(&mut self, samples: &[f32]) {
        self.input_fifo.extend(samples.iter().copied());
    }

    /// Get the number of input samples buffered but not yet consumed
    #[inline]
    pub fn input_available(&self) -> usize {
        self.input_fifo.len()
    }

    /// Get the number of output samples ready to pop
    #[inline]
    pub fn output_available(&self) -> usize {
        self.output_fifo.len()
    }

    /// Frames analysed since creation or the last reset
    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Pop output samples from the processor
    ///
    /// Returns the number of samples written; zero means nothing is ready.
    pub fn pop_output(&mut self, output: &mut [f32]) -> usize {
        let count = output.len().min(self.output_fifo.len());
        for (slot, sample) in output.iter_mut().zip(self.output_fifo.drain(..count)) {
            *slot = sample;
        }
        count
    }

    /// Process every complete frame of buffered input.
    ///
    /// `stretch_factor` > 1 lengthens (slower), < 1 shortens (faster).
    pub fn process(&mut self, stretch_factor: f32) {
        let synthesis_step = self.hop_analysis as f64 * f64::from(stretch_factor);

        while self.input_available() >= self.fft_size {
            let start = self.synthesis_position.round() as usize;
            self.synthesis_position += synthesis_step;
            let end = self.synthesis_position.round() as usize;

            let synthesis_hop = (end - start).clamp(1, self.fft_size);
            self.process_frame(synthesis_hop);
        }
    }

    /// Flush everything once input has ended.
    ///
    /// Pads the input with silence so the trailing partial frame is analysed,
    /// then releases the overlap-add tail. Afterwards the processor holds no
    /// pending input; pop until `pop_output` returns zero.
    pub fn finish(&mut self, stretch_factor: f32) {
        if self.input_available() > 0 {
            self.input_fifo
                .extend(std::iter::repeat(0.0).take(self.fft_size));
            self.process(stretch_factor);
            self.input_fifo.clear();
        }

        self.output_fifo.extend(self.overlap.iter().copied());
        self.overlap.fill(0.0);
    }

    /// Process a single STFT frame and emit `synthesis_hop` samples
    fn process_frame(&mut self, synthesis_hop: usize) {
        let num_bins = self.fft_size / 2 + 1;

        // 1. Window the next frame into the FFT buffer
        for (i, (bin, &sample)) in self
            .spectrum
            .iter_mut()
            .zip(self.input_fifo.iter())
            .enumerate()
        {
            *bin = Complex32::new(sample * self.window[i], 0.0);
        }

        // 2. Forward FFT
        self.forward.process(&mut self.spectrum);

        // 3. Phase vocoder: re-time each bin's phase to the synthesis hop
        let time_scale = synthesis_hop as f32 / self.hop_analysis as f32;
        for k in 0..num_bins {
            let magnitude = self.spectrum[k].norm();
            let phase = self.spectrum[k].arg();

            if self.frames_processed == 0 {
                self.phase_accumulator[k] = phase;
            } else {
                let expected = self.expected_phase_diff[k];
                let deviation = Self::wrap_phase(phase - self.last_phase[k] - expected);
                let true_advance = expected + deviation;
                self.phase_accumulator[k] =
                    Self::wrap_phase(self.phase_accumulator[k] + true_advance * time_scale);
            }

            self.last_phase[k] = phase;
            self.spectrum[k] = Complex32::from_polar(magnitude, self.phase_accumulator[k]);
        }

        // 4. Conjugate symmetry so the inverse is real-valued
        for k in 1..num_bins - 1 {
            self.spectrum[self.fft_size - k] = self.spectrum[k].conj();
        }

        // 5. Inverse FFT
        self.inverse.process(&mut self.spectrum);

        // 6. Window and overlap-add. rustfft does not normalize, and the
        // squared-window overlap sums to window_energy / synthesis_hop.
        let gain = synthesis_hop as f32 / (self.fft_size as f32 * self.window_energy);
        for (i, acc) in self.overlap.iter_mut().enumerate() {
            *acc += self.spectrum[i].re * self.window[i] * gain;
        }

        // 7. Release the finished head of the overlap buffer
        self.output_fifo.extend(self.overlap.drain(..synthesis_hop));
        self.overlap.resize(self.fft_size, 0.0);

        self.input_fifo.drain(..self.hop_analysis);
        self.frames_processed += 1;
    }

    /// Wrap phase to [-PI, PI]
    #[inline]
    fn wrap_phase(phase: f32) -> f32 {
        phase - TAU * (phase / TAU).round()
    }
}

impl std::fmt::Debug for PhaseVocoderProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseVocoderProcessor")
            .field("fft_size", &self.fft_size)
            .field("hop_analysis", &self.hop_analysis)
            .field("input_available", &self.input_available())
            .field("output_available", &self.output_available())
            .field("frames_processed", &self.frames_processed)
            .finish()
    }
}
