//! Chunked offline stretching of a whole mono buffer.

use rustfft::FftPlanner;

use super::phase_vocoder::PhaseVocoderProcessor;
use super::types::{expected_len, TempoJob};
use crate::error::Result;
use crate::worker::StretchConfig;

/// Validate a job and stretch its buffer.
pub fn stretch(job: &TempoJob, config: &StretchConfig) -> Result<Vec<f32>> {
    job.validate()?;
    Ok(stretch_mono(&job.buffer, job.tempo, config))
}

/// Stretch a mono buffer to `round(len / tempo)` samples without moving pitch.
///
/// Input is fed `config.chunk_frames` at a time; after each chunk every ready
/// output sample is collected in order. When input runs out the processor is
/// finished and drained until it reports no more output. The chunk size only
/// changes peak buffering, never the result.
pub fn stretch_mono(samples: &[f32], tempo: f32, config: &StretchConfig) -> Vec<f32> {
    let mut planner = FftPlanner::new();
    stretch_mono_with_planner(samples, tempo, config, &mut planner)
}

pub(crate) fn stretch_mono_with_planner(
    samples: &[f32],
    tempo: f32,
    config: &StretchConfig,
    planner: &mut FftPlanner<f32>,
) -> Vec<f32> {
    let target = expected_len(samples.len(), tempo);
    if samples.is_empty() || target == 0 {
        return Vec::new();
    }

    let stretch_factor = 1.0 / tempo;
    let chunk_frames = config.chunk_frames.max(1);
    let mut vocoder = PhaseVocoderProcessor::with_planner(config.fft_size, planner);

    // Lead-in silence gives the first real sample full window overlap;
    // its stretched length is cut from the front afterwards.
    let lead_in = vocoder.latency_samples();
    let lead_out = (lead_in as f64 * f64::from(stretch_factor)).round() as usize;
    vocoder.push_input(&vec![0.0; lead_in]);

    let mut output = Vec::with_capacity(target + lead_out + config.fft_size.size());
    let mut scratch = vec![0.0f32; chunk_frames];
    let mut chunks = 0usize;

    for chunk in samples.chunks(chunk_frames) {
        vocoder.push_input(chunk);
        vocoder.process(stretch_factor);
        collect_ready(&mut vocoder, &mut scratch, &mut output);
        chunks += 1;
    }

    vocoder.finish(stretch_factor);
    collect_ready(&mut vocoder, &mut scratch, &mut output);

    let produced = output.len();
    output.drain(..lead_out.min(produced));
    if output.len() < target {
        tracing::warn!(
            produced = output.len(),
            target,
            "stretch produced short output, padding with silence"
        );
        output.resize(target, 0.0);
    }
    output.truncate(target);

    tracing::debug!(
        input = samples.len(),
        output = output.len(),
        tempo,
        chunks,
        frames = vocoder.frames_processed(),
        "stretched buffer"
    );

    output
}

/// Pop until the processor reports nothing ready.
fn collect_ready(vocoder: &mut PhaseVocoderProcessor, scratch: &mut [f32], output: &mut Vec<f32>) {
    loop {
        let count = vocoder.pop_output(scratch);
        if count == 0 {
            break;
        }
        output.extend_from_slice(&scratch[..count]);
    }
}
