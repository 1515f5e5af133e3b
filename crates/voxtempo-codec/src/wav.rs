//! WAV container encoder/decoder using hound
//!
//! Produces canonical 44-byte-header RIFF/WAVE files: PCM, mono, 16-bit.

use crate::error::{CodecError, Result};
use crate::pcm::{float_to_i16, i16_to_float, i16_to_pcm16le, BYTES_PER_SAMPLE};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};

/// Size of the canonical PCM header in bytes
pub const WAV_HEADER_LEN: usize = 44;

/// Channel count of every container we produce
pub const CHANNELS: u16 = 1;

/// Bit depth of every container we produce
pub const BITS_PER_SAMPLE: u16 = 16;

/// A mono sample buffer in one of its two representations.
#[derive(Debug, Clone, Copy)]
pub enum AudioSamples<'a> {
    /// Wire representation (16-bit signed)
    Int16(&'a [i16]),
    /// Processing representation (normalized float)
    Float32(&'a [f32]),
}

impl AudioSamples<'_> {
    pub fn len(&self) -> usize {
        match self {
            AudioSamples::Int16(s) => s.len(),
            AudioSamples::Float32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Header fields of a parsed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Samples per channel
    pub sample_count: usize,
}

impl WavHeader {
    /// Block align: bytes per frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    /// Payload length as declared by the data chunk.
    pub fn data_len(&self) -> usize {
        self.sample_count * usize::from(self.block_align())
    }
}

/// Audio recovered from a container, in processing representation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Encode a mono buffer into a complete container.
///
/// Every size field is derived from this call's sample count and rate;
/// nothing is cached between calls.
pub fn encode_wav(samples: AudioSamples<'_>, sample_rate: u32) -> Result<Vec<u8>> {
    if samples.is_empty() {
        return Err(CodecError::InvalidData("cannot encode an empty buffer".into()));
    }
    if sample_rate == 0 {
        return Err(CodecError::InvalidData("sample rate must be positive".into()));
    }

    let spec = mono_spec(sample_rate);
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + samples.len() * BYTES_PER_SAMPLE);
    {
        let cursor = Cursor::new(&mut buffer);
        let mut writer = WavWriter::new(cursor, spec)?;

        match samples {
            AudioSamples::Int16(s) => write_samples(&mut writer, s.iter().copied())?,
            AudioSamples::Float32(s) => {
                write_samples(&mut writer, s.iter().copied().map(float_to_i16))?
            }
        }

        // Finalize rewrites the RIFF and data sizes and flushes
        writer.finalize()?;
    }

    tracing::trace!(
        samples = samples.len(),
        sample_rate,
        bytes = buffer.len(),
        "encoded wav container"
    );

    Ok(buffer)
}

/// Encode 16-bit samples (the lossless path).
pub fn encode_wav_i16(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    encode_wav(AudioSamples::Int16(samples), sample_rate)
}

/// Encode normalized float samples, converting with [`float_to_i16`].
pub fn encode_wav_f32(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    encode_wav(AudioSamples::Float32(samples), sample_rate)
}

/// Parse the header of a container without reading its payload.
pub fn read_header(bytes: &[u8]) -> Result<WavHeader> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    Ok(WavHeader {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        sample_count: reader.duration() as usize,
    })
}

/// Decode a mono 16-bit container into normalized floats.
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio> {
    let mut reader = open_mono_pcm16(bytes)?;
    let sample_rate = reader.spec().sample_rate;

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(i16_to_float))
        .collect::<std::result::Result<Vec<f32>, hound::Error>>()?;

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

/// Extract the raw little-endian payload bytes of a mono 16-bit container.
pub fn wav_payload(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut reader = open_mono_pcm16(bytes)?;

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, hound::Error>>()?;

    Ok(i16_to_pcm16le(&samples))
}

fn mono_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

fn open_mono_pcm16(bytes: &[u8]) -> Result<WavReader<Cursor<&[u8]>>> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels != CHANNELS
        || spec.bits_per_sample != BITS_PER_SAMPLE
        || spec.sample_format != SampleFormat::Int
    {
        return Err(CodecError::Unsupported(format!(
            "expected mono 16-bit PCM, got {} channel(s) at {} bits ({:?})",
            spec.channels, spec.bits_per_sample, spec.sample_format
        )));
    }

    Ok(reader)
}

fn write_samples<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    samples: impl Iterator<Item = i16>,
) -> Result<()> {
    for sample in samples {
        writer.write_sample(sample)?;
    }
    Ok(())
}
