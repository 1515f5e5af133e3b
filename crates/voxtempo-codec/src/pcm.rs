//! Sample representation conversions.
//!
//! The wire/storage representation is 16-bit signed little-endian PCM; the
//! processing representation is normalized `f32` in `[-1.0, 1.0]`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{CodecError, Result};

/// Bytes per 16-bit sample
pub const BYTES_PER_SAMPLE: usize = 2;

/// Convert a normalized float sample to 16-bit with asymmetric scaling.
///
/// Negative values scale by 32768 and non-negative values by 32767, so the
/// full negative range is reachable without overflowing the positive side.
/// The scaled value is truncated toward zero.
#[inline]
pub fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Inverse of [`float_to_i16`]: exact up to scale.
#[inline]
pub fn i16_to_float(sample: i16) -> f32 {
    if sample < 0 {
        f32::from(sample) / 32768.0
    } else {
        f32::from(sample) / 32767.0
    }
}

/// Normalize a whole buffer of 16-bit samples.
pub fn samples_to_float(samples: &[i16]) -> Vec<f32> {
    samples.iter().copied().map(i16_to_float).collect()
}

/// Interpret raw bytes as 16-bit little-endian PCM.
///
/// An odd byte count means the payload was truncated mid-sample and is
/// rejected rather than silently dropping the last byte.
pub fn pcm16le_to_i16(bytes: &[u8]) -> Result<Vec<i16>> {
    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(CodecError::InvalidData(format!(
            "PCM payload has odd length ({} bytes)",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

/// Serialize 16-bit samples as little-endian bytes.
pub fn i16_to_pcm16le(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Decode standard base64 text into raw bytes.
///
/// Surrounding whitespace is ignored; anything else invalid is an error.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text.trim())?)
}
