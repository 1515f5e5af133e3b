//! Shared fixtures: a scripted speech backend and payload builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use voxtempo::codec::i16_to_pcm16le;
use voxtempo::prelude::*;
use voxtempo::tts::TtsError;

/// Returns a fixed response and records what it was asked.
pub struct ScriptedBackend {
    response: TtsResponse,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<TtsRequest>>>,
}

impl ScriptedBackend {
    pub fn new(response: TtsResponse) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn last_request(&self) -> Arc<Mutex<Option<TtsRequest>>> {
        Arc::clone(&self.last_request)
    }
}

#[async_trait]
impl SpeechBackend for ScriptedBackend {
    async fn synthesize(&self, request: &TtsRequest) -> std::result::Result<TtsResponse, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.response.clone())
    }
}

/// 16-bit sine samples at 220 Hz.
pub fn sine_i16(len: usize, sample_rate: u32) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((2.0 * std::f32::consts::PI * 220.0 * t).sin() * 12_000.0) as i16
        })
        .collect()
}

/// Base64 PCM16LE text for `samples`.
pub fn base64_pcm(samples: &[i16]) -> String {
    STANDARD.encode(i16_to_pcm16le(samples))
}

/// Backend response carrying `len` samples at `sample_rate`.
pub fn l16_response(len: usize, sample_rate: u32) -> TtsResponse {
    TtsResponse::new(
        base64_pcm(&sine_i16(len, sample_rate)),
        format!("audio/L16; rate={sample_rate}"),
    )
}

pub fn engine_with(response: TtsResponse) -> VoxTempo {
    VoxTempo::builder()
        .backend(ScriptedBackend::new(response))
        .build()
        .expect("engine should build")
}

pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
