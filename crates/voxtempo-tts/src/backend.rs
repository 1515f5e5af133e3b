//! Speech backends.
//!
//! [`SpeechBackend`] is the seam between the pipeline and whatever produces
//! speech. [`HttpSpeechBackend`] talks JSON over HTTP; tests substitute fakes.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::TtsConfig;
use crate::error::{Result, TtsError};
use crate::request::TtsRequest;
use crate::response::TtsResponse;

/// Produces a [`TtsResponse`] for a request.
///
/// Implementations may assume `request` has already passed
/// [`TtsRequest::validate`].
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse>;
}

/// JSON-over-HTTP speech service client.
#[derive(Debug, Clone)]
pub struct HttpSpeechBackend {
    client: Client,
    config: TtsConfig,
}

impl HttpSpeechBackend {
    pub fn new(config: TtsConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TtsConfig {
        &self.config
    }

    async fn attempt(&self, request: &TtsRequest) -> Result<TtsResponse> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Status {
                status: status.as_u16(),
                message: upstream_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TtsError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SpeechBackend for HttpSpeechBackend {
    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse> {
        let policy = self.config.retry;
        let mut attempt = 0;

        loop {
            match self.attempt(request).await {
                Ok(response) => {
                    info!(
                        voice = %request.voice,
                        chars = request.text.chars().count(),
                        attempts = attempt + 1,
                        "Speech synthesized"
                    );
                    return Ok(response);
                }
                Err(e) if e.is_transient() && attempt < policy.max_retries => {
                    let delay = policy.delay_for(attempt);
                    warn!(error = %e, attempt = attempt + 1, ?delay, "Retrying speech request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(error = %e, attempts = attempt + 1, "Speech request failed");
                    return Err(e);
                }
            }
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}`, `{"error": {"message": "..."}}` and
/// `{"message": "..."}`; otherwise returns the trimmed body if it is short text.
fn upstream_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .get("error")
            .and_then(|error| error.as_str().or_else(|| error.get("message")?.as_str()))
            .or_else(|| value.get("message")?.as_str());
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }

    (body.len() <= 512).then(|| body.to_string())
}
