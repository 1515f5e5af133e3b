//! The one request shape sent to every speech backend.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};

/// Longest text accepted in one request, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Fastest speaking rate accepted.
pub const MAX_SPEAKING_RATE: f32 = 4.0;

/// Speech synthesis request.
///
/// Optional fields are omitted from the wire body when unset.
///
/// ```ignore
/// let request = TtsRequest::new("Hola", "Kore")
///     .style("cheerful, slightly slower")
///     .speaking_rate(1.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    pub text: String,
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            style: None,
            speaking_rate: None,
        }
    }

    /// Free-text delivery descriptor; blank strings clear it.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        self.style = if style.trim().is_empty() {
            None
        } else {
            Some(style)
        };
        self
    }

    pub fn speaking_rate(mut self, rate: f32) -> Self {
        self.speaking_rate = Some(rate);
        self
    }

    /// Check the request locally. Nothing is sent if this fails.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(TtsError::InvalidRequest("text is empty".into()));
        }
        let chars = self.text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(TtsError::InvalidRequest(format!(
                "text is {chars} characters, limit is {MAX_TEXT_CHARS}"
            )));
        }
        if self.voice.trim().is_empty() {
            return Err(TtsError::InvalidRequest("voice is empty".into()));
        }
        if let Some(rate) = self.speaking_rate {
            if !(rate > 0.0 && rate <= MAX_SPEAKING_RATE) {
                return Err(TtsError::InvalidRequest(format!(
                    "speaking rate {rate} must be in (0, {MAX_SPEAKING_RATE}]"
                )));
            }
        }
        Ok(())
    }
}
