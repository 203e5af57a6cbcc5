//! Wire types for the backend's `/run` endpoint.

use serde::{Deserialize, Serialize};

/// Prompt sent by the health probe.
pub const PING_PROMPT: &str = "ping";

#[derive(Debug, Clone, Serialize)]
pub struct RunRequest {
    pub prompt: String,
}

impl RunRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn ping() -> Self {
        Self::new(PING_PROMPT)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RunResponse {
    pub status: String,
    #[serde(default, alias = "response")]
    pub output: Option<String>,
}

impl RunResponse {
    /// Text to show in the transcript: the output when present, else the
    /// status.
    pub fn display_text(&self) -> &str {
        match self.output.as_deref() {
            Some(output) if !output.trim().is_empty() => output,
            _ => &self.status,
        }
    }
}
