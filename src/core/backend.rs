//! HTTP round trips to the backend.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{RunRequest, RunResponse};
use crate::utils::url::construct_api_url;

pub const RUN_ENDPOINT: &str = "run";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl BackendError {
    /// Whether the backend could not be reached at all, as opposed to
    /// answering badly.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }
}

pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            debug!(error = %err, "falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// POST `request` to `{base_url}/run` and decode the reply.
pub async fn run(
    client: &reqwest::Client,
    base_url: &str,
    request: &RunRequest,
) -> Result<RunResponse, BackendError> {
    let url = construct_api_url(base_url, RUN_ENDPOINT);
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(BackendError::Status {
            status,
            body: body.trim().to_string(),
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMessage {
    Reply(String),
    Error { message: String, unreachable: bool },
}

/// Runs prompts on the tokio runtime and reports results over a channel
/// tagged with the request id.
#[derive(Clone)]
pub struct PromptService {
    tx: mpsc::UnboundedSender<(ReplyMessage, u64)>,
}

impl PromptService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(ReplyMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_prompt(
        &self,
        client: reqwest::Client,
        base_url: String,
        prompt: String,
        request_id: u64,
    ) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = match run(&client, &base_url, &RunRequest::new(prompt)).await {
                Ok(response) => ReplyMessage::Reply(response.display_text().to_string()),
                Err(err) => {
                    debug!(error = %err, request_id, "prompt failed");
                    ReplyMessage::Error {
                        unreachable: err.is_transport(),
                        message: err.to_string(),
                    }
                }
            };
            let _ = tx.send((message, request_id));
        });
    }
}
