//! Backend reachability.
//!
//! [`probe`] issues exactly one health-check round trip and folds every
//! failure into `false`. [`ConnectivityState`] holds the most recent result;
//! it can only change by running a probe. Callers pick the cadence.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::RunRequest;
use crate::core::backend::{self, BackendError};

/// One health check against `{base_url}/run`.
///
/// Resolves to `true` when the backend answers 2xx with a JSON body carrying a
/// string `status`. Network errors, timeouts configured on `client`, non-2xx
/// responses, and malformed bodies all resolve to `false`.
pub async fn probe(client: &reqwest::Client, base_url: &str) -> bool {
    match check(client, base_url).await {
        Ok(status) => {
            debug!(backend.status = %status, "probe succeeded");
            true
        }
        Err(err) => {
            debug!(error = %err, "probe failed");
            false
        }
    }
}

async fn check(client: &reqwest::Client, base_url: &str) -> Result<String, BackendError> {
    backend::run(client, base_url, &RunRequest::ping())
        .await
        .map(|response| response.status)
}

/// Last known reachability of the backend, observable by the renderer.
#[derive(Debug, Clone)]
pub struct ConnectivityState {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityState {
    /// Starts disconnected until the first probe resolves.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_connected(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Run one probe and record its result. Concurrent refreshes are
    /// independent; whichever resolves last wins.
    pub async fn refresh(&self, client: &reqwest::Client, base_url: &str) -> bool {
        let connected = probe(client, base_url).await;
        self.record(connected);
        connected
    }

    /// A completed prompt round trip is proof of reachability too.
    pub(crate) fn record(&self, connected: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != connected;
            *current = connected;
            changed
        });
    }
}
