use tracing::info;

use crate::core::backend::build_client;
use crate::core::config::Settings;
use crate::core::connectivity::probe;

/// Run one probe against the configured backend. Returns whether it answered.
pub async fn ping(settings: &Settings) -> bool {
    let client = build_client(settings.probe_timeout);
    let connected = probe(&client, &settings.base_url).await;
    info!(base_url = %settings.base_url, connected, "ping finished");
    println!("{}: {}", settings.base_url, ping_label(connected));
    connected
}

pub fn ping_label(connected: bool) -> &'static str {
    if connected {
        "connected"
    } else {
        "unreachable"
    }
}
