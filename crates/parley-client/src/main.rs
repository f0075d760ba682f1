//! Headless host for the push dispatcher.
//!
//! Reads one JSON object per line from stdin. Objects with a `newToken`
//! field register that token with the backend; anything else is treated as
//! a push payload and rendered to the log.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use parley_client::notifications::LogSurface;
use parley_client::{init_tracing, ClientConfig, ClientState};
use parley_shared::PushPayload;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    let state = ClientState::bootstrap(config).context("Failed to initialise client state")?;
    if let Ok(token) = std::env::var("PARLEY_TOKEN") {
        state.session.set(token, None);
    }

    let dispatcher = state.push_dispatcher(LogSurface);
    dispatcher.ensure_channels();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Skipping malformed line");
                continue;
            }
        };
        match value.get("newToken").and_then(|t| t.as_str()) {
            Some(token) => {
                dispatcher.on_new_token(token).await;
            }
            None => {
                dispatcher.on_message_received(&PushPayload::from_json(&value));
            }
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}
