//! # parley-client
//!
//! Background side of the Parley app: push notification dispatch, the
//! floating call overlay, and the shared state that wires them to the API
//! client and preference store.

pub mod call;
pub mod config;
pub mod error;
pub mod events;
pub mod notifications;
pub mod overlay;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use state::ClientState;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter. Later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("parley_client=debug,parley_api=info,parley_store=info,warn")
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
