//! Process-wide client state.
//!
//! [`ClientState`] is built once at startup and shared by every entry point:
//! the UI, the push dispatcher and the call controller.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::sync::broadcast;

use parley_api::{ApiClient, Session};
use parley_store::Database;

use crate::call::CallController;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::events::{event_bus, ClientEvent};
use crate::notifications::{NotificationSurface, PushDispatcher};
use crate::overlay::{OverlayLauncher, WindowSurface};

pub struct ClientState {
    pub config: ClientConfig,

    /// REST client. Clones share the connection pool and the session.
    pub api: ApiClient,

    /// Bearer token and current user id.
    pub session: Arc<Session>,

    /// Local preference store.
    pub database: Arc<Mutex<Database>>,

    /// Fan-out of overlay taps, call state and posted notifications.
    pub events: broadcast::Sender<ClientEvent>,

    /// Runtime that hosts overlay tasks, captured at bootstrap.
    pub runtime: Handle,
}

impl ClientState {
    /// Open the store and build the API client from `config`.
    ///
    /// Must be called from within a tokio runtime; that runtime later
    /// hosts the overlay tasks.
    pub fn bootstrap(config: ClientConfig) -> Result<Self> {
        let database = match &config.data_dir {
            Some(dir) => Database::open_in(dir)?,
            None => Database::new()?,
        };
        Self::with_database(config, database)
    }

    pub fn with_database(config: ClientConfig, database: Database) -> Result<Self> {
        let runtime = Handle::try_current()?;
        let session = Arc::new(Session::new());
        let api = ApiClient::new(config.api_config(), session.clone())?;
        tracing::info!(api = %api.base_url(), "Client state ready");

        Ok(Self {
            config,
            api,
            session,
            database: Arc::new(Mutex::new(database)),
            events: event_bus(),
            runtime,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn push_dispatcher<S: NotificationSurface>(&self, surface: S) -> PushDispatcher<S> {
        PushDispatcher::new(surface, self.database.clone(), self.api.clone())
            .with_events(self.events.clone())
    }

    /// Call controller whose overlays are drawn on surfaces from `factory`.
    ///
    /// Overlay tasks run on the bootstrap runtime, so the controller may be
    /// driven from any thread.
    pub fn call_controller<F, W>(&self, factory: F) -> CallController<F>
    where
        F: FnMut() -> W,
        W: WindowSurface,
    {
        let overlay = OverlayLauncher::new(factory, self.events.clone(), self.runtime.clone());
        CallController::new(overlay, self.events.clone())
    }
}
