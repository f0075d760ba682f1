//! Runs an [`OverlayService`] on its own task.
//!
//! All commands go through one unbounded queue, so the service never sees
//! two commands at once and needs no locking.

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::events::ClientEvent;

use super::drag::PointerEvent;
use super::service::{Flow, OverlayAction, OverlayCommand, OverlayService};
use super::surface::WindowSurface;

/// Sender side of a running overlay. Clones feed the same task.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    tx: mpsc::UnboundedSender<OverlayCommand>,
}

impl OverlayHandle {
    /// Queue a command. Returns `false` once the task has ended.
    pub fn send(&self, command: OverlayCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Spawn `service` on `runtime` and return its command handle.
///
/// The task ends after a `Stop` command or once every handle is dropped;
/// either way the service is dropped and its window released. The caller
/// does not need to be inside the runtime.
pub fn spawn_overlay<W: WindowSurface>(
    runtime: &Handle,
    mut service: OverlayService<W>,
) -> (OverlayHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let join = runtime.spawn(async move {
        while let Some(command) = rx.recv().await {
            if service.handle(command) == Flow::Terminate {
                break;
            }
        }
        debug!("Overlay task finished");
    });
    (OverlayHandle { tx }, join)
}

/// Starts overlay tasks on demand, one at a time.
///
/// Each `start` after a `stop` spawns a fresh task with a fresh surface
/// from `factory`. Tasks run on the runtime captured at construction, so
/// platform callbacks on foreign threads may drive the launcher.
pub struct OverlayLauncher<F> {
    factory: F,
    events: broadcast::Sender<ClientEvent>,
    runtime: Handle,
    running: Option<(OverlayHandle, JoinHandle<()>)>,
}

impl<F, W> OverlayLauncher<F>
where
    F: FnMut() -> W,
    W: WindowSurface,
{
    pub fn new(factory: F, events: broadcast::Sender<ClientEvent>, runtime: Handle) -> Self {
        Self {
            factory,
            events,
            runtime,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|(handle, _)| handle.is_running())
    }

    pub fn start(&mut self, display_name: &str, duration: &str) {
        if !self.is_running() {
            let service = OverlayService::new((self.factory)(), self.events.clone());
            self.running = Some(spawn_overlay(&self.runtime, service));
        }
        self.send(OverlayCommand::Start {
            display_name: display_name.to_string(),
            duration: duration.to_string(),
        });
    }

    pub fn update(&self, duration: &str) {
        self.send(OverlayCommand::Update {
            duration: duration.to_string(),
        });
    }

    pub fn set_muted(&self, muted: bool) {
        self.send(OverlayCommand::SetMuted(muted));
    }

    pub fn pointer(&self, event: PointerEvent) {
        self.send(OverlayCommand::Pointer(event));
    }

    pub fn tap(&self, action: OverlayAction) {
        self.send(OverlayCommand::Tap(action));
    }

    /// Stop the running task, if any. The returned handle resolves once the
    /// window has been released.
    pub fn stop(&mut self) -> Option<JoinHandle<()>> {
        let (handle, join) = self.running.take()?;
        handle.send(OverlayCommand::Stop);
        Some(join)
    }

    fn send(&self, command: OverlayCommand) {
        let Some((handle, _)) = &self.running else {
            return;
        };
        if !handle.send(command) {
            debug!("Overlay task not running, command dropped");
        }
    }
}
