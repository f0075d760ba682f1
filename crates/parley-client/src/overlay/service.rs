use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::{emit_event, ClientEvent};

use super::drag::{DragTracker, Offset, PointerEvent};
use super::surface::{OverlayError, OverlayLayout, WindowSurface};

/// Tap targets on the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayAction {
    ToggleMute,
    EndCall,
    ExpandToApp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    Start { display_name: String, duration: String },
    Update { duration: String },
    SetMuted(bool),
    Pointer(PointerEvent),
    Tap(OverlayAction),
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

struct OverlayView<Win> {
    window: Win,
    layout: OverlayLayout,
    drag: DragTracker,
}

/// The floating in-call window: hidden until started, showing until stopped.
///
/// Dropping the service releases a window that is still attached.
pub struct OverlayService<W: WindowSurface> {
    surface: W,
    view: Option<OverlayView<W::Window>>,
    events: broadcast::Sender<ClientEvent>,
}

impl<W: WindowSurface> OverlayService<W> {
    pub fn new(surface: W, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            surface,
            view: None,
            events,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.view.is_some()
    }

    pub fn layout(&self) -> Option<&OverlayLayout> {
        self.view.as_ref().map(|v| &v.layout)
    }

    /// Show the window. A second start while showing changes nothing and
    /// returns `false`.
    pub fn start(&mut self, display_name: &str, duration: &str) -> Result<bool, OverlayError> {
        if self.view.is_some() {
            debug!("Overlay already showing");
            return Ok(false);
        }
        let layout = OverlayLayout {
            display_name: display_name.to_string(),
            duration: duration.to_string(),
            muted: false,
            position: Offset::default(),
        };
        let window = self.surface.attach(&layout)?;
        info!(name = display_name, "Call overlay shown");
        self.view = Some(OverlayView {
            window,
            layout,
            drag: DragTracker::default(),
        });
        Ok(true)
    }

    /// Replace the duration text. No-op while hidden.
    pub fn update(&mut self, duration: &str) -> Result<bool, OverlayError> {
        let Some(view) = self.view.as_mut() else {
            return Ok(false);
        };
        self.surface.set_duration(&mut view.window, duration)?;
        view.layout.duration = duration.to_string();
        Ok(true)
    }

    pub fn set_muted(&mut self, muted: bool) -> Result<bool, OverlayError> {
        let Some(view) = self.view.as_mut() else {
            return Ok(false);
        };
        if view.layout.muted != muted {
            self.surface.set_muted(&mut view.window, muted)?;
            view.layout.muted = muted;
        }
        Ok(true)
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Result<(), OverlayError> {
        let Some(view) = self.view.as_mut() else {
            return Ok(());
        };
        match event {
            PointerEvent::Down(pointer) => view.drag.begin(pointer, view.layout.position),
            PointerEvent::Move(pointer) => {
                if let Some(position) = view.drag.position(pointer) {
                    self.surface.move_to(&mut view.window, position)?;
                    view.layout.position = position;
                }
            }
            PointerEvent::Up => {
                view.drag.end();
            }
        }
        Ok(())
    }

    /// Forward a tap to whoever owns the call.
    pub fn tap(&self, action: OverlayAction) {
        if self.view.is_none() {
            return;
        }
        debug!(?action, "Overlay tapped");
        emit_event(&self.events, ClientEvent::OverlayAction(action));
    }

    /// Hide the window. Returns whether it was showing.
    pub fn stop(&mut self) -> bool {
        match self.view.take() {
            Some(view) => {
                self.surface.detach(view.window);
                info!("Call overlay hidden");
                true
            }
            None => false,
        }
    }

    /// Apply one queued command, logging rather than returning failures.
    pub fn handle(&mut self, command: OverlayCommand) -> Flow {
        let result = match command {
            OverlayCommand::Start { display_name, duration } => {
                self.start(&display_name, &duration).map(drop)
            }
            OverlayCommand::Update { duration } => self.update(&duration).map(drop),
            OverlayCommand::SetMuted(muted) => self.set_muted(muted).map(drop),
            OverlayCommand::Pointer(event) => self.pointer(event),
            OverlayCommand::Tap(action) => {
                self.tap(action);
                Ok(())
            }
            OverlayCommand::Stop => {
                self.stop();
                return Flow::Terminate;
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "Overlay command failed");
        }
        Flow::Continue
    }
}

impl<W: WindowSurface> Drop for OverlayService<W> {
    fn drop(&mut self) {
        self.stop();
    }
}
