//! Floating in-call window shown while the app is in the background.

pub mod drag;
pub mod service;
pub mod surface;
pub mod task;

pub use drag::{DragTracker, Offset, PointerEvent};
pub use service::{Flow, OverlayAction, OverlayCommand, OverlayService};
pub use surface::{LogWindowSurface, OverlayError, OverlayLayout, WindowSurface};
pub use task::{spawn_overlay, OverlayHandle, OverlayLauncher};
