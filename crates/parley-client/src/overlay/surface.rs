use thiserror::Error;

use super::drag::Offset;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("overlay permission not granted")]
    PermissionDenied,

    #[error("window surface error: {0}")]
    Surface(String),
}

/// What the overlay window shows.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub display_name: String,
    pub duration: String,
    pub muted: bool,
    pub position: Offset,
}

/// Adapter to the platform's always-on-top window manager.
pub trait WindowSurface: Send + 'static {
    type Window: Send + 'static;

    fn attach(&mut self, layout: &OverlayLayout) -> Result<Self::Window, OverlayError>;
    fn set_duration(&mut self, window: &mut Self::Window, text: &str) -> Result<(), OverlayError>;
    fn set_muted(&mut self, window: &mut Self::Window, muted: bool) -> Result<(), OverlayError>;
    fn move_to(&mut self, window: &mut Self::Window, position: Offset) -> Result<(), OverlayError>;
    /// Must not fail; called from `Drop`.
    fn detach(&mut self, window: Self::Window);
}

/// Surface that only logs, for headless hosts.
#[derive(Debug, Default)]
pub struct LogWindowSurface {
    next_id: u32,
}

impl WindowSurface for LogWindowSurface {
    type Window = u32;

    fn attach(&mut self, layout: &OverlayLayout) -> Result<u32, OverlayError> {
        self.next_id += 1;
        tracing::info!(window = self.next_id, name = %layout.display_name, "Overlay attached");
        Ok(self.next_id)
    }

    fn set_duration(&mut self, window: &mut u32, text: &str) -> Result<(), OverlayError> {
        tracing::trace!(window = *window, text, "Overlay duration");
        Ok(())
    }

    fn set_muted(&mut self, window: &mut u32, muted: bool) -> Result<(), OverlayError> {
        tracing::debug!(window = *window, muted, "Overlay mute indicator");
        Ok(())
    }

    fn move_to(&mut self, window: &mut u32, position: Offset) -> Result<(), OverlayError> {
        tracing::trace!(window = *window, x = position.x, y = position.y, "Overlay moved");
        Ok(())
    }

    fn detach(&mut self, window: u32) {
        tracing::info!(window, "Overlay detached");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Attach(String),
        Duration(u32, String),
        Muted(u32, bool),
        Move(u32, Offset),
        Detach(u32),
    }

    /// Records every surface call; clones share the log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSurface {
        pub ops: Arc<Mutex<Vec<Op>>>,
        pub next_id: u32,
        pub deny: bool,
    }

    impl RecordingSurface {
        pub fn ops(&self) -> Vec<Op> {
            self.ops.lock().unwrap().clone()
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.lock().unwrap().iter().filter(|op| pred(op)).count()
        }
    }

    impl WindowSurface for RecordingSurface {
        type Window = u32;

        fn attach(&mut self, layout: &OverlayLayout) -> Result<u32, OverlayError> {
            if self.deny {
                return Err(OverlayError::PermissionDenied);
            }
            self.next_id += 1;
            self.ops.lock().unwrap().push(Op::Attach(layout.display_name.clone()));
            Ok(self.next_id)
        }

        fn set_duration(&mut self, window: &mut u32, text: &str) -> Result<(), OverlayError> {
            self.ops.lock().unwrap().push(Op::Duration(*window, text.to_string()));
            Ok(())
        }

        fn set_muted(&mut self, window: &mut u32, muted: bool) -> Result<(), OverlayError> {
            self.ops.lock().unwrap().push(Op::Muted(*window, muted));
            Ok(())
        }

        fn move_to(&mut self, window: &mut u32, position: Offset) -> Result<(), OverlayError> {
            self.ops.lock().unwrap().push(Op::Move(*window, position));
            Ok(())
        }

        fn detach(&mut self, window: u32) {
            self.ops.lock().unwrap().push(Op::Detach(window));
        }
    }
}
