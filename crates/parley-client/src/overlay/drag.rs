use std::ops::{Add, Sub};

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Offset),
    Move(Offset),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    pointer: Offset,
    window: Offset,
}

/// Follows one drag gesture on the overlay.
///
/// Positions are not clamped to the screen; the window manager decides
/// what happens off-edge.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    origin: Option<DragOrigin>,
}

impl DragTracker {
    pub fn begin(&mut self, pointer: Offset, window: Offset) {
        self.origin = Some(DragOrigin { pointer, window });
    }

    /// Window position for the current pointer, or `None` outside a drag.
    pub fn position(&self, pointer: Offset) -> Option<Offset> {
        self.origin
            .map(|origin| origin.window + (pointer - origin.pointer))
    }

    /// Finish the gesture. Returns whether one was in progress.
    pub fn end(&mut self) -> bool {
        self.origin.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_pointer_relative_to_origin() {
        let mut drag = DragTracker::default();
        drag.begin(Offset::new(100.0, 200.0), Offset::new(10.0, 20.0));

        assert_eq!(drag.position(Offset::new(130.0, 180.0)), Some(Offset::new(40.0, 0.0)));
        assert_eq!(drag.position(Offset::new(100.0, 200.0)), Some(Offset::new(10.0, 20.0)));
    }

    #[test]
    fn no_clamping_off_screen() {
        let mut drag = DragTracker::default();
        drag.begin(Offset::new(50.0, 50.0), Offset::default());
        assert_eq!(
            drag.position(Offset::new(-500.0, 5000.0)),
            Some(Offset::new(-550.0, 4950.0))
        );
    }

    #[test]
    fn moves_outside_gesture_are_ignored() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.position(Offset::new(1.0, 1.0)), None);
        assert!(!drag.end());

        drag.begin(Offset::default(), Offset::default());
        assert!(drag.is_dragging());
        assert!(drag.end());
        assert_eq!(drag.position(Offset::new(1.0, 1.0)), None);
    }
}
