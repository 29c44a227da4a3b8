//! Pointer events delivered to the drawing surface.

use crate::util::Point;

/// Pointer event with coordinates relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Point),
    /// Pointer moved (with or without the button held)
    Move(Point),
    /// Primary button released
    Up,
}
