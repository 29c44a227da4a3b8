//! Input handling and tool state machine.
//!
//! This module translates pointer events into drawing operations on a
//! [`DrawingSurface`]. Tool, color, thickness and fill live in an immutable
//! [`ToolSelection`] passed in with every event.

pub mod events;
pub mod state;
pub mod tool;

pub use events::PointerEvent;
pub use state::{DrawingState, DrawingSurface};
pub use tool::{StrokeStyle, Tool, ToolChange, ToolError, ToolSelection};
