//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used by the drawing surface:
//! - [`Color`]: RGBA color representation with a named palette and parsing
//! - [`Raster`] / [`Snapshot`]: the pixel buffer and immutable copies of it
//! - [`ShapeKind`]: geometric primitives drawn from an anchor to the pointer
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod raster;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use color::{Color, ParseColorError};
pub use raster::{Raster, Snapshot, SurfaceError};
pub use render::{render_freehand, render_shape};
pub use shape::ShapeKind;

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
