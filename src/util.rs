//! Utility types and helpers for geometry, identifiers and paths.
//!
//! This module provides:
//! - [`Point`], the pixel coordinate used by pointer events and shape geometry
//! - Distance calculation for radius-based shapes
//! - Owner identifier sanitization for file-backed stores
//! - Tilde expansion for configured directories

use std::path::PathBuf;

// ============================================================================
// Geometry
// ============================================================================

/// Pixel coordinate relative to the drawing surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

// ============================================================================
// Identifiers & paths
// ============================================================================

/// Turns an owner identifier (typically an email address) into a string safe
/// to embed in file names.
///
/// ASCII alphanumerics, `-` and `_` are kept, everything else becomes `_`.
/// Returns `None` when nothing usable remains.
pub fn sanitize_identifier(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sanitized: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '_') {
        None
    } else {
        Some(sanitized)
    }
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
