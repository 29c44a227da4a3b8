//! Drawing tool selection.

use crate::draw::{Color, ShapeKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Valid line thickness range in pixels.
pub const MIN_THICKNESS: f64 = 1.0;
pub const MAX_THICKNESS: f64 = 50.0;

/// Drawing tool selection.
///
/// The active tool determines what is rendered while the pointer is dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tool {
    /// Freehand drawing in the selection color
    Pen,
    /// Freehand drawing in the eraser color
    Eraser,
    /// Shape preview anchored at the pointer-down position
    Shape(ShapeKind),
    /// Freehand drawing in a fixed color picked as the tool itself
    Ink(Color),
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pen => f.write_str("pen"),
            Tool::Eraser => f.write_str("eraser"),
            Tool::Shape(kind) => f.write_str(kind.name()),
            Tool::Ink(color) => write!(f, "{color}"),
        }
    }
}

/// Errors raised when a tool or its parameters cannot be understood.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("unknown tool '{0}' (expected a tool name or a color)")]
    Unknown(String),

    #[error("invalid thickness {0}")]
    InvalidThickness(f64),
}

impl FromStr for Tool {
    type Err = ToolError;

    /// Tool names are matched first; anything else that parses as a color
    /// selects [`Tool::Ink`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let tool = match name.as_str() {
            "pen" | "brush" => Tool::Pen,
            "eraser" => Tool::Eraser,
            "rectangle" | "rect" => Tool::Shape(ShapeKind::Rectangle),
            "circle" => Tool::Shape(ShapeKind::Circle),
            "triangle" => Tool::Shape(ShapeKind::Triangle),
            "line" => Tool::Shape(ShapeKind::Line),
            "star" => Tool::Shape(ShapeKind::Star),
            "hexagon" => Tool::Shape(ShapeKind::Hexagon),
            _ => {
                return s
                    .parse::<Color>()
                    .map(Tool::Ink)
                    .map_err(|_| ToolError::Unknown(s.trim().to_string()));
            }
        };
        Ok(tool)
    }
}

/// Active tool and style parameters.
///
/// Passed by reference into every pointer event. Never mutated in place: use
/// [`ToolSelection::apply`] to derive the next selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSelection {
    pub tool: Tool,
    pub color: Color,
    pub thickness: f64,
    pub fill: bool,
    /// Color painted by [`Tool::Eraser`]
    pub eraser_color: Color,
}

/// A single change requested by the user interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolChange {
    Tool(Tool),
    Color(Color),
    Thickness(f64),
    Fill(bool),
}

impl ToolSelection {
    pub fn new(tool: Tool, color: Color, thickness: f64, fill: bool, eraser_color: Color) -> Self {
        Self {
            tool,
            color,
            thickness: thickness.clamp(MIN_THICKNESS, MAX_THICKNESS),
            fill,
            eraser_color,
        }
    }

    /// Returns the selection with `change` applied.
    ///
    /// Thickness is clamped to `MIN_THICKNESS..=MAX_THICKNESS`; non-finite
    /// thickness leaves the selection unchanged.
    pub fn apply(self, change: ToolChange) -> Self {
        match change {
            ToolChange::Tool(tool) => Self { tool, ..self },
            ToolChange::Color(color) => Self { color, ..self },
            ToolChange::Thickness(thickness) if thickness.is_finite() => Self {
                thickness: thickness.clamp(MIN_THICKNESS, MAX_THICKNESS),
                ..self
            },
            ToolChange::Thickness(thickness) => {
                log::warn!("Ignoring non-finite thickness {thickness}");
                self
            }
            ToolChange::Fill(fill) => Self { fill, ..self },
        }
    }

    /// Stroke style a new stroke starts with.
    pub fn stroke_style(&self) -> StrokeStyle {
        let color = match self.tool {
            Tool::Eraser => self.eraser_color,
            Tool::Ink(color) => color,
            Tool::Pen | Tool::Shape(_) => self.color,
        };
        StrokeStyle {
            color,
            width: self.thickness,
        }
    }
}

/// Color and line width captured when a stroke starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn apply(&self, ctx: &cairo::Context) {
        self.color.apply(ctx);
        ctx.set_line_width(self.width);
    }
}
