//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::export::{DEFAULT_FILE_NAME, ExportConfig};
use crate::util;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing surface settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Surface height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: i32,

    /// Initial background, also what `clear` paints
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the tool selection a session starts with. Scripts can change
/// these values at runtime.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting tool: pen, eraser, rectangle, circle, triangle, line, star,
    /// hexagon, or a color for an ink tool
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Default stroke color
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default line width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Fill closed shapes instead of outlining them
    #[serde(default)]
    pub fill: bool,

    /// Color painted by the eraser
    #[serde(default = "default_eraser_color")]
    pub eraser_color: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_thickness: default_thickness(),
            fill: false,
            eraser_color: default_eraser_color(),
        }
    }
}

/// Where `export` writes its image.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportSettings {
    /// Output directory; `~` expands to the home directory
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// File name inside the directory
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            file_name: default_file_name(),
        }
    }
}

impl ExportSettings {
    pub fn to_export_config(&self) -> ExportConfig {
        ExportConfig {
            directory: util::expand_tilde(&self.directory),
            file_name: self.file_name.clone(),
        }
    }
}

/// Local gallery the `save` command stores paintings in.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GalleryConfig {
    /// Gallery directory; defaults to `$XDG_DATA_HOME/paintbox/gallery`
    #[serde(default)]
    pub directory: Option<String>,
}

impl GalleryConfig {
    pub fn resolve_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => util::expand_tilde(dir),
            None => default_gallery_directory(),
        }
    }
}

/// Notification preferences.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct NotificationConfig {
    /// Also send freedesktop desktop notifications
    #[serde(default)]
    pub desktop: bool,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> i32 {
    700
}

fn default_canvas_height() -> i32 {
    400
}

fn default_background() -> ColorSpec {
    ColorSpec::named("transparent")
}

fn default_tool() -> String {
    "pen".to_string()
}

fn default_color() -> ColorSpec {
    ColorSpec::named("black")
}

fn default_thickness() -> f64 {
    5.0
}

fn default_eraser_color() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_export_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("Paintbox").display().to_string())
        .unwrap_or_else(|| "~/Pictures/Paintbox".to_string())
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

pub(crate) fn default_gallery_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paintbox")
        .join("gallery")
}
