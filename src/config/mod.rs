//! Configuration file support for paintbox.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/paintbox/config.toml`. Settings include the canvas size and
//! background, the starting tool selection, export target, gallery location and
//! notification preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportSettings, GalleryConfig, NotificationConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::tool::{MAX_THICKNESS, MIN_THICKNESS, Tool, ToolSelection};

pub const MAX_CANVAS_SIDE: i32 = 8192;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 700
/// height = 400
/// background = "white"
///
/// [drawing]
/// default_tool = "pen"
/// default_color = "#1e90ff"
/// default_thickness = 5.0
/// fill = false
///
/// [export]
/// directory = "~/Pictures/Paintbox"
///
/// [notifications]
/// desktop = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Surface size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Starting tool selection
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Export target for `export`
    #[serde(default)]
    pub export: ExportSettings,

    /// Painting gallery for `save`
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Toast presentation
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to their
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `default_thickness`: 1.0 - 50.0
    fn validate_and_clamp(&mut self) {
        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width, MAX_CANVAS_SIDE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_SIDE);
        }

        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height, MAX_CANVAS_SIDE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_SIDE);
        }

        let thickness = self.drawing.default_thickness;
        if !thickness.is_finite() {
            warn!("Invalid default_thickness {}, using 5.0", thickness);
            self.drawing.default_thickness = 5.0;
        } else if !(MIN_THICKNESS..=MAX_THICKNESS).contains(&thickness) {
            warn!(
                "Invalid default_thickness {:.1}, clamping to {:.1}-{:.1} range",
                thickness, MIN_THICKNESS, MAX_THICKNESS
            );
            self.drawing.default_thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        }

        if self.drawing.default_tool.parse::<Tool>().is_err() {
            warn!(
                "Invalid default_tool '{}', falling back to 'pen'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = "pen".to_string();
        }

        let file_name = self.export.file_name.trim();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            warn!(
                "Invalid export file_name '{}', falling back to 'image.png'",
                self.export.file_name
            );
            self.export.file_name = crate::export::DEFAULT_FILE_NAME.to_string();
        }

        for (name, spec) in [
            ("canvas.background", &self.canvas.background),
            ("drawing.default_color", &self.drawing.default_color),
            ("drawing.eraser_color", &self.drawing.eraser_color),
        ] {
            if !spec.is_valid() {
                warn!("Invalid color {:?} for {}", spec, name);
            }
        }
    }

    /// Tool selection a new session starts with.
    pub fn tool_selection(&self) -> ToolSelection {
        let tool = self.drawing.default_tool.parse().unwrap_or(Tool::Pen);
        ToolSelection::new(
            tool,
            self.drawing.default_color.to_color(),
            self.drawing.default_thickness,
            self.drawing.fill,
            self.drawing.eraser_color.to_color(),
        )
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/paintbox/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("paintbox");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it doesn't exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
