//! Local PNG export of the drawing surface.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;

use crate::draw::SurfaceError;

/// File name every export is written under.
pub const DEFAULT_FILE_NAME: &str = "image.png";

/// Errors that can occur while exporting an image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] SurfaceError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

/// Where exported images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory the image is written to (created when missing).
    pub directory: PathBuf,
    /// File name inside `directory`.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Paintbox"),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Ensure the export directory exists, creating it if necessary.
///
/// Returns the canonicalized directory path.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes PNG bytes to the configured export path, replacing any earlier export.
///
/// Returns the path of the written file.
pub fn write_image(image_data: &[u8], config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.directory)?;
    let file_path = directory.join(&config.file_name);

    log::info!(
        "Exporting image to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Writes the image on the blocking pool so the caller's event loop stays responsive.
pub async fn save_image(image_data: Vec<u8>, config: ExportConfig) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || write_image(&image_data, &config))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}
