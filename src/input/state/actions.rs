use std::path::PathBuf;

use crate::draw::SurfaceError;
use crate::export::{self, ExportConfig, ExportError};
use crate::persist::{PersistError, PersistManager};

use super::{DrawingState, DrawingSurface};

impl DrawingSurface {
    /// Erases the whole raster back to the surface background.
    ///
    /// A stroke in progress is abandoned along with its snapshot, so a later
    /// pointer-move cannot bring the old contents back.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        if self.is_drawing() {
            log::debug!("Clear while drawing: abandoning stroke in progress");
        }
        self.state = DrawingState::Idle;
        self.ctx.new_path();
        self.raster.fill_background(&self.ctx)?;
        log::info!("Surface cleared");
        Ok(())
    }

    /// Encodes the raster as PNG and writes it to the export target.
    ///
    /// Returns the path of the written file.
    pub fn export_image(&self, config: &ExportConfig) -> Result<PathBuf, ExportError> {
        let png = self.raster.encode_png()?;
        export::write_image(&png, config)
    }

    /// Encodes the raster and hands it to `manager` for storage under `owner`.
    ///
    /// Returns as soon as the request is queued; the raster is never touched
    /// by the store. Store failures (including a blank owner) arrive later as
    /// failed outcomes on the manager.
    pub fn persist(&self, owner: &str, manager: &PersistManager) -> Result<(), PersistError> {
        let png = self.raster.encode_png()?;
        manager.request(owner, png);
        Ok(())
    }
}
