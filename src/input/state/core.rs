//! Drawing state machine and surface ownership.

use crate::draw::{Color, Raster, Snapshot, SurfaceError};
use crate::input::tool::StrokeStyle;
use crate::util::Point;

/// Current drawing mode state machine.
///
/// The snapshot only exists inside [`DrawingState::Drawing`], so it cannot be
/// read between a pointer-up and the next pointer-down.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a pointer-down
    Idle,
    /// Pointer held down: a stroke or shape preview is in progress
    Drawing {
        /// Pointer position at pointer-down, fixed for the whole stroke
        anchor: Point,
        /// Raster contents at pointer-down, restored before every preview
        snapshot: Snapshot,
        /// Color and width captured at pointer-down
        style: StrokeStyle,
        /// Pointer positions since pointer-down, anchor first (freehand path)
        points: Vec<Point>,
    },
}

/// Drawing surface controller.
///
/// Owns the raster and the Cairo context bound to it for its whole lifetime,
/// translates pointer events into draw operations and keeps the single-slot
/// snapshot used to erase shape previews.
pub struct DrawingSurface {
    pub(super) raster: Raster,
    pub(super) ctx: cairo::Context,
    pub(super) state: DrawingState,
}

impl DrawingSurface {
    /// Creates a `width` x `height` surface painted with `background`.
    ///
    /// This is the only way to obtain a surface: every drawing operation runs
    /// on a handle whose raster and context were successfully created.
    ///
    /// # Errors
    /// Returns [`SurfaceError::InvalidSize`] for non-positive dimensions and
    /// [`SurfaceError::Cairo`] if Cairo cannot allocate the surface.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, SurfaceError> {
        let raster = Raster::new(width, height, background)?;
        let ctx = cairo::Context::new(raster.surface())?;
        ctx.set_antialias(cairo::Antialias::Best);
        raster.fill_background(&ctx)?;

        log::debug!(
            "Created {}x{} drawing surface (background {})",
            width,
            height,
            background
        );

        Ok(Self {
            raster,
            ctx,
            state: DrawingState::Idle,
        })
    }

    pub fn width(&self) -> i32 {
        self.raster.width()
    }

    pub fn height(&self) -> i32 {
        self.raster.height()
    }

    pub fn background(&self) -> Color {
        self.raster.background()
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Whether a pointer-down is in effect.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Anchor point of the stroke in progress, if any.
    pub fn anchor(&self) -> Option<Point> {
        match &self.state {
            DrawingState::Drawing { anchor, .. } => Some(*anchor),
            DrawingState::Idle => None,
        }
    }

    /// Copies the current raster contents.
    pub fn snapshot(&self) -> Result<Snapshot, SurfaceError> {
        self.raster.snapshot()
    }

    /// Encodes the current raster contents as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.raster.encode_png()
    }

    /// Premultiplied `0xAARRGGBB` pixel at (x, y).
    pub fn pixel(&self, x: i32, y: i32) -> Result<Option<u32>, SurfaceError> {
        Ok(self.raster.snapshot()?.pixel(x, y))
    }
}
