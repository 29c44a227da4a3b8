use crate::draw::{SurfaceError, render_freehand, render_shape};
use crate::input::events::PointerEvent;
use crate::input::tool::{Tool, ToolSelection};
use crate::util::Point;

use super::{DrawingState, DrawingSurface};

impl DrawingSurface {
    /// Dispatches a pointer event to the matching handler.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        selection: &ToolSelection,
    ) -> Result<(), SurfaceError> {
        match event {
            PointerEvent::Down(point) => self.on_pointer_down(point, selection),
            PointerEvent::Move(point) => self.on_pointer_move(point, selection),
            PointerEvent::Up => {
                self.on_pointer_up();
                Ok(())
            }
        }
    }

    /// Processes a pointer-down event.
    ///
    /// # Behavior
    /// - Captures the stroke style from `selection`
    /// - Takes a snapshot of the raster
    /// - Records `point` as the anchor and enters the drawing state
    ///
    /// A pointer-down while already drawing starts a new stroke: the previous
    /// snapshot is dropped and whatever the last preview showed stays.
    pub fn on_pointer_down(
        &mut self,
        point: Point,
        selection: &ToolSelection,
    ) -> Result<(), SurfaceError> {
        let snapshot = self.raster.snapshot()?;
        let style = selection.stroke_style();

        self.ctx.new_path();
        style.apply(&self.ctx);

        log::debug!(
            "Stroke started at ({:.1}, {:.1}) with {} (color {}, width {:.1})",
            point.x,
            point.y,
            selection.tool,
            style.color,
            style.width
        );

        self.state = DrawingState::Drawing {
            anchor: point,
            snapshot,
            style,
            points: vec![point],
        };
        Ok(())
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Idle: nothing happens
    /// - Drawing: restores the snapshot, then renders with the tool `selection`
    ///   holds right now:
    ///   - freehand tools stroke every position since pointer-down
    ///   - shape tools render from the anchor to `point`
    pub fn on_pointer_move(
        &mut self,
        point: Point,
        selection: &ToolSelection,
    ) -> Result<(), SurfaceError> {
        let DrawingState::Drawing {
            anchor,
            snapshot,
            style,
            points,
        } = &mut self.state
        else {
            return Ok(());
        };

        if points.last() != Some(&point) {
            points.push(point);
        }

        self.raster.restore(&self.ctx, snapshot)?;
        self.ctx.new_path();
        style.apply(&self.ctx);

        match selection.tool {
            Tool::Pen => render_freehand(&self.ctx, points, style.color, style.width)?,
            Tool::Eraser => {
                render_freehand(&self.ctx, points, selection.eraser_color, style.width)?
            }
            Tool::Ink(color) => render_freehand(&self.ctx, points, color, style.width)?,
            Tool::Shape(kind) => render_shape(&self.ctx, kind, *anchor, point, selection.fill)?,
        }
        Ok(())
    }

    /// Processes a pointer-up event.
    ///
    /// The last rendered preview stays on the raster as the committed stroke.
    pub fn on_pointer_up(&mut self) {
        if self.is_drawing() {
            log::debug!("Stroke committed");
        }
        self.state = DrawingState::Idle;
    }
}
