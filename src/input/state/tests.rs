use std::sync::Arc;

use async_trait::async_trait;

use super::*;
use crate::draw::{BLUE, Color, RED, ShapeKind, WHITE};
use crate::export::ExportConfig;
use crate::input::events::PointerEvent;
use crate::input::tool::{Tool, ToolChange, ToolSelection};
use crate::persist::{PaintingRecord, PaintingStore, PersistError, PersistManager, PersistOutcome};
use crate::util::Point;

const WHITE_PX: u32 = 0xffff_ffff;
const RED_PX: u32 = 0xffff_0000;
const BLUE_PX: u32 = 0xff00_00ff;

fn create_test_surface() -> DrawingSurface {
    DrawingSurface::new(100, 60, WHITE).unwrap()
}

fn selection(tool: Tool) -> ToolSelection {
    ToolSelection::new(tool, RED, 5.0, true, WHITE)
}

fn pixel(surface: &DrawingSurface, x: i32, y: i32) -> u32 {
    surface.pixel(x, y).unwrap().unwrap()
}

fn stroke(surface: &mut DrawingSurface, sel: &ToolSelection, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    surface
        .handle_pointer(PointerEvent::Down(Point::from(*first)), sel)
        .unwrap();
    for p in rest {
        surface
            .handle_pointer(PointerEvent::Move(Point::from(*p)), sel)
            .unwrap();
    }
    surface.handle_pointer(PointerEvent::Up, sel).unwrap();
}

#[test]
fn test_new_surface_is_idle_and_painted() {
    let surface = create_test_surface();
    assert!(!surface.is_drawing());
    assert_eq!(surface.anchor(), None);
    assert_eq!((surface.width(), surface.height()), (100, 60));
    assert!(surface.snapshot().unwrap().pixels_not_equal_to(WHITE_PX).is_empty());
}

#[test]
fn test_invalid_size_is_rejected() {
    assert!(DrawingSurface::new(0, 10, WHITE).is_err());
    assert!(DrawingSurface::new(10, -1, WHITE).is_err());
}

#[test]
fn test_rectangle_from_anchor_to_pointer() {
    let mut surface = create_test_surface();
    let sel = selection(Tool::Shape(ShapeKind::Rectangle));

    stroke(&mut surface, &sel, &[(10.0, 10.0), (60.0, 40.0)]);

    let painted = surface.snapshot().unwrap().pixels_not_equal_to(WHITE_PX);
    assert_eq!(painted.len(), 50 * 30);
    assert!(
        painted
            .iter()
            .all(|&(x, y)| (10..60).contains(&x) && (10..40).contains(&y))
    );
    assert_eq!(pixel(&surface, 10, 10), RED_PX);
    assert_eq!(pixel(&surface, 59, 39), RED_PX);
}

#[test]
fn test_shape_preview_only_keeps_latest_position() {
    let mut surface = create_test_surface();
    let sel = selection(Tool::Shape(ShapeKind::Rectangle));

    stroke(
        &mut surface,
        &sel,
        &[(10.0, 10.0), (90.0, 55.0), (30.0, 20.0), (60.0, 40.0)],
    );

    let mut direct = create_test_surface();
    stroke(&mut direct, &sel, &[(10.0, 10.0), (60.0, 40.0)]);

    assert_eq!(surface.snapshot().unwrap(), direct.snapshot().unwrap());
}

#[test]
fn test_repeated_move_is_idempotent() {
    let mut surface = create_test_surface();
    let sel = selection(Tool::Pen);

    surface.on_pointer_down(Point::new(10.0, 10.0), &sel).unwrap();
    surface.on_pointer_move(Point::new(40.0, 30.0), &sel).unwrap();
    let once = surface.snapshot().unwrap();
    surface.on_pointer_move(Point::new(40.0, 30.0), &sel).unwrap();
    let twice = surface.snapshot().unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_move_while_idle_is_noop() {
    let mut surface = create_test_surface();
    let before = surface.snapshot().unwrap();

    surface
        .handle_pointer(
            PointerEvent::Move(Point::new(50.0, 30.0)),
            &selection(Tool::Pen),
        )
        .unwrap();

    assert_eq!(surface.snapshot().unwrap(), before);
    assert!(!surface.is_drawing());
}

#[test]
fn test_pointer_up_commits_preview() {
    let mut surface = create_test_surface();
    let sel = selection(Tool::Shape(ShapeKind::Rectangle));

    surface.on_pointer_down(Point::new(10.0, 10.0), &sel).unwrap();
    assert_eq!(surface.anchor(), Some(Point::new(10.0, 10.0)));
    surface.on_pointer_move(Point::new(30.0, 30.0), &sel).unwrap();
    let preview = surface.snapshot().unwrap();
    surface.on_pointer_up();

    assert!(!surface.is_drawing());
    assert!(matches!(surface.state(), DrawingState::Idle));
    assert_eq!(surface.snapshot().unwrap(), preview);

    // Motion after release must not erase the committed shape.
    surface.on_pointer_move(Point::new(80.0, 50.0), &sel).unwrap();
    assert_eq!(surface.snapshot().unwrap(), preview);
}

#[test]
fn test_zero_extent_shapes_paint_nothing_when_filled() {
    for kind in [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Hexagon,
    ] {
        let mut surface = create_test_surface();
        stroke(&mut surface, &selection(Tool::Shape(kind)), &[
            (30.0, 30.0),
            (30.0, 30.0),
        ]);
        assert!(
            surface.snapshot().unwrap().pixels_not_equal_to(WHITE_PX).is_empty(),
            "{} painted pixels at zero extent",
            kind.name()
        );
    }
}

#[test]
fn test_tool_switch_mid_stroke_keeps_committed_strokes() {
    let mut surface = create_test_surface();
    let rect = selection(Tool::Shape(ShapeKind::Rectangle));
    stroke(&mut surface, &rect, &[(10.0, 10.0), (30.0, 30.0)]);
    let committed = surface.snapshot().unwrap();

    let pen = selection(Tool::Pen);
    surface.on_pointer_down(Point::new(70.0, 40.0), &pen).unwrap();
    let switched = pen
        .apply(ToolChange::Tool(Tool::Shape(ShapeKind::Circle)))
        .apply(ToolChange::Color(BLUE));
    surface.on_pointer_move(Point::new(75.0, 40.0), &switched).unwrap();
    surface.on_pointer_up();

    let after = surface.snapshot().unwrap();
    for y in 0..60 {
        for x in 0..50 {
            assert_eq!(after.pixel(x, y), committed.pixel(x, y), "pixel ({x}, {y})");
        }
    }
    // The preview takes the new shape but keeps the color captured at pointer-down.
    assert_eq!(after.pixel(70, 40), Some(RED_PX));
}

#[test]
fn test_eraser_paints_eraser_color() {
    let mut surface = create_test_surface();
    stroke(
        &mut surface,
        &selection(Tool::Shape(ShapeKind::Rectangle)),
        &[(10.0, 10.0), (40.0, 40.0)],
    );
    assert_eq!(pixel(&surface, 22, 20), RED_PX);

    let eraser = selection(Tool::Eraser).apply(ToolChange::Thickness(10.0));
    stroke(&mut surface, &eraser, &[(20.0, 20.0), (25.0, 20.0)]);

    assert_eq!(pixel(&surface, 22, 20), WHITE_PX);
    assert_eq!(pixel(&surface, 35, 35), RED_PX);
}

#[test]
fn test_ink_tool_draws_in_its_own_color() {
    let mut surface = create_test_surface();
    stroke(&mut surface, &selection(Tool::Ink(BLUE)), &[
        (10.0, 10.0),
        (40.0, 10.0),
    ]);
    assert_eq!(pixel(&surface, 25, 10), BLUE_PX);
}

#[test]
fn test_freehand_connects_every_position() {
    let mut surface = create_test_surface();
    stroke(&mut surface, &selection(Tool::Pen), &[
        (10.0, 10.0),
        (50.0, 10.0),
        (50.0, 50.0),
    ]);
    assert_eq!(pixel(&surface, 30, 10), RED_PX);
    assert_eq!(pixel(&surface, 50, 30), RED_PX);
    assert_eq!(pixel(&surface, 30, 40), WHITE_PX);
}

#[test]
fn test_clear_restores_background_and_ends_stroke() {
    let mut surface = create_test_surface();
    let sel = selection(Tool::Shape(ShapeKind::Rectangle));
    stroke(&mut surface, &sel, &[(10.0, 10.0), (60.0, 40.0)]);

    surface.on_pointer_down(Point::new(5.0, 5.0), &sel).unwrap();
    surface.clear().unwrap();
    assert!(!surface.is_drawing());

    // The abandoned snapshot must not come back.
    surface.on_pointer_move(Point::new(20.0, 20.0), &sel).unwrap();
    assert!(surface.snapshot().unwrap().pixels_not_equal_to(WHITE_PX).is_empty());
}

#[test]
fn test_clear_then_export_matches_fresh_surface() {
    let temp = tempfile::tempdir().unwrap();

    let mut surface = DrawingSurface::new(100, 60, Color::new(0.0, 0.0, 0.0, 0.0)).unwrap();
    stroke(&mut surface, &selection(Tool::Pen), &[
        (10.0, 10.0),
        (90.0, 50.0),
    ]);
    surface.clear().unwrap();
    let cleared = surface
        .export_image(&ExportConfig::in_directory(temp.path().join("cleared")))
        .unwrap();

    let fresh = DrawingSurface::new(100, 60, Color::new(0.0, 0.0, 0.0, 0.0)).unwrap();
    let blank = fresh
        .export_image(&ExportConfig::in_directory(temp.path().join("fresh")))
        .unwrap();

    assert!(cleared.ends_with("image.png"));
    assert_eq!(
        std::fs::read(cleared).unwrap(),
        std::fs::read(blank).unwrap()
    );
}

#[test]
fn test_export_writes_png() {
    let temp = tempfile::tempdir().unwrap();
    let surface = create_test_surface();
    let path = surface
        .export_image(&ExportConfig::in_directory(temp.path()))
        .unwrap();
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(bytes, surface.encode_png().unwrap());
}

struct RejectingStore;

#[async_trait]
impl PaintingStore for RejectingStore {
    async fn write_painting(
        &self,
        _owner: &str,
        _image_png: Vec<u8>,
    ) -> Result<PaintingRecord, PersistError> {
        Err(PersistError::Rejected("network unreachable".to_string()))
    }

    async fn list_paintings(
        &self,
        _owner: Option<&str>,
    ) -> Result<Vec<PaintingRecord>, PersistError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_failed_persist_leaves_raster_unchanged() {
    let mut surface = create_test_surface();
    stroke(
        &mut surface,
        &selection(Tool::Shape(ShapeKind::Star)),
        &[(50.0, 30.0), (70.0, 30.0)],
    );
    let before = surface.snapshot().unwrap();
    let manager = PersistManager::new(&tokio::runtime::Handle::current(), Arc::new(RejectingStore));

    surface.persist("ada@example.com", &manager).unwrap();
    surface.persist("ada@example.com", &manager).unwrap();
    let outcomes = manager.finish().await;

    assert_eq!(outcomes.len(), 2);
    assert!(
        outcomes
            .iter()
            .all(|o| matches!(o, PersistOutcome::Failed(msg) if msg.contains("network unreachable")))
    );
    assert_eq!(surface.snapshot().unwrap(), before);
    assert!(!surface.is_drawing());
}
