//! Cairo-based renderers for freehand strokes and shape previews.
//!
//! Renderers only build a path and fill or stroke it with whatever source and
//! line width are already set on the context. Identical inputs always produce
//! identical pixels.

use super::color::Color;
use super::shape::{self, ShapeKind};
use crate::util::Point;

/// Renders one shape from `anchor` to `point`.
///
/// Dispatches to the matching `draw_*` function. `fill` is ignored for
/// [`ShapeKind::Line`].
pub fn render_shape(
    ctx: &cairo::Context,
    kind: ShapeKind,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    match kind {
        ShapeKind::Rectangle => draw_rect(ctx, anchor, point, fill),
        ShapeKind::Circle => draw_circle(ctx, anchor, point, fill),
        ShapeKind::Triangle => draw_triangle(ctx, anchor, point, fill),
        ShapeKind::Line => draw_line(ctx, anchor, point),
        ShapeKind::Star => draw_star(ctx, anchor, point, fill),
        ShapeKind::Hexagon => draw_hexagon(ctx, anchor, point, fill),
    }
}

/// Rectangle with one corner on the anchor and the opposite one on the pointer.
pub fn draw_rect(
    ctx: &cairo::Context,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    let rect = shape::rect_extent(anchor, point);
    ctx.new_path();
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    finish(ctx, fill)
}

pub fn draw_circle(
    ctx: &cairo::Context,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    let radius = shape::radius(anchor, point);
    ctx.new_path();
    ctx.arc(anchor.x, anchor.y, radius, 0.0, 2.0 * std::f64::consts::PI);
    finish(ctx, fill)
}

pub fn draw_triangle(
    ctx: &cairo::Context,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    polygon(ctx, &shape::triangle_vertices(anchor, point));
    finish(ctx, fill)
}

/// Straight segment. Lines are always stroked.
pub fn draw_line(ctx: &cairo::Context, anchor: Point, point: Point) -> Result<(), cairo::Error> {
    ctx.new_path();
    ctx.set_line_cap(cairo::LineCap::Butt);
    ctx.move_to(anchor.x, anchor.y);
    ctx.line_to(point.x, point.y);
    ctx.stroke()
}

pub fn draw_star(
    ctx: &cairo::Context,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    polygon(ctx, &shape::star_vertices(anchor, point));
    finish(ctx, fill)
}

pub fn draw_hexagon(
    ctx: &cairo::Context,
    anchor: Point,
    point: Point,
    fill: bool,
) -> Result<(), cairo::Error> {
    polygon(ctx, &shape::hexagon_vertices(anchor, point));
    finish(ctx, fill)
}

/// Render freehand stroke (polyline through points)
///
/// Takes a borrowed slice so the whole stroke can be re-rendered on every
/// pointer move without cloning it. A single point renders nothing.
pub fn render_freehand(
    ctx: &cairo::Context,
    points: &[Point],
    color: Color,
    thick: f64,
) -> Result<(), cairo::Error> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }

    ctx.new_path();
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke()
}

fn polygon(ctx: &cairo::Context, vertices: &[Point]) {
    ctx.new_path();
    ctx.set_line_join(cairo::LineJoin::Miter);
    if let Some((first, rest)) = vertices.split_first() {
        ctx.move_to(first.x, first.y);
        for v in rest {
            ctx.line_to(v.x, v.y);
        }
        ctx.close_path();
    }
}

fn finish(ctx: &cairo::Context, fill: bool) -> Result<(), cairo::Error> {
    if fill { ctx.fill() } else { ctx.stroke() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};
    use crate::draw::raster::{Raster, Snapshot};

    const WHITE_PX: u32 = 0xffff_ffff;
    const BLACK_PX: u32 = 0xff00_0000;

    fn canvas() -> (Raster, cairo::Context) {
        let raster = Raster::new(120, 100, WHITE).unwrap();
        let ctx = cairo::Context::new(raster.surface()).unwrap();
        raster.fill_background(&ctx).unwrap();
        BLACK.apply(&ctx);
        ctx.set_line_width(2.0);
        (raster, ctx)
    }

    fn rendered(kind: ShapeKind, anchor: Point, point: Point, fill: bool) -> Snapshot {
        let (raster, ctx) = canvas();
        render_shape(&ctx, kind, anchor, point, fill).unwrap();
        raster.snapshot().unwrap()
    }

    #[test]
    fn filled_rectangle_covers_exact_extent() {
        let snapshot = rendered(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            Point::new(60.0, 40.0),
            true,
        );
        let painted = snapshot.pixels_not_equal_to(WHITE_PX);
        assert_eq!(painted.len(), 50 * 30);
        assert!(painted.iter().all(|&(x, y)| (10..60).contains(&x) && (10..40).contains(&y)));
        assert_eq!(snapshot.pixel(10, 10), Some(BLACK_PX));
        assert_eq!(snapshot.pixel(59, 39), Some(BLACK_PX));
    }

    #[test]
    fn stroked_rectangle_leaves_interior_untouched() {
        let snapshot = rendered(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            Point::new(60.0, 40.0),
            false,
        );
        assert_eq!(snapshot.pixel(35, 25), Some(WHITE_PX));
        // A 2px stroke centered on x = 10 covers columns 9 and 10.
        assert_eq!(snapshot.pixel(9, 25), Some(BLACK_PX));
        assert_eq!(snapshot.pixel(10, 25), Some(BLACK_PX));
        assert_eq!(snapshot.pixel(11, 25), Some(WHITE_PX));
    }

    #[test]
    fn filled_circle_covers_center_not_corners() {
        let snapshot = rendered(
            ShapeKind::Circle,
            Point::new(50.0, 50.0),
            Point::new(70.0, 50.0),
            true,
        );
        assert_eq!(snapshot.pixel(50, 50), Some(BLACK_PX));
        assert_eq!(snapshot.pixel(31, 31), Some(WHITE_PX));
        assert_eq!(snapshot.pixel(75, 50), Some(WHITE_PX));
    }

    #[test]
    fn line_ignores_fill_flag() {
        let anchor = Point::new(10.0, 20.5);
        let point = Point::new(90.0, 20.5);
        assert_eq!(
            rendered(ShapeKind::Line, anchor, point, true),
            rendered(ShapeKind::Line, anchor, point, false)
        );
    }

    #[test]
    fn zero_extent_filled_shapes_paint_nothing() {
        let p = Point::new(40.0, 40.0);
        for kind in ShapeKind::ALL.into_iter().filter(|k| k.fillable()) {
            let snapshot = rendered(kind, p, p, true);
            assert!(
                snapshot.pixels_not_equal_to(WHITE_PX).is_empty(),
                "{} should not paint for a zero extent",
                kind.name()
            );
        }
    }

    #[test]
    fn zero_extent_strokes_stay_within_pen_footprint() {
        let p = Point::new(40.0, 40.0);
        for kind in ShapeKind::ALL {
            let snapshot = rendered(kind, p, p, false);
            for (x, y) in snapshot.pixels_not_equal_to(WHITE_PX) {
                assert!(
                    (x - 40).abs() <= 2 && (y - 40).abs() <= 2,
                    "{} painted ({x}, {y}) for a zero extent",
                    kind.name()
                );
            }
        }
    }

    #[test]
    fn renderers_are_deterministic() {
        let anchor = Point::new(60.0, 50.0);
        let point = Point::new(85.0, 20.0);
        for kind in ShapeKind::ALL {
            for fill in [false, true] {
                assert_eq!(
                    rendered(kind, anchor, point, fill),
                    rendered(kind, anchor, point, fill)
                );
            }
        }
    }

    #[test]
    fn freehand_needs_two_points() {
        let (raster, ctx) = canvas();
        render_freehand(&ctx, &[Point::new(5.0, 5.0)], BLACK, 4.0).unwrap();
        assert!(raster.snapshot().unwrap().pixels_not_equal_to(WHITE_PX).is_empty());

        render_freehand(
            &ctx,
            &[Point::new(5.0, 5.0), Point::new(50.0, 5.0)],
            BLACK,
            4.0,
        )
        .unwrap();
        assert_eq!(raster.snapshot().unwrap().pixel(25, 5), Some(BLACK_PX));
    }
}
