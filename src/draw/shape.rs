//! Shape kinds and the geometry each one derives from an anchor and a pointer.

use crate::util::{self, Point};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

/// Number of spikes on the star tool.
pub const STAR_SPIKES: usize = 5;

/// Ratio between the star's inner and outer radius.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Geometric primitive drawn by a shape tool.
///
/// Every shape is defined by two points: the anchor captured on pointer-down
/// and the current pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle with one corner on the anchor
    Rectangle,
    /// Circle centered on the anchor, passing through the pointer
    Circle,
    /// Isosceles triangle with its apex on the anchor
    Triangle,
    /// Straight segment from anchor to pointer (never filled)
    Line,
    /// Five-pointed star centered on the anchor
    Star,
    /// Regular hexagon centered on the anchor
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Line,
        ShapeKind::Star,
        ShapeKind::Hexagon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Line => "line",
            ShapeKind::Star => "star",
            ShapeKind::Hexagon => "hexagon",
        }
    }

    /// Whether the fill flag has any effect on this shape.
    pub fn fillable(self) -> bool {
        !matches!(self, ShapeKind::Line)
    }
}

/// Rectangle extent: origin on the anchor, signed width and height.
///
/// Width and height keep their sign so dragging up or left yields a rectangle
/// extending in that direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectExtent {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectExtent {
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

pub fn rect_extent(anchor: Point, point: Point) -> RectExtent {
    RectExtent {
        x: anchor.x,
        y: anchor.y,
        width: point.x - anchor.x,
        height: point.y - anchor.y,
    }
}

/// Radius of the circle, hexagon and star tools.
pub fn radius(anchor: Point, point: Point) -> f64 {
    util::distance(anchor, point)
}

/// Triangle vertices: apex on the anchor, base mirrored around the anchor's x.
pub fn triangle_vertices(anchor: Point, point: Point) -> [Point; 3] {
    [
        anchor,
        point,
        Point::new(anchor.x * 2.0 - point.x, point.y),
    ]
}

/// Alternating outer/inner vertices of the star, starting with the top spike.
pub fn star_vertices(anchor: Point, point: Point) -> Vec<Point> {
    let outer = radius(anchor, point);
    let inner = outer * STAR_INNER_RATIO;
    let step = PI / STAR_SPIKES as f64;

    (0..STAR_SPIKES * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = -FRAC_PI_2 + step * i as f64;
            Point::new(anchor.x + r * angle.cos(), anchor.y + r * angle.sin())
        })
        .collect()
}

pub fn hexagon_vertices(anchor: Point, point: Point) -> [Point; 6] {
    let r = radius(anchor, point);
    std::array::from_fn(|i| {
        let angle = FRAC_PI_3 * i as f64;
        Point::new(anchor.x + r * angle.cos(), anchor.y + r * angle.sin())
    })
}
