//! Geometry of the drag-to-draw shape tools.
//!
//! Each tool turns the press point and the current pointer position into the
//! coordinate list of one primitive. The same function produces both the
//! live preview and the committed shape, so the two can never disagree.

use vecsketch_core::geometry::flatten;
use vecsketch_core::{Point, PrimitiveKind};

/// Shapes drawn by pressing, dragging and releasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    /// Centered on the press point, radius reaching the pointer.
    Circle,
    /// Axis-aligned square anchored at the press point.
    Rectangle,
    /// Isosceles triangle standing on the press point.
    Triangle,
}

impl DragShape {
    /// Primitive kind the shape is committed as.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Circle => PrimitiveKind::Oval,
            Self::Rectangle => PrimitiveKind::Rectangle,
            Self::Triangle => PrimitiveKind::Polygon,
        }
    }

    pub fn coords(&self, start: Point, current: Point) -> Vec<f64> {
        match self {
            Self::Circle => circle_coords(start, current),
            Self::Rectangle => square_coords(start, current),
            Self::Triangle => triangle_coords(start, current),
        }
    }
}

/// Bounding box of the circle centered on `center` passing through `rim`.
pub fn circle_coords(center: Point, rim: Point) -> Vec<f64> {
    let r = center.distance_to(&rim);
    vec![center.x - r, center.y - r, center.x + r, center.y + r]
}

/// Square anchored at `start` whose side is the shorter of the two drag
/// extents, growing towards the pointer on each axis.
pub fn square_coords(start: Point, current: Point) -> Vec<f64> {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let side = dx.abs().min(dy.abs());
    let sign_x = if dx >= 0.0 { 1.0 } else { -1.0 };
    let sign_y = if dy >= 0.0 { 1.0 } else { -1.0 };
    vec![
        start.x,
        start.y,
        start.x + sign_x * side,
        start.y + sign_y * side,
    ]
}

/// Triangle whose base is centered on `start` and whose height is the drag
/// distance. The apex points up the screen; the base is as wide as the
/// triangle is tall.
pub fn triangle_coords(start: Point, current: Point) -> Vec<f64> {
    let h = start.distance_to(&current);
    flatten([
        Point::new(start.x, start.y - h),
        Point::new(start.x - h / 2.0, start.y),
        Point::new(start.x + h / 2.0, start.y),
    ])
}
