//! Points, bounding boxes and helpers over flat coordinate lists.
//!
//! Primitive geometry is stored the way a retained-mode canvas stores it: a
//! flat `[x0, y0, x1, y1, ...]` list. The helpers here read and rewrite such
//! lists without caring which kind of primitive they belong to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotates this point around `center` by `angle` radians.
    ///
    /// Positive angles turn from +x towards +y, which on a y-down screen is
    /// clockwise.
    pub fn rotated_about(&self, center: &Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(center.x + cos * dx - sin * dy, center.y + sin * dx + cos * dy)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from two corners, normalizing their order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Square of half-size `radius` centered on `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the bounds by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Closed-interval overlap test; touching edges count as overlapping.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Distance from `p` to the box, zero when `p` is inside.
    pub fn distance_to(&self, p: &Point) -> f64 {
        let dx = (self.min_x - p.x).max(0.0).max(p.x - self.max_x);
        let dy = (self.min_y - p.y).max(0.0).max(p.y - self.max_y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Iterates the points of a flat coordinate list. A trailing odd value is ignored.
pub fn points(coords: &[f64]) -> impl Iterator<Item = Point> + '_ {
    coords.chunks_exact(2).map(|c| Point::new(c[0], c[1]))
}

/// Flattens points back into a coordinate list.
pub fn flatten(points: impl IntoIterator<Item = Point>) -> Vec<f64> {
    points.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Bounding box of a coordinate list, or `None` if it holds no complete point.
pub fn coords_bounds(coords: &[f64]) -> Option<Bounds> {
    let mut iter = points(coords);
    let first = iter.next()?;
    let init = Bounds::new(first.x, first.y, first.x, first.y);
    Some(iter.fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x),
        min_y: b.min_y.min(p.y),
        max_x: b.max_x.max(p.x),
        max_y: b.max_y.max(p.y),
    }))
}

/// Shifts every point of a coordinate list by `(dx, dy)` in place.
pub fn translate_coords(coords: &mut [f64], dx: f64, dy: f64) {
    for pair in coords.chunks_exact_mut(2) {
        pair[0] += dx;
        pair[1] += dy;
    }
}

/// Rotates every point of a coordinate list around `center` by `angle` radians.
pub fn rotate_coords(coords: &[f64], center: &Point, angle: f64) -> Vec<f64> {
    flatten(points(coords).map(|p| p.rotated_about(center, angle)))
}

/// Mean of the vertices of a coordinate list.
pub fn centroid(coords: &[f64]) -> Option<Point> {
    let count = coords.len() / 2;
    if count == 0 {
        return None;
    }
    let (sx, sy) = points(coords).fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / count as f64, sy / count as f64))
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * abx, a.y + t * aby))
}
