//! In-memory rendering surface.
//!
//! `SceneSurface` keeps primitives in a map plus an explicit stacking order
//! and answers hit-testing queries from their geometry. It is what the
//! editor runs on when no GUI canvas is attached, and what the tests drive.

use std::collections::HashMap;

use vecsketch_core::geometry::{self, distance_to_segment};
use vecsketch_core::{Bounds, Handle, Point, Primitive, PrimitiveKind, StyleUpdate};

use crate::surface::RenderSurface;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct SceneSurface {
    items: HashMap<Handle, Primitive>,
    /// Bottom-most first.
    stack: Vec<Handle>,
    next_id: u64,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            stack: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Primitives in stacking order, bottom-most first.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Primitive)> {
        self.stack
            .iter()
            .filter_map(move |h| self.items.get(h).map(|p| (*h, p)))
    }

    /// Region a primitive occupies for hit-testing.
    ///
    /// Strokes grow by half their width. Text has no real glyph metrics here,
    /// so its box is estimated from the font size and character count and
    /// centered on the anchor.
    pub fn hit_bounds(primitive: &Primitive) -> Option<Bounds> {
        let bounds = primitive.bounds()?;
        match primitive.kind {
            PrimitiveKind::Text => {
                let size = primitive.style.font.as_ref().map_or(12.0, |f| f.size);
                let chars = primitive
                    .text
                    .as_deref()
                    .map_or(0, |t| t.chars().count())
                    .max(1);
                let half_w = chars as f64 * size * GLYPH_WIDTH_RATIO / 2.0;
                let half_h = size / 2.0;
                let anchor = bounds.center();
                Some(Bounds::new(
                    anchor.x - half_w,
                    anchor.y - half_h,
                    anchor.x + half_w,
                    anchor.y + half_h,
                ))
            }
            _ => Some(bounds.expanded(primitive.style.width.max(0.0) / 2.0)),
        }
    }

    fn distance(primitive: &Primitive, point: &Point) -> Option<f64> {
        match primitive.kind {
            PrimitiveKind::Line => {
                let pts: Vec<Point> = geometry::points(&primitive.coords).collect();
                let raw = match pts.as_slice() {
                    [] => return None,
                    [only] => only.distance_to(point),
                    _ => pts
                        .windows(2)
                        .map(|w| distance_to_segment(point, &w[0], &w[1]))
                        .fold(f64::INFINITY, f64::min),
                };
                Some((raw - primitive.style.width.max(0.0) / 2.0).max(0.0))
            }
            _ => Self::hit_bounds(primitive).map(|b| b.distance_to(point)),
        }
    }
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for SceneSurface {
    fn create_primitive(&mut self, primitive: Primitive) -> Handle {
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, primitive);
        self.stack.push(handle);
        handle
    }

    fn delete_primitive(&mut self, handle: Handle) {
        if self.items.remove(&handle).is_some() {
            self.stack.retain(|h| *h != handle);
        }
    }

    fn move_primitive(&mut self, handle: Handle, dx: f64, dy: f64) {
        if let Some(p) = self.items.get_mut(&handle) {
            geometry::translate_coords(&mut p.coords, dx, dy);
        }
    }

    fn set_style(&mut self, handle: Handle, update: &StyleUpdate) {
        if let Some(p) = self.items.get_mut(&handle) {
            p.style.apply(update);
        }
    }

    fn set_geometry(&mut self, handle: Handle, coords: Vec<f64>) {
        if let Some(p) = self.items.get_mut(&handle) {
            p.coords = coords;
        }
    }

    fn query_overlapping(&self, region: Bounds) -> Vec<Handle> {
        self.iter()
            .filter(|(_, p)| Self::hit_bounds(p).is_some_and(|b| b.intersects(&region)))
            .map(|(h, _)| h)
            .collect()
    }

    fn query_closest(&self, point: Point) -> Option<Handle> {
        let mut best: Option<(Handle, f64)> = None;
        // Walk top-down so that only a strictly closer primitive replaces the
        // current best; ties therefore keep the topmost one.
        for handle in self.stack.iter().rev() {
            let Some(d) = self.items.get(handle).and_then(|p| Self::distance(p, &point)) else {
                continue;
            };
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((*handle, d));
            }
        }
        best.map(|(h, _)| h)
    }

    fn primitive(&self, handle: Handle) -> Option<&Primitive> {
        self.items.get(&handle)
    }

    fn raise(&mut self, handle: Handle) {
        if let Some(pos) = self.stack.iter().position(|h| *h == handle) {
            let h = self.stack.remove(pos);
            self.stack.push(h);
        }
    }

    fn lower(&mut self, handle: Handle) {
        if let Some(pos) = self.stack.iter().position(|h| *h == handle) {
            let h = self.stack.remove(pos);
            self.stack.insert(0, h);
        }
    }

    fn handles(&self) -> Vec<Handle> {
        self.stack.clone()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.stack.clear();
    }
}
