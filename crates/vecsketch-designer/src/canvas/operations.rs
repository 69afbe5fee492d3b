//! Object manipulation operations for Canvas.

use std::f64::consts::FRAC_PI_2;

use tracing::{debug, warn};
use vecsketch_core::geometry::{centroid, rotate_coords};
use vecsketch_core::{Bounds, Handle, Point, PrimitiveKind, StyleUpdate};

use super::types::Gesture;
use super::Canvas;
use crate::surface::RenderSurface;

/// Angle applied by one rotate click.
const ROTATION_STEP: f64 = FRAC_PI_2;

/// Font size given to text per unit of line width.
pub const TEXT_SIZE_PER_WIDTH: f64 = 8.0;

impl<S: RenderSurface> Canvas<S> {
    /// Erases every tracked primitive within the eraser square around `p`.
    ///
    /// Each erased segment splits its stroke into the parts before and after
    /// it. Returns how many primitives were erased.
    pub fn erase_at(&mut self, p: Point) -> usize {
        let region = Bounds::around(p, self.tools.eraser_size);
        let hits = self.surface.query_overlapping(region);
        let mut erased = 0;
        for handle in hits {
            if !self.registry.contains(handle) {
                continue;
            }
            self.surface.delete_primitive(handle);
            self.registry.split_on_erase(handle);
            erased += 1;
        }
        if erased > 0 {
            debug!(erased, x = p.x, y = p.y, "Erased primitives");
        }
        erased
    }

    /// Rotates the object closest to `p` by a quarter turn.
    ///
    /// A line rotates together with the rest of its stroke about `p`; a
    /// polygon rotates about its own centroid. Ovals, rectangles and text
    /// are left alone. Returns whether anything moved.
    pub fn rotate_at(&mut self, p: Point) -> bool {
        let Some(handle) = self.surface.query_closest(p) else {
            return false;
        };
        let Some(kind) = self.surface.primitive(handle).map(|prim| prim.kind) else {
            return false;
        };

        match kind {
            PrimitiveKind::Line => {
                let Some(group) = self.registry.lookup(handle) else {
                    return false;
                };
                for h in group.handles().to_vec() {
                    if let Some(coords) = self.surface.get_geometry(h) {
                        self.surface
                            .set_geometry(h, rotate_coords(&coords, &p, ROTATION_STEP));
                    }
                }
                debug!(handle = %handle, "Rotated stroke");
                true
            }
            PrimitiveKind::Polygon => {
                let Some(coords) = self.surface.get_geometry(handle) else {
                    return false;
                };
                let Some(center) = centroid(&coords) else {
                    return false;
                };
                self.surface
                    .set_geometry(handle, rotate_coords(&coords, &center, ROTATION_STEP));
                debug!(handle = %handle, "Rotated polygon");
                true
            }
            PrimitiveKind::Oval | PrimitiveKind::Rectangle | PrimitiveKind::Text => false,
        }
    }

    /// Sets the stroke width of the selected object. Text is resized to
    /// [`TEXT_SIZE_PER_WIDTH`] times `width` instead.
    pub fn set_line_width(&mut self, width: f64) -> bool {
        if !(width.is_finite() && width > 0.0) {
            warn!(width, "Ignoring invalid line width");
            return false;
        }
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        let update = match self.surface.primitive(handle).map(|p| p.kind) {
            Some(PrimitiveKind::Text) => StyleUpdate::font_size(width * TEXT_SIZE_PER_WIDTH),
            Some(_) => StyleUpdate::width(width),
            None => return false,
        };
        self.registry
            .apply_to_group(&mut self.surface, handle, &update);
        true
    }

    /// Recolors the selected object.
    pub fn set_fill(&mut self, color: &str) -> bool {
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        self.registry
            .apply_to_group(&mut self.surface, handle, &StyleUpdate::fill(color));
        true
    }

    /// Recolors the selected object with entry `index` of the palette.
    pub fn set_fill_from_palette(&mut self, index: usize) -> bool {
        let Some(color) = self.tools.palette.get(index).cloned() else {
            warn!(index, colors = self.tools.palette.len(), "No such palette color");
            return false;
        };
        self.set_fill(&color)
    }

    /// Brings the selected object to the front.
    pub fn raise_selected(&mut self) -> bool {
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        self.registry.raise_group(&mut self.surface, handle);
        true
    }

    /// Sends the selected object to the back.
    pub fn lower_selected(&mut self) -> bool {
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        self.registry.lower_group(&mut self.surface, handle);
        true
    }

    pub fn remove_selected(&mut self) -> bool {
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        self.registry.remove_group(&mut self.surface, handle);
        true
    }

    pub fn copy_selected(&mut self) -> bool {
        let Some(handle) = self.registry.selected() else {
            return false;
        };
        self.clipboard.copy(&self.registry, &self.surface, handle)
    }

    /// Copies the object under `p`, or failing that the closest primitive.
    pub fn copy_at(&mut self, p: Point) -> bool {
        let picked = self
            .registry
            .select_at(&self.surface, p, self.tools.pick_tolerance)
            .or_else(|| self.surface.query_closest(p));
        match picked {
            Some(handle) => self.clipboard.copy(&self.registry, &self.surface, handle),
            None => false,
        }
    }

    /// Pastes the clipboard at `p` as a new object.
    pub fn paste_at(&mut self, p: Point) -> Option<Handle> {
        self.clipboard
            .paste(&mut self.registry, &mut self.surface, p)
    }

    /// Changes the width used for new strokes and shapes.
    pub fn change_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.tools.line_width = width;
        } else {
            warn!(width, "Ignoring invalid line width");
        }
    }

    /// Clears the canvas. The clipboard survives.
    pub fn restart(&mut self) {
        self.gesture = Gesture::Idle;
        self.surface.clear();
        self.registry.clear();
        debug!("Canvas cleared");
    }
}
