//! Single-slot copy/paste of drawn objects.

use tracing::debug;
use vecsketch_core::geometry::{points, translate_coords};
use vecsketch_core::{Handle, Point, Primitive, PrimitiveKind, PrimitiveStyle};

use crate::registry::ObjectRegistry;
use crate::surface::RenderSurface;

/// Description of a copied object, detached from any surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CopiedObject {
    pub kind: PrimitiveKind,
    pub coords: Vec<f64>,
    pub style: PrimitiveStyle,
    pub text: Option<String>,
}

impl CopiedObject {
    /// Captures the object `handle` belongs to.
    ///
    /// A line that is part of a freehand stroke is captured as one polyline
    /// running through every segment of its group, in draw order.
    pub fn capture<S: RenderSurface + ?Sized>(
        registry: &ObjectRegistry,
        surface: &S,
        handle: Handle,
    ) -> Option<Self> {
        let primitive = surface.primitive(handle)?;
        let coords = match (primitive.kind, registry.lookup(handle)) {
            (PrimitiveKind::Line, Some(group)) => group
                .handles()
                .iter()
                .filter_map(|h| surface.primitive(*h))
                .flat_map(|p| p.coords.iter().copied())
                .collect(),
            _ => primitive.coords.clone(),
        };
        Some(Self {
            kind: primitive.kind,
            coords,
            style: primitive.style.clone(),
            text: primitive.text.clone(),
        })
    }

    /// The primitive to create when pasting at `at`.
    ///
    /// Text is anchored at `at`; lines and polygons are shifted so their
    /// first vertex lands on `at`; ovals and rectangles keep their size and
    /// are centered on `at`.
    pub fn placed_at(&self, at: Point) -> Primitive {
        let coords = match self.kind {
            PrimitiveKind::Text => vec![at.x, at.y],
            PrimitiveKind::Line | PrimitiveKind::Polygon => {
                let mut coords = self.coords.clone();
                if let Some(first) = points(&self.coords).next() {
                    translate_coords(&mut coords, at.x - first.x, at.y - first.y);
                }
                coords
            }
            PrimitiveKind::Oval | PrimitiveKind::Rectangle => match self.coords[..] {
                [x1, y1, x2, y2, ..] => {
                    let (half_w, half_h) = ((x2 - x1) / 2.0, (y2 - y1) / 2.0);
                    vec![at.x - half_w, at.y - half_h, at.x + half_w, at.y + half_h]
                }
                _ => self.coords.clone(),
            },
        };
        Primitive {
            kind: self.kind,
            coords,
            style: self.style.clone(),
            text: self.text.clone(),
        }
    }
}

/// Holds at most one copied object; copying replaces it.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    copied: Option<CopiedObject>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_none()
    }

    pub fn contents(&self) -> Option<&CopiedObject> {
        self.copied.as_ref()
    }

    /// Copies the object `handle` belongs to. Returns false, leaving the
    /// clipboard unchanged, if the surface does not know the handle.
    pub fn copy<S: RenderSurface + ?Sized>(
        &mut self,
        registry: &ObjectRegistry,
        surface: &S,
        handle: Handle,
    ) -> bool {
        match CopiedObject::capture(registry, surface, handle) {
            Some(object) => {
                debug!(kind = %object.kind, points = object.coords.len() / 2, "Copied object");
                self.copied = Some(object);
                true
            }
            None => false,
        }
    }

    /// Pastes the copied object at `at` as a new single-primitive group.
    pub fn paste<S: RenderSurface + ?Sized>(
        &self,
        registry: &mut ObjectRegistry,
        surface: &mut S,
        at: Point,
    ) -> Option<Handle> {
        let object = self.copied.as_ref()?;
        let handle = surface.create_primitive(object.placed_at(at));
        registry.register(vec![handle]);
        debug!(kind = %object.kind, handle = %handle, "Pasted object");
        Some(handle)
    }
}
