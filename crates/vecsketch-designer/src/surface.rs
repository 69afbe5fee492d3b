//! The rendering surface collaborator.
//!
//! A retained-mode canvas owns the actual primitives: it issues a [`Handle`]
//! for each one it creates, answers hit-testing queries and applies
//! geometry and style changes. Everything in this crate talks to it through
//! [`RenderSurface`], so the same logic drives a GUI widget or the in-memory
//! [`crate::scene::SceneSurface`].

use vecsketch_core::{Bounds, Handle, Point, Primitive, StyleUpdate};

/// Operations the drawing logic needs from a rendering surface.
///
/// Methods taking a handle the surface does not know are no-ops (or return
/// `None`); the caller never has to check first.
pub trait RenderSurface {
    /// Creates a primitive and returns its newly issued handle. New
    /// primitives go on top of the stacking order.
    fn create_primitive(&mut self, primitive: Primitive) -> Handle;

    fn delete_primitive(&mut self, handle: Handle);

    fn move_primitive(&mut self, handle: Handle, dx: f64, dy: f64);

    fn set_style(&mut self, handle: Handle, update: &StyleUpdate);

    /// Replaces the coordinate list of a primitive.
    fn set_geometry(&mut self, handle: Handle, coords: Vec<f64>);

    /// Handles of every primitive overlapping `region`, in stacking order,
    /// bottom-most first.
    fn query_overlapping(&self, region: Bounds) -> Vec<Handle>;

    /// The primitive nearest to `point`; the topmost wins ties.
    fn query_closest(&self, point: Point) -> Option<Handle>;

    fn primitive(&self, handle: Handle) -> Option<&Primitive>;

    /// Moves a primitive to the top of the stacking order.
    fn raise(&mut self, handle: Handle);

    /// Moves a primitive to the bottom of the stacking order.
    fn lower(&mut self, handle: Handle);

    /// Every live handle in stacking order, bottom-most first.
    fn handles(&self) -> Vec<Handle>;

    /// Deletes every primitive.
    fn clear(&mut self);

    /// Coordinate list of a primitive.
    fn get_geometry(&self, handle: Handle) -> Option<Vec<f64>> {
        self.primitive(handle).map(|p| p.coords.clone())
    }

    fn contains(&self, handle: Handle) -> bool {
        self.primitive(handle).is_some()
    }
}
