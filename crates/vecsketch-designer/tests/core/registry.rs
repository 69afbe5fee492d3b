use std::collections::HashMap;

use proptest::prelude::*;
use vecsketch_core::geometry::translate_coords;
use vecsketch_designer::{
    Bounds, GroupId, Handle, ObjectRegistry, Point, Primitive, PrimitiveKind, PrimitiveStyle,
    RenderSurface, SceneSurface, StyleUpdate,
};

/// Surface whose handles are picked by the test and whose overlap query
/// returns a scripted answer.
#[derive(Default)]
struct FixedSurface {
    items: HashMap<Handle, Primitive>,
    order: Vec<Handle>,
    overlapping: Vec<Handle>,
}

impl FixedSurface {
    fn insert(&mut self, raw: u64, primitive: Primitive) -> Handle {
        let handle = Handle(raw);
        self.items.insert(handle, primitive);
        self.order.push(handle);
        handle
    }
}

impl RenderSurface for FixedSurface {
    fn create_primitive(&mut self, primitive: Primitive) -> Handle {
        let next = self.order.iter().map(|h| h.raw()).max().unwrap_or(0) + 1;
        self.insert(next, primitive)
    }

    fn delete_primitive(&mut self, handle: Handle) {
        self.items.remove(&handle);
        self.order.retain(|h| *h != handle);
    }

    fn move_primitive(&mut self, handle: Handle, dx: f64, dy: f64) {
        if let Some(p) = self.items.get_mut(&handle) {
            translate_coords(&mut p.coords, dx, dy);
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

    fn query_overlapping(&self, _region: Bounds) -> Vec<Handle> {
        self.overlapping.clone()
    }

    fn query_closest(&self, _point: Point) -> Option<Handle> {
        self.order.last().copied()
    }

    fn primitive(&self, handle: Handle) -> Option<&Primitive> {
        self.items.get(&handle)
    }

    fn raise(&mut self, handle: Handle) {
        self.order.retain(|h| *h != handle);
        self.order.push(handle);
    }

    fn lower(&mut self, handle: Handle) {
        self.order.retain(|h| *h != handle);
        self.order.insert(0, handle);
    }

    fn handles(&self) -> Vec<Handle> {
        self.order.clone()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }
}

fn hs(raw: &[u64]) -> Vec<Handle> {
    raw.iter().copied().map(Handle).collect()
}

fn rect() -> Primitive {
    Primitive::new(
        PrimitiveKind::Rectangle,
        vec![0.0, 0.0, 10.0, 10.0],
        PrimitiveStyle::new("black", 1.0),
    )
}

fn segment(x: f64) -> Primitive {
    Primitive::line(vec![x, 0.0, x + 10.0, 0.0], PrimitiveStyle::new("black", 1.0))
}

fn snapshot(registry: &ObjectRegistry) -> Vec<(GroupId, Vec<Handle>)> {
    registry
        .groups()
        .map(|g| (g.id(), g.handles().to_vec()))
        .collect()
}

#[test]
fn test_stroke_lookup_and_split() {
    let mut registry = ObjectRegistry::new();
    registry.register(hs(&[101, 102, 103]));
    assert_eq!(
        registry.lookup(Handle(102)).unwrap().handles(),
        hs(&[101, 102, 103]).as_slice()
    );

    let (before, after) = registry.split_on_erase(Handle(102));
    assert_eq!(before.unwrap().handles(), hs(&[101]).as_slice());
    assert_eq!(after.unwrap().handles(), hs(&[103]).as_slice());
    assert_eq!(registry.lookup(Handle(101)).unwrap().handles(), hs(&[101]).as_slice());
    assert_eq!(registry.lookup(Handle(103)).unwrap().handles(), hs(&[103]).as_slice());
    assert!(registry.lookup(Handle(102)).is_none());
}

#[test]
fn test_recolor_single_object() {
    let mut surface = FixedSurface::default();
    let handle = surface.insert(50, rect());
    let mut registry = ObjectRegistry::new();
    registry.register(vec![handle]);

    registry.apply_to_group(&mut surface, Handle(50), &StyleUpdate::fill("red"));

    let style = &surface.primitive(Handle(50)).unwrap().style;
    assert_eq!(style.fill, "red");
    assert_eq!(style.width, 1.0);
    assert_eq!(surface.get_geometry(Handle(50)), Some(vec![0.0, 0.0, 10.0, 10.0]));
}

#[test]
fn test_select_skips_untracked_candidates() {
    let mut surface = FixedSurface::default();
    surface.insert(7, rect());
    surface.insert(99, rect());
    surface.overlapping = hs(&[7, 99]);

    let mut registry = ObjectRegistry::new();
    registry.register(hs(&[99]));

    assert_eq!(
        registry.select_at(&surface, Point::new(5.0, 5.0), 1.0),
        Some(Handle(99))
    );
    assert_eq!(registry.selected(), Some(Handle(99)));
}

#[test]
fn test_select_miss_clears_selection() {
    let mut surface = FixedSurface::default();
    surface.insert(1, rect());
    let mut registry = ObjectRegistry::new();
    registry.register(hs(&[1]));
    surface.overlapping = hs(&[1]);
    registry.select_at(&surface, Point::new(5.0, 5.0), 1.0);

    surface.overlapping.clear();
    assert_eq!(registry.select_at(&surface, Point::new(500.0, 5.0), 1.0), None);
    assert_eq!(registry.selected(), None);
}

#[test]
fn test_remove_clears_selection_and_visuals() {
    let mut surface = SceneSurface::new();
    let a = surface.create_primitive(segment(0.0));
    let b = surface.create_primitive(segment(10.0));
    let mut registry = ObjectRegistry::new();
    registry.register(vec![a, b]);
    registry.select([b]);

    registry.remove_group(&mut surface, b);

    assert_eq!(registry.selected(), None);
    assert!(registry.is_empty());
    assert!(surface.is_empty());
}

#[test]
fn test_remove_twice_is_noop() {
    let mut surface = SceneSurface::new();
    let a = surface.create_primitive(rect());
    let keep = surface.create_primitive(rect());
    let mut registry = ObjectRegistry::new();
    registry.register(vec![a]);
    registry.register(vec![keep]);

    registry.remove_group(&mut surface, a);
    let after_first = snapshot(&registry);
    registry.remove_group(&mut surface, a);

    assert_eq!(snapshot(&registry), after_first);
    assert_eq!(surface.handles(), vec![keep]);
}

#[test]
fn test_move_preserves_grouping() {
    let mut surface = SceneSurface::new();
    let segments: Vec<Handle> = (0..3)
        .map(|i| surface.create_primitive(segment(i as f64 * 10.0)))
        .collect();
    let mut registry = ObjectRegistry::new();
    registry.register(segments.clone());
    let lone = surface.create_primitive(rect());
    registry.register(vec![lone]);
    let before = snapshot(&registry);

    registry.move_group(&mut surface, segments[1], 5.0, 7.0);

    assert_eq!(snapshot(&registry), before);
    assert_eq!(surface.get_geometry(segments[0]), Some(vec![5.0, 7.0, 15.0, 7.0]));
    assert_eq!(surface.get_geometry(segments[2]), Some(vec![25.0, 7.0, 35.0, 7.0]));
    assert_eq!(surface.get_geometry(lone), Some(vec![0.0, 0.0, 10.0, 10.0]));
}

#[test]
fn test_raise_and_lower_keep_group_order() {
    let mut surface = SceneSurface::new();
    let s1 = surface.create_primitive(segment(0.0));
    let s2 = surface.create_primitive(segment(10.0));
    let other = surface.create_primitive(rect());
    let mut registry = ObjectRegistry::new();
    registry.register(vec![s1, s2]);
    registry.register(vec![other]);

    registry.raise_group(&mut surface, s2);
    assert_eq!(surface.handles(), vec![other, s1, s2]);

    registry.lower_group(&mut surface, s1);
    assert_eq!(surface.handles(), vec![s1, s2, other]);
}

#[test]
fn test_erasing_selected_segment_clears_selection() {
    let mut registry = ObjectRegistry::new();
    registry.register(hs(&[1, 2, 3]));
    registry.select(hs(&[2]));
    registry.split_on_erase(Handle(2));
    assert_eq!(registry.selected(), None);
}

#[test]
fn test_clear_drops_everything() {
    let mut registry = ObjectRegistry::new();
    registry.register(hs(&[1, 2]));
    registry.register(hs(&[3]));
    registry.select(hs(&[3]));
    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.handle_count(), 0);
    assert_eq!(registry.selected(), None);
    assert!(!registry.contains(Handle(1)));
}

fn group_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..8, 1..6)
}

proptest! {
    #[test]
    fn every_handle_resolves_to_its_own_group(sizes in group_sizes()) {
        let mut registry = ObjectRegistry::new();
        let mut next = 1u64;
        let mut expected = Vec::new();
        for size in sizes {
            let handles: Vec<Handle> = (next..next + size as u64).map(Handle).collect();
            next += size as u64;
            let id = registry.register(handles.clone());
            expected.push((id, handles));
        }

        for (id, handles) in &expected {
            for h in handles {
                let group = registry.lookup(*h).expect("registered handle must resolve");
                prop_assert_eq!(group.id(), *id);
                prop_assert_eq!(group.handles(), handles.as_slice());
            }
        }
        prop_assert!(registry.lookup(Handle(next)).is_none());
        prop_assert_eq!(registry.handle_count() as u64, next - 1);
    }

    #[test]
    fn split_yields_prefix_and_suffix(
        (len, index) in (1usize..20).prop_flat_map(|n| (Just(n), 0..n))
    ) {
        let handles: Vec<Handle> = (1..=len as u64).map(Handle).collect();
        let mut registry = ObjectRegistry::new();
        registry.register(handles.clone());

        let (before, after) = registry.split_on_erase(handles[index]);

        let expected_before = &handles[..index];
        let expected_after = &handles[index + 1..];
        prop_assert_eq!(before.is_some(), !expected_before.is_empty());
        prop_assert_eq!(after.is_some(), !expected_after.is_empty());
        if let Some(group) = &before {
            prop_assert_eq!(group.handles(), expected_before);
        }
        if let Some(group) = &after {
            prop_assert_eq!(group.handles(), expected_after);
        }

        prop_assert!(!registry.contains(handles[index]));
        prop_assert_eq!(registry.handle_count(), len - 1);
        for h in expected_before {
            prop_assert_eq!(registry.lookup(*h).map(|g| g.handles()), Some(expected_before));
        }
        for h in expected_after {
            prop_assert_eq!(registry.lookup(*h).map(|g| g.handles()), Some(expected_after));
        }
    }
}
