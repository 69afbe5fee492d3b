use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use vecsketch_core::{Bounds, Handle, Point, StyleUpdate};

use crate::surface::RenderSurface;

/// Identifier of a logical object, issued by the registry in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// One logical drawn object: the handles of its primitives in draw order.
///
/// A freehand stroke is one group of many line segments; every committed
/// shape, text or pasted object is a group of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    handles: Vec<Handle>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Always false for a registered group.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.handles.contains(&handle)
    }
}

/// Bookkeeping between logical objects and the primitives that draw them.
///
/// The registry tracks which handles belong together, remembers the
/// selection and applies grouped operations through a [`RenderSurface`]. It
/// never creates primitives itself: the commit paths create them on the
/// surface and then [`register`](Self::register) the result once per
/// gesture.
///
/// # Invariants
///
/// - Every tracked handle maps to exactly one group, and that group lists it.
/// - Handles inside a group keep draw order.
/// - `selected`, when set, is a tracked handle.
///
/// Lookups on untracked handles are not errors: they return `None` or do
/// nothing, since they are what clicking empty canvas (or a transient
/// preview primitive) produces.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    /// Creation order follows from the monotonically increasing ids.
    groups: BTreeMap<GroupId, Group>,
    handle_to_group: HashMap<Handle, GroupId>,
    selected: Option<Handle>,
    next_group_id: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed gesture's primitives as one logical object.
    ///
    /// # Panics
    ///
    /// If `handles` is empty, repeats a handle, or contains a handle that is
    /// already tracked. Each of these means a commit path lost track of its
    /// own primitives, which must not be papered over.
    pub fn register(&mut self, handles: Vec<Handle>) -> GroupId {
        assert!(!handles.is_empty(), "cannot register an empty group");

        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;

        for handle in &handles {
            let previous = self.handle_to_group.insert(*handle, id);
            assert!(
                previous.is_none(),
                "handle {} registered twice (already in {:?})",
                handle,
                previous
            );
        }

        debug!(group = %id, segments = handles.len(), "Registered group");
        self.groups.insert(id, Group { id, handles });
        self.debug_check();
        id
    }

    /// The group containing `handle`, if it is tracked.
    pub fn lookup(&self, handle: Handle) -> Option<&Group> {
        self.handle_to_group
            .get(&handle)
            .and_then(|id| self.groups.get(id))
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.handle_to_group.contains_key(&handle)
    }

    /// Groups in creation order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Number of logical objects.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of tracked handles across all groups.
    pub fn handle_count(&self) -> usize {
        self.handle_to_group.len()
    }

    /// The handle through which the current selection was picked.
    pub fn selected(&self) -> Option<Handle> {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.selected.and_then(|h| self.lookup(h))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selects the first tracked handle among `candidates`, keeping their
    /// order. A miss clears the selection.
    pub fn select(&mut self, candidates: impl IntoIterator<Item = Handle>) -> Option<Handle> {
        self.selected = candidates.into_iter().find(|h| self.contains(*h));
        match self.selected {
            Some(h) => debug!(handle = %h, "Selected object"),
            None => debug!("No tracked object under pointer"),
        }
        self.selected
    }

    /// Selects the first tracked primitive the surface reports within
    /// `tolerance` of `point`.
    pub fn select_at<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &S,
        point: Point,
        tolerance: f64,
    ) -> Option<Handle> {
        let candidates = surface.query_overlapping(Bounds::around(point, tolerance));
        self.select(candidates)
    }

    /// Deletes a whole logical object: its primitives first, then its
    /// bookkeeping. Untracked handles are ignored.
    pub fn remove_group<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, handle: Handle) {
        let Some(group) = self.lookup(handle) else {
            return;
        };
        for h in group.handles() {
            surface.delete_primitive(*h);
        }
        let id = group.id;
        self.forget(id);
        debug!(group = %id, "Removed group");
    }

    /// Splits the group of an erased segment into the parts drawn before and
    /// after it.
    ///
    /// Only bookkeeping changes: deleting the erased primitive is up to the
    /// caller, and the surviving primitives stay where they are. Returns the
    /// new groups, `None` where a side was empty. An untracked handle yields
    /// `(None, None)`.
    pub fn split_on_erase(&mut self, erased: Handle) -> (Option<Group>, Option<Group>) {
        let Some(group) = self.lookup(erased) else {
            return (None, None);
        };
        let id = group.id;
        let handles = group.handles.clone();
        let Some(index) = handles.iter().position(|h| *h == erased) else {
            unreachable!("group {} does not list its own handle {}", id, erased);
        };

        let selected = self.selected;
        self.forget(id);

        let before = &handles[..index];
        let after = &handles[index + 1..];
        let before = (!before.is_empty()).then(|| self.register(before.to_vec()));
        let after = (!after.is_empty()).then(|| self.register(after.to_vec()));

        // A selection on a surviving segment stays valid.
        if selected.is_some_and(|h| h != erased) {
            self.selected = selected;
        }

        debug!(group = %id, at = index, "Split group on erase");
        (
            before.and_then(|g| self.groups.get(&g).cloned()),
            after.and_then(|g| self.groups.get(&g).cloned()),
        )
    }

    /// Translates every primitive of the group containing `handle`.
    pub fn move_group<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        handle: Handle,
        dx: f64,
        dy: f64,
    ) {
        if let Some(group) = self.lookup(handle) {
            for h in group.handles() {
                surface.move_primitive(*h, dx, dy);
            }
        }
    }

    /// Applies one style change to every primitive of the group containing
    /// `handle`.
    pub fn apply_to_group<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        handle: Handle,
        update: &StyleUpdate,
    ) {
        if let Some(group) = self.lookup(handle) {
            for h in group.handles() {
                surface.set_style(*h, update);
            }
        }
    }

    /// Brings the group to the top of the stacking order, keeping its
    /// internal order.
    pub fn raise_group<S: RenderSurface + ?Sized>(&self, surface: &mut S, handle: Handle) {
        if let Some(group) = self.lookup(handle) {
            for h in group.handles() {
                surface.raise(*h);
            }
        }
    }

    /// Sends the group to the bottom of the stacking order, keeping its
    /// internal order.
    pub fn lower_group<S: RenderSurface + ?Sized>(&self, surface: &mut S, handle: Handle) {
        if let Some(group) = self.lookup(handle) {
            for h in group.handles().iter().rev() {
                surface.lower(*h);
            }
        }
    }

    /// Drops all bookkeeping and the selection.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.handle_to_group.clear();
        self.selected = None;
    }

    /// Removes a group's bookkeeping and any selection pointing into it.
    fn forget(&mut self, id: GroupId) {
        if let Some(group) = self.groups.remove(&id) {
            for h in &group.handles {
                self.handle_to_group.remove(h);
            }
            if self.selected.is_some_and(|s| group.contains(s)) {
                self.selected = None;
            }
        }
        self.debug_check();
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let listed: usize = self.groups.values().map(Group::len).sum();
            assert_eq!(listed, self.handle_to_group.len(), "group/handle count mismatch");
            for (h, id) in &self.handle_to_group {
                assert!(
                    self.groups.get(id).is_some_and(|g| g.contains(*h)),
                    "handle {} maps to {} which does not list it",
                    h,
                    id
                );
            }
            if let Some(s) = self.selected {
                assert!(self.contains(s), "selection {} is not tracked", s);
            }
        }
    }
}
