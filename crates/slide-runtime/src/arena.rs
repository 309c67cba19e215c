#![forbid(unsafe_code)]

//! Headless view tree.
//!
//! [`ViewArena`] is an in-memory [`ViewTree`]: views are plain records keyed
//! by [`ViewId`], frames are stored relative to the parent, and taps are
//! hit-tested front to back and delivered to the nearest view (or ancestor)
//! with a registered handler.
//!
//! # Invariants
//!
//! - A view has at most one parent, and appears exactly once in that
//!   parent's child list.
//! - Child lists are ordered back to front.
//! - `remove_view` drops the whole subtree.

use ahash::AHashMap;
use slide_core::{Point, Rect, Rgba, TapHandler, ViewId, ViewTree};

struct ViewNode {
    frame: Rect,
    alpha: f64,
    background: Rgba,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    tap_handlers: Vec<TapHandler>,
}

impl ViewNode {
    fn new(background: Rgba) -> Self {
        Self {
            frame: Rect::ZERO,
            alpha: 1.0,
            background,
            parent: None,
            children: Vec::new(),
            tap_handlers: Vec::new(),
        }
    }
}

/// In-memory view tree.
pub struct ViewArena {
    nodes: AHashMap<ViewId, ViewNode>,
    next_id: u64,
}

impl Default for ViewArena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewArena")
            .field("views", &self.nodes.len())
            .finish()
    }
}

impl ViewArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
            next_id: 1,
        }
    }

    /// Create a detached view with the given frame.
    pub fn create_root(&mut self, frame: Rect) -> ViewId {
        let id = self.create_view(Rgba::TRANSPARENT);
        self.set_frame(id, frame);
        id
    }

    /// Number of live views.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn background(&self, view: ViewId) -> Option<Rgba> {
        self.nodes.get(&view).map(|n| n.background)
    }

    /// Z-index of `view` within its parent.
    pub fn index_in_superview(&self, view: ViewId) -> Option<usize> {
        let parent = self.nodes.get(&view)?.parent?;
        self.nodes
            .get(&parent)?
            .children
            .iter()
            .position(|c| *c == view)
    }

    pub fn tap_handler_count(&self, view: ViewId) -> usize {
        self.nodes.get(&view).map_or(0, |n| n.tap_handlers.len())
    }

    /// Deepest, front-most view under `point` (in `root`'s parent space).
    ///
    /// Views with zero alpha are still hit: a fading overlay stays tappable.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Option<ViewId> {
        let node = self.nodes.get(&root)?;
        if !node.frame.contains(point) {
            return None;
        }
        let local = Point::new(point.x - node.frame.x, point.y - node.frame.y);
        node.children
            .iter()
            .rev()
            .find_map(|child| self.hit_test(*child, local))
            .or(Some(root))
    }

    /// Deliver a tap at `point` to the nearest handler-bearing view.
    ///
    /// Returns the view whose handlers ran, if any.
    pub fn tap(&mut self, root: ViewId, point: Point) -> Option<ViewId> {
        let mut target = self.hit_test(root, point);
        while let Some(view) = target {
            let node = self.nodes.get_mut(&view)?;
            if !node.tap_handlers.is_empty() {
                let mut handlers = std::mem::take(&mut node.tap_handlers);
                for handler in &mut handlers {
                    handler();
                }
                if let Some(node) = self.nodes.get_mut(&view) {
                    node.tap_handlers = handlers;
                }
                return Some(view);
            }
            target = node.parent;
        }
        None
    }

    fn detach(&mut self, view: ViewId) {
        let Some(parent) = self.nodes.get_mut(&view).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|c| *c != view);
        }
    }

    fn can_adopt(&self, parent: ViewId, child: ViewId) -> bool {
        if parent == child || !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child)
        {
            return false;
        }
        // Refuse cycles: `parent` must not live inside `child`.
        let mut cursor = self.nodes.get(&parent).and_then(|n| n.parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return false;
            }
            cursor = self.nodes.get(&ancestor).and_then(|n| n.parent);
        }
        true
    }
}

impl ViewTree for ViewArena {
    fn create_view(&mut self, background: Rgba) -> ViewId {
        let id = ViewId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ViewNode::new(background));
        id
    }

    fn remove_view(&mut self, view: ViewId) {
        self.detach(view);
        let mut pending = vec![view];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                pending.extend(node.children);
            }
        }
    }

    fn insert_subview(&mut self, parent: ViewId, child: ViewId, index: usize) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        self.insert_subview(parent, child, usize::MAX);
    }

    fn remove_from_superview(&mut self, view: ViewId) {
        self.detach(view);
    }

    fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(&view)?.parent
    }

    fn subviews(&self, view: ViewId) -> Vec<ViewId> {
        self.nodes
            .get(&view)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn bounds(&self, view: ViewId) -> Option<Rect> {
        self.nodes.get(&view).map(|n| Rect::from_size(n.frame.size()))
    }

    fn frame(&self, view: ViewId) -> Option<Rect> {
        self.nodes.get(&view).map(|n| n.frame)
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.frame = frame;
        }
    }

    fn alpha(&self, view: ViewId) -> Option<f64> {
        self.nodes.get(&view).map(|n| n.alpha)
    }

    fn set_alpha(&mut self, view: ViewId, alpha: f64) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn add_tap_handler(&mut self, view: ViewId, handler: TapHandler) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.tap_handlers.push(handler);
        }
    }

    fn contains(&self, view: ViewId) -> bool {
        self.nodes.contains_key(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn arena_with_root() -> (ViewArena, ViewId) {
        let mut arena = ViewArena::new();
        let root = arena.create_root(Rect::new(0.0, 0.0, 320.0, 480.0));
        (arena, root)
    }

    #[test]
    fn insert_orders_back_to_front() {
        let (mut arena, root) = arena_with_root();
        let a = arena.create_view(Rgba::BLACK);
        let b = arena.create_view(Rgba::BLACK);
        let c = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, a);
        arena.add_subview(root, b);
        arena.insert_subview(root, c, 0);
        assert_eq!(arena.subviews(root), vec![c, a, b]);
        assert_eq!(arena.index_in_superview(c), Some(0));
        assert_eq!(arena.superview(a), Some(root));
    }

    #[test]
    fn reparenting_moves_view() {
        let (mut arena, root) = arena_with_root();
        let other = arena.create_root(Rect::ZERO);
        let v = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, v);
        arena.add_subview(other, v);
        assert!(arena.subviews(root).is_empty());
        assert_eq!(arena.subviews(other), vec![v]);
    }

    #[test]
    fn cycles_are_refused() {
        let (mut arena, root) = arena_with_root();
        let child = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, child);
        arena.add_subview(child, root);
        assert_eq!(arena.superview(root), None);
        arena.add_subview(child, child);
        assert!(arena.subviews(child).is_empty());
    }

    #[test]
    fn remove_view_drops_subtree() {
        let (mut arena, root) = arena_with_root();
        let a = arena.create_view(Rgba::BLACK);
        let b = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, a);
        arena.add_subview(a, b);
        arena.remove_view(a);
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));
        assert!(arena.subviews(root).is_empty());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn bounds_is_frame_size_at_origin() {
        let (mut arena, _) = arena_with_root();
        let v = arena.create_view(Rgba::BLACK);
        arena.set_frame(v, Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(arena.bounds(v), Some(Rect::new(0.0, 0.0, 30.0, 40.0)));
    }

    #[test]
    fn alpha_is_clamped_and_missing_views_ignored() {
        let (mut arena, root) = arena_with_root();
        arena.set_alpha(root, 3.0);
        assert_eq!(arena.alpha(root), Some(1.0));
        let ghost = ViewId::new(999);
        arena.set_alpha(ghost, 0.5);
        assert_eq!(arena.alpha(ghost), None);
        assert_eq!(arena.frame(ghost), None);
    }

    #[test]
    fn hit_test_prefers_front_most_child() {
        let (mut arena, root) = arena_with_root();
        let back = arena.create_view(Rgba::BLACK);
        let front = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, back);
        arena.add_subview(root, front);
        arena.set_frame(back, Rect::new(0.0, 0.0, 320.0, 480.0));
        arena.set_frame(front, Rect::new(0.0, 280.0, 320.0, 200.0));

        assert_eq!(arena.hit_test(root, Point::new(10.0, 10.0)), Some(back));
        assert_eq!(arena.hit_test(root, Point::new(10.0, 300.0)), Some(front));
        assert_eq!(arena.hit_test(root, Point::new(-1.0, 10.0)), None);
    }

    #[test]
    fn tap_bubbles_to_handler_ancestor() {
        let (mut arena, root) = arena_with_root();
        let parent = arena.create_view(Rgba::BLACK);
        let leaf = arena.create_view(Rgba::BLACK);
        arena.add_subview(root, parent);
        arena.add_subview(parent, leaf);
        arena.set_frame(parent, Rect::new(0.0, 0.0, 100.0, 100.0));
        arena.set_frame(leaf, Rect::new(10.0, 10.0, 10.0, 10.0));

        let taps = Rc::new(Cell::new(0));
        let sink = Rc::clone(&taps);
        arena.add_tap_handler(parent, Box::new(move || sink.set(sink.get() + 1)));

        assert_eq!(arena.tap(root, Point::new(15.0, 15.0)), Some(parent));
        assert_eq!(arena.tap(root, Point::new(50.0, 50.0)), Some(parent));
        assert_eq!(taps.get(), 2);
        assert_eq!(arena.tap_handler_count(parent), 1);
        assert_eq!(arena.tap(root, Point::new(200.0, 200.0)), None);
    }
}
