#![forbid(unsafe_code)]

//! View-hierarchy interface consumed from the host.
//!
//! The host owns the actual views; this crate only ever refers to them by
//! [`ViewId`]. Every mutating call on a view the host no longer knows about
//! is a no-op, and every query returns `None`.

use crate::color::Rgba;
use crate::geometry::Rect;

/// Opaque handle to a host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Wrap a raw host identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Callback invoked synchronously by the gesture subsystem on a tap.
pub type TapHandler = Box<dyn FnMut()>;

/// Host view tree: hierarchy edits, geometry, opacity, and tap delivery.
///
/// Subviews are ordered back to front: index 0 is the bottom of the z-order.
pub trait ViewTree {
    /// Create a detached view with the given background color, alpha 1.
    fn create_view(&mut self, background: Rgba) -> ViewId;

    /// Detach `view` and drop it together with its tap handlers.
    fn remove_view(&mut self, view: ViewId);

    /// Insert `child` into `parent` at z-index `index` (clamped to the end).
    fn insert_subview(&mut self, parent: ViewId, child: ViewId, index: usize);

    /// Add `child` on top of `parent`'s existing subviews.
    fn add_subview(&mut self, parent: ViewId, child: ViewId);

    /// Detach `view` from its parent, keeping it alive.
    fn remove_from_superview(&mut self, view: ViewId);

    fn superview(&self, view: ViewId) -> Option<ViewId>;

    /// Children of `view`, back to front.
    fn subviews(&self, view: ViewId) -> Vec<ViewId>;

    /// The view's own coordinate space: origin zero, size of its frame.
    fn bounds(&self, view: ViewId) -> Option<Rect>;

    /// The view's rectangle in its parent's coordinate space.
    fn frame(&self, view: ViewId) -> Option<Rect>;

    fn set_frame(&mut self, view: ViewId, frame: Rect);

    fn alpha(&self, view: ViewId) -> Option<f64>;

    fn set_alpha(&mut self, view: ViewId, alpha: f64);

    /// Register a tap callback on `view`.
    fn add_tap_handler(&mut self, view: ViewId, handler: TapHandler);

    /// Whether the host still knows `view`.
    fn contains(&self, view: ViewId) -> bool {
        self.frame(view).is_some()
    }
}
