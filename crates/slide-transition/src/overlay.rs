#![forbid(unsafe_code)]

//! Dimming overlay placed behind the presented surface.
//!
//! The overlay is a full-container view tinted with the backdrop color. Its
//! alpha is the animated quantity: 0 while dismissed, 1 while presented,
//! interpolated by the host's transition coordinator in between.
//!
//! Failure modes:
//! - If the container has no bounds (already gone), the overlay keeps its
//!   previous frame.
//! - Without a coordinator, alpha changes apply immediately.

use slide_core::{
    PropertyChange, Rect, Rgba, TapHandler, TransitionCoordinator, ViewId, ViewTree,
};

/// Backdrop configuration (color + opacity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropConfig {
    /// Backdrop color (alpha will be scaled by `opacity`).
    pub color: Rgba,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl BackdropConfig {
    /// Create a new backdrop config.
    pub fn new(color: Rgba, opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// Set backdrop color.
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set backdrop opacity.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Final tint: color with alpha scaled by the clamped opacity.
    pub fn tint(&self) -> Rgba {
        self.color.with_opacity(self.opacity)
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            opacity: 0.5,
        }
    }
}

/// The overlay view of one presentation session.
#[derive(Debug)]
pub struct DimmingOverlay {
    view: ViewId,
}

impl DimmingOverlay {
    /// Create the overlay view, transparent, with `on_tap` registered.
    pub fn create(views: &mut dyn ViewTree, backdrop: &BackdropConfig, on_tap: TapHandler) -> Self {
        let view = views.create_view(backdrop.tint());
        views.set_alpha(view, 0.0);
        views.add_tap_handler(view, on_tap);
        Self { view }
    }

    #[inline]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Put the overlay at the bottom of `container` and size it to the bounds.
    pub fn install(&self, views: &mut dyn ViewTree, container: ViewId) {
        views.insert_subview(container, self.view, 0);
        if let Some(bounds) = views.bounds(container) {
            self.fit(views, bounds);
        }
    }

    /// Whether the overlay currently lives in `container`.
    pub fn is_installed_in(&self, views: &dyn ViewTree, container: ViewId) -> bool {
        views.superview(self.view) == Some(container)
    }

    /// Track the container bounds.
    pub fn fit(&self, views: &mut dyn ViewTree, bounds: Rect) {
        views.set_frame(self.view, bounds);
    }

    /// Drive alpha to `alpha`, alongside the running transition if any.
    pub fn fade_to(
        &self,
        views: &mut dyn ViewTree,
        alpha: f64,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        let change = PropertyChange::alpha(self.view, alpha);
        match coordinator {
            Some(coordinator) => coordinator.animate_alongside(views, vec![change]),
            None => change.apply(views),
        }
    }

    /// Snap alpha to `alpha` immediately.
    pub fn set_alpha(&self, views: &mut dyn ViewTree, alpha: f64) {
        views.set_alpha(self.view, alpha);
    }

    /// Remove the view and its tap handler from the tree.
    pub fn destroy(self, views: &mut dyn ViewTree) {
        views.remove_view(self.view);
    }
}
