#![forbid(unsafe_code)]

//! Per-transition host objects and the capability sets exchanged with the
//! host's presentation orchestration.
//!
//! The host drives a presentation through these points, in order:
//!
//! 1. [`TransitioningDelegate::presentation_controller`] once per session,
//!    then [`PresentationLifecycle::set_container_view`].
//! 2. Per phase: [`PresentationLifecycle::on_will_begin`] (with a
//!    [`TransitionCoordinator`] when one is running), then
//!    [`AnimatedTransitioning::animate_transition`] on the animator for that
//!    phase, then [`PresentationLifecycle::on_did_end`] once the context's
//!    completion has been reported.
//! 3. Any time while the session is alive: layout passes
//!    ([`PresentationLifecycle::on_layout_invalidated`]), preferred-size
//!    changes, frame queries, and overlay taps.

use std::fmt;
use std::rc::Rc;

use web_time::Duration;

use crate::animation::{AnimationCurve, AnimationDriver, PropertyChange};
use crate::direction::TransitionPhase;
use crate::geometry::{Rect, Size};
use crate::view::{ViewId, ViewTree};

/// Which end of a transition a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKey {
    /// The view being transitioned away from.
    From,
    /// The view being transitioned to.
    To,
}

/// Content that can be presented: a root view plus a size hint.
pub trait ContentContainer {
    fn view(&self) -> ViewId;

    /// Size the content would like; may change while presented.
    fn preferred_content_size(&self) -> Size;
}

/// The context that presented the content and can take it down again.
pub trait PresentingContext {
    /// Ask the host to dismiss whatever this context presented.
    fn dismiss(&self, animated: bool);
}

/// Hook for animating alongside a transition already in flight.
pub trait TransitionCoordinator {
    /// Duration of the running transition.
    fn duration(&self) -> Duration;

    /// Curve of the running transition.
    fn curve(&self) -> AnimationCurve;

    /// Schedule `changes` with the running transition's timing.
    fn animate_alongside(&mut self, views: &mut dyn ViewTree, changes: Vec<PropertyChange>);
}

/// One-shot handle that reports the end of a transition to the host.
pub struct CompleteTransition(Box<dyn FnOnce(bool)>);

impl CompleteTransition {
    pub fn new(f: impl FnOnce(bool) + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Report completion. Consumes the handle, so it can fire at most once.
    pub fn complete(self, finished: bool) {
        (self.0)(finished)
    }
}

impl fmt::Debug for CompleteTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompleteTransition(..)")
    }
}

/// Everything an animator needs for one phase of a transition.
#[derive(Debug)]
pub struct TransitionContext {
    container: ViewId,
    from: ViewId,
    to: ViewId,
    final_frames: Vec<(ViewId, Rect)>,
    completion: CompleteTransition,
}

impl TransitionContext {
    pub fn new(
        container: ViewId,
        from: ViewId,
        to: ViewId,
        completion: impl FnOnce(bool) + 'static,
    ) -> Self {
        Self {
            container,
            from,
            to,
            final_frames: Vec::new(),
            completion: CompleteTransition::new(completion),
        }
    }

    /// Record the frame `view` should have when the transition ends.
    #[must_use]
    pub fn with_final_frame(mut self, view: ViewId, frame: Rect) -> Self {
        self.final_frames.retain(|(v, _)| *v != view);
        self.final_frames.push((view, frame));
        self
    }

    /// The view hosting the transition.
    #[inline]
    pub fn container_view(&self) -> ViewId {
        self.container
    }

    #[inline]
    pub fn view(&self, key: TransitionKey) -> ViewId {
        match key {
            TransitionKey::From => self.from,
            TransitionKey::To => self.to,
        }
    }

    /// Final frame for `view`, or [`Rect::ZERO`] when the host supplied none.
    pub fn final_frame(&self, view: ViewId) -> Rect {
        self.final_frames
            .iter()
            .find(|(v, _)| *v == view)
            .map_or(Rect::ZERO, |(_, frame)| *frame)
    }

    /// Give up the context, keeping only the completion handle.
    pub fn into_completion(self) -> CompleteTransition {
        self.completion
    }
}

/// Animated-transitioning capability set.
pub trait AnimatedTransitioning {
    fn transition_duration(&self) -> Duration;

    /// Start the transition. Returns immediately; the context's completion is
    /// reported later by the driver.
    fn animate_transition(
        &self,
        ctx: TransitionContext,
        views: &mut dyn ViewTree,
        driver: &mut dyn AnimationDriver,
    );
}

/// Lifecycle callbacks a presentation controller receives from the host.
pub trait PresentationLifecycle {
    /// Attach (or detach, with `None`) the container the host created.
    fn set_container_view(&mut self, container: Option<ViewId>);

    fn container_view(&self) -> Option<ViewId>;

    /// A transition is about to start.
    fn on_will_begin(
        &mut self,
        phase: TransitionPhase,
        views: &mut dyn ViewTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    );

    /// A transition finished; `completed` is `false` when it was cancelled.
    fn on_did_end(&mut self, phase: TransitionPhase, completed: bool, views: &mut dyn ViewTree);

    /// The container is about to lay out its subviews.
    fn on_layout_invalidated(&mut self, views: &mut dyn ViewTree);

    /// The presented content changed its preferred size.
    fn on_preferred_size_changed(&mut self, views: &mut dyn ViewTree);

    /// Frame the presented view should occupy in the container right now.
    fn on_frame_query(&self, views: &dyn ViewTree) -> Option<Rect>;

    /// The dimming overlay was tapped.
    fn on_overlay_tapped(&mut self);
}

/// Transitioning-delegate capability set: per-session factory.
pub trait TransitioningDelegate {
    fn presentation_controller(
        &self,
        presented: Rc<dyn ContentContainer>,
        presenting: Rc<dyn PresentingContext>,
        source: ViewId,
    ) -> Box<dyn PresentationLifecycle>;

    fn animator_for_presentation(&self) -> Box<dyn AnimatedTransitioning>;

    fn animator_for_dismissal(&self) -> Box<dyn AnimatedTransitioning>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn final_frame_defaults_to_zero() {
        let ctx = TransitionContext::new(ViewId::new(1), ViewId::new(2), ViewId::new(3), |_| {});
        assert_eq!(ctx.final_frame(ViewId::new(3)), Rect::ZERO);
    }

    #[test]
    fn final_frame_last_write_wins() {
        let v = ViewId::new(3);
        let ctx = TransitionContext::new(ViewId::new(1), ViewId::new(2), v, |_| {})
            .with_final_frame(v, Rect::new(0.0, 0.0, 1.0, 1.0))
            .with_final_frame(v, Rect::new(0.0, 280.0, 320.0, 200.0));
        assert_eq!(ctx.final_frame(v), Rect::new(0.0, 280.0, 320.0, 200.0));
    }

    #[test]
    fn keys_resolve_views() {
        let ctx = TransitionContext::new(ViewId::new(1), ViewId::new(2), ViewId::new(3), |_| {});
        assert_eq!(ctx.container_view(), ViewId::new(1));
        assert_eq!(ctx.view(TransitionKey::From), ViewId::new(2));
        assert_eq!(ctx.view(TransitionKey::To), ViewId::new(3));
    }

    #[test]
    fn completion_forwards_flag() {
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let ctx = TransitionContext::new(ViewId::new(1), ViewId::new(2), ViewId::new(3), move |f| {
            sink.set(Some(f))
        });
        ctx.into_completion().complete(false);
        assert_eq!(seen.get(), Some(false));
    }
}
