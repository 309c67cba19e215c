#![forbid(unsafe_code)]

//! Slide animator for one transition phase.
//!
//! The animator owns no state beyond its configuration. Each call to
//! [`AnimatedTransitioning::animate_transition`] places the moving view at
//! its initial frame synchronously, hands a single frame animation to the
//! driver, and forwards the driver's `finished` flag to the context's
//! completion exactly once.

use slide_core::{
    AnimatedTransitioning, Animation, AnimationDriver, PropertyChange, Rect,
    SlideDirection, TransitionContext, TransitionKey, TransitionPhase, ViewTree,
};
use web_time::Duration;

use crate::layout::{dismissed_frame, transition_frames};

/// Duration of every slide transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Slides the presented view in from, or out to, one container edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidingPresentationAnimator {
    direction: SlideDirection,
    phase: TransitionPhase,
}

impl SlidingPresentationAnimator {
    pub fn new(direction: SlideDirection, phase: TransitionPhase) -> Self {
        Self { direction, phase }
    }

    /// Animator for `phase`, where `true` means presenting.
    pub fn for_phase(direction: SlideDirection, is_presentation: bool) -> Self {
        Self::new(direction, TransitionPhase::from_presenting(is_presentation))
    }

    #[inline]
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }
}

impl AnimatedTransitioning for SlidingPresentationAnimator {
    fn transition_duration(&self) -> Duration {
        TRANSITION_DURATION
    }

    fn animate_transition(
        &self,
        ctx: TransitionContext,
        views: &mut dyn ViewTree,
        driver: &mut dyn AnimationDriver,
    ) {
        let key = match self.phase {
            TransitionPhase::Presenting => TransitionKey::To,
            TransitionPhase::Dismissing => TransitionKey::From,
        };
        let view = ctx.view(key);
        let container = ctx.container_view();

        if self.phase.is_presenting() {
            views.add_subview(container, view);
        }

        let presented = ctx.final_frame(view);
        let bounds = views.bounds(container).unwrap_or_else(|| {
            tracing::warn!(container = container.id(), "container has no bounds; using zero rect");
            Rect::ZERO
        });
        let dismissed = dismissed_frame(self.direction, presented, bounds);
        let (initial, target) = transition_frames(self.phase, presented, dismissed);

        tracing::debug!(
            direction = %self.direction,
            phase = %self.phase,
            view = view.id(),
            ?initial,
            ?target,
            "starting slide transition"
        );

        views.set_frame(view, initial);
        let animation = Animation::new(self.transition_duration())
            .change(PropertyChange::frame(view, target));
        let complete = ctx.into_completion();
        let phase = self.phase;
        driver.animate(
            views,
            animation,
            Box::new(move |finished| {
                tracing::debug!(%phase, finished, "slide transition ended");
                complete.complete(finished);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_core::{Rgba, ViewId};
    use slide_runtime::{Timeline, ViewArena};
    use std::cell::RefCell;
    use std::rc::Rc;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 320.0, 480.0);
    const STEP: Duration = Duration::from_millis(16);

    struct Scene {
        arena: ViewArena,
        container: ViewId,
        presenting: ViewId,
        presented: ViewId,
        results: Rc<RefCell<Vec<bool>>>,
    }

    fn scene() -> Scene {
        let mut arena = ViewArena::new();
        let container = arena.create_root(CONTAINER);
        let presenting = arena.create_view(Rgba::WHITE);
        arena.add_subview(container, presenting);
        let presented = arena.create_view(Rgba::WHITE);
        Scene {
            arena,
            container,
            presenting,
            presented,
            results: Rc::default(),
        }
    }

    fn context(scene: &Scene, phase: TransitionPhase, final_frame: Rect) -> TransitionContext {
        let (from, to) = match phase {
            TransitionPhase::Presenting => (scene.presenting, scene.presented),
            TransitionPhase::Dismissing => (scene.presented, scene.presenting),
        };
        let results = Rc::clone(&scene.results);
        TransitionContext::new(scene.container, from, to, move |finished| {
            results.borrow_mut().push(finished);
        })
        .with_final_frame(scene.presented, final_frame)
    }

    #[test]
    fn duration_is_fixed() {
        for phase in [TransitionPhase::Presenting, TransitionPhase::Dismissing] {
            let animator = SlidingPresentationAnimator::new(SlideDirection::FromLeft, phase);
            assert_eq!(animator.transition_duration(), Duration::from_millis(300));
        }
    }

    #[test]
    fn presentation_slides_up_from_bottom() {
        let mut s = scene();
        let final_frame = Rect::new(0.0, 280.0, 320.0, 200.0);
        let ctx = context(&s, TransitionPhase::Presenting, final_frame);
        let mut timeline = Timeline::new();

        SlidingPresentationAnimator::for_phase(SlideDirection::FromBottom, true)
            .animate_transition(ctx, &mut s.arena, &mut timeline);

        assert_eq!(s.arena.superview(s.presented), Some(s.container));
        assert_eq!(
            s.arena.frame(s.presented),
            Some(Rect::new(0.0, 480.0, 320.0, 200.0))
        );
        assert!(s.results.borrow().is_empty());

        timeline.settle(&mut s.arena, STEP);
        assert_eq!(s.arena.frame(s.presented), Some(final_frame));
        assert_eq!(*s.results.borrow(), vec![true]);
    }

    #[test]
    fn dismissal_slides_out_to_the_right() {
        let mut s = scene();
        let final_frame = Rect::new(120.0, 0.0, 200.0, 480.0);
        s.arena.add_subview(s.container, s.presented);
        s.arena.set_frame(s.presented, final_frame);
        let ctx = context(&s, TransitionPhase::Dismissing, final_frame);
        let mut timeline = Timeline::new();

        SlidingPresentationAnimator::new(SlideDirection::FromRight, TransitionPhase::Dismissing)
            .animate_transition(ctx, &mut s.arena, &mut timeline);
        assert_eq!(s.arena.frame(s.presented), Some(final_frame));

        timeline.settle(&mut s.arena, STEP);
        assert_eq!(
            s.arena.frame(s.presented),
            Some(Rect::new(320.0, 0.0, 200.0, 480.0))
        );
        assert_eq!(*s.results.borrow(), vec![true]);
    }

    #[test]
    fn left_and_top_start_outside_origin() {
        for (direction, final_frame, start) in [
            (
                SlideDirection::FromLeft,
                Rect::new(0.0, 0.0, 200.0, 480.0),
                Rect::new(-200.0, 0.0, 200.0, 480.0),
            ),
            (
                SlideDirection::FromTop,
                Rect::new(0.0, 0.0, 320.0, 150.0),
                Rect::new(0.0, -150.0, 320.0, 150.0),
            ),
        ] {
            let mut s = scene();
            let ctx = context(&s, TransitionPhase::Presenting, final_frame);
            let mut timeline = Timeline::new();
            SlidingPresentationAnimator::new(direction, TransitionPhase::Presenting)
                .animate_transition(ctx, &mut s.arena, &mut timeline);
            assert_eq!(s.arena.frame(s.presented), Some(start), "{direction}");
        }
    }

    #[test]
    fn interruption_reports_unfinished_once() {
        let mut s = scene();
        let ctx = context(
            &s,
            TransitionPhase::Presenting,
            Rect::new(0.0, 280.0, 320.0, 200.0),
        );
        let mut timeline = Timeline::new();
        SlidingPresentationAnimator::for_phase(SlideDirection::FromBottom, true)
            .animate_transition(ctx, &mut s.arena, &mut timeline);

        timeline.tick(&mut s.arena, Duration::from_millis(100));
        assert_eq!(timeline.interrupt_all(), 1);
        timeline.settle(&mut s.arena, STEP);
        assert_eq!(*s.results.borrow(), vec![false]);
    }

    #[test]
    fn missing_final_frame_animates_from_zero_rect() {
        let mut s = scene();
        let results = Rc::clone(&s.results);
        let ctx = TransitionContext::new(s.container, s.presenting, s.presented, move |f| {
            results.borrow_mut().push(f);
        });
        let mut timeline = Timeline::new();
        SlidingPresentationAnimator::for_phase(SlideDirection::FromBottom, true)
            .animate_transition(ctx, &mut s.arena, &mut timeline);
        assert_eq!(
            s.arena.frame(s.presented),
            Some(Rect::new(0.0, 480.0, 0.0, 0.0))
        );
        timeline.settle(&mut s.arena, STEP);
        assert_eq!(s.arena.frame(s.presented), Some(Rect::ZERO));
    }
}
