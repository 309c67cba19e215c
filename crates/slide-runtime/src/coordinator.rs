#![forbid(unsafe_code)]

//! Transition coordinator backed by a [`Timeline`].
//!
//! The host creates one coordinator per transition, before the animator
//! runs, with that transition's duration. Anything scheduled through
//! [`TransitionCoordinator::animate_alongside`] starts on the same timeline
//! turn as the primary animation and therefore ends on the same tick.

use slide_core::{
    Animation, AnimationCurve, AnimationDriver, PropertyChange, TransitionCoordinator, ViewTree,
};
use web_time::Duration;

use crate::timeline::Timeline;

/// Coordinator that schedules alongside animations on a borrowed timeline.
#[derive(Debug)]
pub struct TimelineCoordinator<'a> {
    timeline: &'a mut Timeline,
    duration: Duration,
    curve: AnimationCurve,
    scheduled: usize,
}

impl<'a> TimelineCoordinator<'a> {
    pub fn new(timeline: &'a mut Timeline, duration: Duration) -> Self {
        Self {
            timeline,
            duration,
            curve: AnimationCurve::default(),
            scheduled: 0,
        }
    }

    /// Set the curve shared with the primary animation.
    #[must_use]
    pub fn curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = curve;
        self
    }

    /// How many alongside batches were scheduled through this coordinator.
    #[inline]
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }
}

impl TransitionCoordinator for TimelineCoordinator<'_> {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn curve(&self) -> AnimationCurve {
        self.curve
    }

    fn animate_alongside(&mut self, views: &mut dyn ViewTree, changes: Vec<PropertyChange>) {
        if changes.is_empty() {
            return;
        }
        self.scheduled += 1;
        let animation = Animation::new(self.duration)
            .curve(self.curve)
            .changes(changes);
        self.timeline.animate(
            views,
            animation,
            Box::new(|finished| tracing::trace!(finished, "alongside animation ended")),
        );
    }
}
