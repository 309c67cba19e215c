#![forbid(unsafe_code)]

//! Transitioning delegate that vends sliding controllers and animators.

use std::cell::Cell;
use std::rc::Rc;

use slide_core::{
    AnimatedTransitioning, ContentContainer, PresentationLifecycle, PresentingContext,
    SlideDirection, TransitionPhase, TransitioningDelegate, ViewId,
};
use slide_runtime::TransitionConfig;

use crate::animator::SlidingPresentationAnimator;
use crate::controller::SlidingPresentationController;
use crate::overlay::BackdropConfig;

/// Factory for sliding presentations.
///
/// The direction can be changed at any time through a shared reference;
/// it is read when a controller or animator is vended, so a change affects
/// only presentations started afterwards.
///
/// # Example
///
/// ```
/// use slide_core::SlideDirection;
/// use slide_transition::SlidingPresentationManager;
///
/// let manager = SlidingPresentationManager::default();
/// assert_eq!(manager.direction(), SlideDirection::FromBottom);
/// manager.set_direction(SlideDirection::FromRight);
/// assert_eq!(manager.direction(), SlideDirection::FromRight);
/// ```
#[derive(Debug, Default)]
pub struct SlidingPresentationManager {
    direction: Cell<SlideDirection>,
    backdrop: BackdropConfig,
}

impl SlidingPresentationManager {
    pub fn new(direction: SlideDirection) -> Self {
        Self {
            direction: Cell::new(direction),
            backdrop: BackdropConfig::default(),
        }
    }

    /// Build a manager from loaded configuration.
    pub fn from_config(config: &TransitionConfig) -> Self {
        Self::new(config.direction).with_backdrop(
            BackdropConfig::default()
                .color(config.backdrop_color)
                .opacity(config.backdrop_opacity),
        )
    }

    #[must_use]
    pub fn with_backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }

    #[inline]
    pub fn direction(&self) -> SlideDirection {
        self.direction.get()
    }

    pub fn set_direction(&self, direction: SlideDirection) {
        let previous = self.direction.replace(direction);
        if previous != direction {
            tracing::debug!(%previous, %direction, "slide direction changed");
        }
    }

    #[inline]
    pub fn backdrop(&self) -> BackdropConfig {
        self.backdrop
    }

    /// A new controller for one presentation, using the current direction.
    pub fn make_presentation_controller(
        &self,
        presented: Rc<dyn ContentContainer>,
        presenting: Rc<dyn PresentingContext>,
    ) -> SlidingPresentationController {
        SlidingPresentationController::new(presented, presenting, self.direction(), self.backdrop)
    }

    /// A new animator for `phase`, using the current direction.
    pub fn make_animator(&self, phase: TransitionPhase) -> SlidingPresentationAnimator {
        SlidingPresentationAnimator::new(self.direction(), phase)
    }
}

impl TransitioningDelegate for SlidingPresentationManager {
    fn presentation_controller(
        &self,
        presented: Rc<dyn ContentContainer>,
        presenting: Rc<dyn PresentingContext>,
        source: ViewId,
    ) -> Box<dyn PresentationLifecycle> {
        tracing::trace!(source = source.id(), "vending presentation controller");
        Box::new(self.make_presentation_controller(presented, presenting))
    }

    fn animator_for_presentation(&self) -> Box<dyn AnimatedTransitioning> {
        Box::new(self.make_animator(TransitionPhase::Presenting))
    }

    fn animator_for_dismissal(&self) -> Box<dyn AnimatedTransitioning> {
        Box::new(self.make_animator(TransitionPhase::Dismissing))
    }
}
