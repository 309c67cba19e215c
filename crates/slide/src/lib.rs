#![forbid(unsafe_code)]

//! Slide-over presentations: public facade and prelude.
//!
//! Install a [`SlidingPresentationManager`] as the host's transitioning
//! delegate; it vends a controller that sizes and pins the presented view to
//! one edge with a tap-to-dismiss dimming overlay behind it, and animators
//! that slide the view in and out over 300 ms.
//!
//! ```
//! use slide::prelude::*;
//!
//! let manager = SlidingPresentationManager::new(SlideDirection::FromRight);
//! let frame = presented_frame(
//!     manager.direction(),
//!     Size::new(200.0, 480.0),
//!     Rect::new(0.0, 0.0, 320.0, 480.0),
//! );
//! assert_eq!(frame, Rect::new(120.0, 0.0, 200.0, 480.0));
//! ```
//!
//! With the default `config` feature, settings load from TOML or JSON:
//!
//! ```
//! # #[cfg(feature = "config")]
//! # {
//! use slide::prelude::*;
//!
//! let config = TransitionConfig::from_toml_str(r#"direction = "from_left""#)?;
//! let manager = SlidingPresentationManager::from_config(&config);
//! assert_eq!(manager.direction(), SlideDirection::FromLeft);
//! # }
//! # Ok::<(), slide::ConfigError>(())
//! ```

#[cfg(feature = "tracing-json")]
pub mod logging;

pub use slide_core::{
    AnimatedTransitioning, PresentationLifecycle, Rect, Rgba, Size, SlideDirection,
    TransitionPhase, TransitioningDelegate,
};
pub use slide_runtime::{ConfigError, TransitionConfig};
pub use slide_transition::{
    BackdropConfig, PresentationState, PresentedContent, SlidingPresentationAnimator,
    SlidingPresentationController, SlidingPresentationManager, TRANSITION_DURATION,
};

pub mod prelude {
    //! Everything a host needs to install and drive slide presentations.

    pub use slide_core::{
        AnimatedTransitioning, AnimationDriver, ContentContainer, Point, PresentationLifecycle,
        PresentingContext, Rect, Rgba, Size, SlideDirection, TransitionContext,
        TransitionCoordinator, TransitionPhase, TransitioningDelegate, ViewId, ViewTree,
    };
    pub use slide_runtime::{Timeline, TimelineCoordinator, TransitionConfig, ViewArena};
    pub use slide_transition::{
        BackdropConfig, PresentedContent, SlidingPresentationAnimator,
        SlidingPresentationController, SlidingPresentationManager, TRANSITION_DURATION,
        presented_frame,
    };
}
