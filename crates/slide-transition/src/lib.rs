#![forbid(unsafe_code)]

//! Slide-over presentations.
//!
//! A [`SlidingPresentationManager`] is installed as the host's
//! [`slide_core::TransitioningDelegate`]. For every presentation it vends:
//!
//! - a [`SlidingPresentationController`] that sizes the presented view from
//!   its preferred content size, pins it to one container edge, and owns a
//!   [`DimmingOverlay`] that fades in behind it and dismisses on tap;
//! - a [`SlidingPresentationAnimator`] per phase that slides the view in
//!   from, or out to, that edge over [`TRANSITION_DURATION`].
//!
//! Sizing math lives in [`layout`] as pure functions; the session lifecycle
//! is the [`PresentationState`] machine in [`session`].

pub mod animator;
pub mod content;
pub mod controller;
pub mod layout;
pub mod manager;
pub mod overlay;
pub mod session;

pub use animator::{SlidingPresentationAnimator, TRANSITION_DURATION};
pub use content::PresentedContent;
pub use controller::SlidingPresentationController;
pub use layout::{dismissed_frame, presented_frame, target_size, transition_frames};
pub use manager::SlidingPresentationManager;
pub use overlay::{BackdropConfig, DimmingOverlay};
pub use session::{InvalidTransition, PresentationState, SessionEvent, SessionId};
