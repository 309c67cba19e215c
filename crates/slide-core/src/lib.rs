#![forbid(unsafe_code)]

//! Core types for slide-over presentations.
//!
//! This crate provides:
//! - [`geometry`]: [`Point`], [`Size`], [`Rect`] in surface points
//! - [`SlideDirection`] and [`TransitionPhase`]
//! - the host-facing traits: [`ViewTree`], [`AnimationDriver`],
//!   [`TransitionCoordinator`], [`PresentingContext`], and the capability
//!   sets [`TransitioningDelegate`], [`AnimatedTransitioning`],
//!   [`PresentationLifecycle`]

pub mod animation;
pub mod color;
pub mod direction;
pub mod geometry;
pub mod transition;
pub mod view;

pub use animation::{
    AnimatedProperty, Animation, AnimationCurve, AnimationDriver, Completion, PropertyChange,
};
pub use color::Rgba;
pub use direction::{SlideDirection, TransitionPhase};
pub use geometry::{Point, Rect, Size};
pub use transition::{
    AnimatedTransitioning, CompleteTransition, ContentContainer, PresentationLifecycle,
    PresentingContext, TransitionContext, TransitionCoordinator, TransitionKey,
    TransitioningDelegate,
};
pub use view::{TapHandler, ViewId, ViewTree};
