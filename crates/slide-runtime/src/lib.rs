#![forbid(unsafe_code)]

//! Runtime support for slide-over presentations.
//!
//! - [`reactive`]: [`Observable`] values for state that changes while
//!   presented (preferred content sizes).
//! - [`Timeline`]: a host-ticked [`slide_core::AnimationDriver`].
//! - [`TimelineCoordinator`]: animate-alongside scheduling on a timeline.
//! - [`ViewArena`]: a headless [`slide_core::ViewTree`].
//! - [`TransitionConfig`]: shared presentation settings, loadable from
//!   TOML/JSON with the `policy-config` feature.

pub mod arena;
pub mod config;
pub mod coordinator;
pub mod reactive;
pub mod timeline;

pub use arena::ViewArena;
pub use config::{ConfigError, DEFAULT_BACKDROP_OPACITY, TransitionConfig};
pub use coordinator::TimelineCoordinator;
pub use reactive::{Observable, Subscription};
pub use timeline::{AnimationId, Timeline};
