#![forbid(unsafe_code)]

//! In-memory host for slide presentations.
//!
//! [`Stage`] drives a [`slide_core::TransitioningDelegate`] the way a UI
//! framework would, against a [`slide_runtime::ViewArena`] and a
//! [`slide_runtime::Timeline`], so whole presentations can be run and
//! inspected deterministically.

pub mod stage;

pub use stage::{Stage, StageError, TransitionRecord};
