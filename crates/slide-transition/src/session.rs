#![forbid(unsafe_code)]

//! Presentation session state machine.
//!
//! ```text
//! Initial ──will_begin(presenting)──▶ PresentationAnimating
//! PresentationAnimating ──did_end(presenting, true)──▶ Presented
//! PresentationAnimating ──did_end(presenting, false)─▶ Dismissed
//! Presented ──will_begin(dismissing)──▶ DismissalAnimating
//! DismissalAnimating ──did_end(dismissing, true)──▶ Dismissed
//! DismissalAnimating ──did_end(dismissing, false)─▶ Presented
//! ```
//!
//! `Dismissed` is terminal. Any other (state, event) pair is rejected with
//! [`InvalidTransition`] and leaves the state unchanged.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slide_core::TransitionPhase;

/// Global counter for session IDs.
static SESSION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a presentation session, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn next() -> Self {
        Self(SESSION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
    #[default]
    Initial,
    PresentationAnimating,
    Presented,
    DismissalAnimating,
    Dismissed,
}

/// Lifecycle input from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    WillBegin(TransitionPhase),
    DidEnd {
        phase: TransitionPhase,
        completed: bool,
    },
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WillBegin(phase) => write!(f, "will_begin({phase})"),
            Self::DidEnd { phase, completed } => write!(f, "did_end({phase}, {completed})"),
        }
    }
}

/// A lifecycle event that does not apply to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: PresentationState,
    pub event: SessionEvent,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {} not valid in state {:?}", self.event, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

impl PresentationState {
    /// Next state for `event`, or an error if the event is out of sequence.
    pub fn next(self, event: SessionEvent) -> Result<Self, InvalidTransition> {
        use PresentationState as S;
        use TransitionPhase::{Dismissing, Presenting};

        let next = match (self, event) {
            (S::Initial, SessionEvent::WillBegin(Presenting)) => S::PresentationAnimating,
            (
                S::PresentationAnimating,
                SessionEvent::DidEnd {
                    phase: Presenting,
                    completed,
                },
            ) => {
                if completed {
                    S::Presented
                } else {
                    S::Dismissed
                }
            }
            (S::Presented, SessionEvent::WillBegin(Dismissing)) => S::DismissalAnimating,
            (
                S::DismissalAnimating,
                SessionEvent::DidEnd {
                    phase: Dismissing,
                    completed,
                },
            ) => {
                if completed {
                    S::Dismissed
                } else {
                    S::Presented
                }
            }
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// Resting overlay alpha, or `None` while a transition interpolates it.
    pub const fn overlay_alpha(self) -> Option<f64> {
        match self {
            Self::Initial | Self::Dismissed => Some(0.0),
            Self::Presented => Some(1.0),
            Self::PresentationAnimating | Self::DismissalAnimating => None,
        }
    }

    #[inline]
    pub const fn is_animating(self) -> bool {
        matches!(
            self,
            Self::PresentationAnimating | Self::DismissalAnimating
        )
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dismissed)
    }
}
