#![forbid(unsafe_code)]

//! Sizing and positioning policy.
//!
//! Pure functions of (direction, preferred size, container bounds). Nothing
//! here is cached: callers recompute on every layout pass and every frame
//! query, so rotations and live preferred-size changes are picked up as soon
//! as the host asks again.
//!
//! # Invariants
//!
//! - `target_size` never exceeds the parent size on either axis.
//! - The presented frame sits flush against the right edge (`FromRight`) or
//!   bottom edge (`FromBottom`); for `FromLeft` and `FromTop` its origin is
//!   always `(0, 0)`.
//! - The dismissed frame keeps the presented size and moves one axis fully
//!   past the edge the surface enters from.

use slide_core::{Rect, Size, SlideDirection, TransitionPhase};

/// Clamp a preferred content size to the parent container.
///
/// Negative or NaN extents count as zero. A zero preferred size yields a
/// zero-area surface; giving the content a sane preferred size is the
/// caller's job.
pub fn target_size(preferred: Size, parent: Size) -> Size {
    Size::new(
        clamp_extent(preferred.width, parent.width),
        clamp_extent(preferred.height, parent.height),
    )
}

fn clamp_extent(preferred: f64, parent: f64) -> f64 {
    let non_negative = |v: f64| if v.is_nan() || v < 0.0 { 0.0 } else { v };
    non_negative(preferred).min(non_negative(parent))
}

/// On-screen frame for the presented surface inside `container`.
pub fn presented_frame(direction: SlideDirection, preferred: Size, container: Rect) -> Rect {
    let size = target_size(preferred, container.size());
    let frame = match direction {
        SlideDirection::FromRight => {
            Rect::new(container.width - size.width, 0.0, size.width, size.height)
        }
        SlideDirection::FromBottom => {
            Rect::new(0.0, container.height - size.height, size.width, size.height)
        }
        SlideDirection::FromLeft | SlideDirection::FromTop => Rect::from_size(size),
    };
    tracing::trace!(%direction, ?frame, "presented frame");
    frame
}

/// Off-screen frame the surface slides from (presenting) or to (dismissing).
pub fn dismissed_frame(direction: SlideDirection, presented: Rect, container: Rect) -> Rect {
    match direction {
        SlideDirection::FromLeft => presented.with_x(-presented.width),
        SlideDirection::FromRight => presented.with_x(container.width),
        SlideDirection::FromTop => presented.with_y(-presented.height),
        SlideDirection::FromBottom => presented.with_y(container.height),
    }
}

/// `(initial, final)` frames of the animated surface for `phase`.
pub fn transition_frames(phase: TransitionPhase, presented: Rect, dismissed: Rect) -> (Rect, Rect) {
    match phase {
        TransitionPhase::Presenting => (dismissed, presented),
        TransitionPhase::Dismissing => (presented, dismissed),
    }
}
