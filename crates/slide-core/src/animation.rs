#![forbid(unsafe_code)]

//! Timed-interpolation interface consumed from the host.
//!
//! An [`Animation`] is data: a duration, a curve, and the property values
//! each view should end at. The driver captures the starting values when the
//! animation is scheduled and reports completion exactly once through the
//! [`Completion`] callback, with `finished = false` when interrupted.

use web_time::Duration;

use crate::geometry::Rect;
use crate::view::{ViewId, ViewTree};

/// Completion callback; the flag is `false` when the animation was interrupted.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Easing applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationCurve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl AnimationCurve {
    /// Map linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Target value for one animatable property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedProperty {
    Frame(Rect),
    Alpha(f64),
}

/// One view property animated to a target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyChange {
    pub view: ViewId,
    pub target: AnimatedProperty,
}

impl PropertyChange {
    pub const fn frame(view: ViewId, frame: Rect) -> Self {
        Self {
            view,
            target: AnimatedProperty::Frame(frame),
        }
    }

    pub const fn alpha(view: ViewId, alpha: f64) -> Self {
        Self {
            view,
            target: AnimatedProperty::Alpha(alpha),
        }
    }

    /// Apply the target value immediately, without animation.
    pub fn apply(&self, views: &mut dyn ViewTree) {
        match self.target {
            AnimatedProperty::Frame(frame) => views.set_frame(self.view, frame),
            AnimatedProperty::Alpha(alpha) => views.set_alpha(self.view, alpha),
        }
    }
}

/// A batch of property changes sharing one duration and curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub duration: Duration,
    pub curve: AnimationCurve,
    pub changes: Vec<PropertyChange>,
}

impl Animation {
    /// Create an empty animation with the default curve.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            curve: AnimationCurve::default(),
            changes: Vec::new(),
        }
    }

    /// Set the curve.
    pub fn curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Append a property change.
    pub fn change(mut self, change: PropertyChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Append several property changes.
    pub fn changes(mut self, changes: impl IntoIterator<Item = PropertyChange>) -> Self {
        self.changes.extend(changes);
        self
    }
}

/// Runs timed interpolations of view properties.
pub trait AnimationDriver {
    /// Schedule `animation`, reading start values from `views` now.
    ///
    /// Must return without invoking `completion`; completion happens on a
    /// later turn of the host loop.
    fn animate(&mut self, views: &mut dyn ViewTree, animation: Animation, completion: Completion);
}
