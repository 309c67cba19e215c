#![forbid(unsafe_code)]

//! Slide direction and transition phase.

use std::fmt;

/// The edge a presented surface slides in from (and back out to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlideDirection {
    FromLeft,
    FromRight,
    FromTop,
    #[default]
    FromBottom,
}

impl SlideDirection {
    pub const ALL: [Self; 4] = [
        Self::FromLeft,
        Self::FromRight,
        Self::FromTop,
        Self::FromBottom,
    ];

    /// Whether the slide moves along the x axis.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::FromLeft | Self::FromRight)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromLeft => "from_left",
            Self::FromRight => "from_right",
            Self::FromTop => "from_top",
            Self::FromBottom => "from_bottom",
        }
    }
}

impl fmt::Display for SlideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a presentation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    Presenting,
    Dismissing,
}

impl TransitionPhase {
    #[inline]
    pub const fn from_presenting(is_presenting: bool) -> Self {
        if is_presenting {
            Self::Presenting
        } else {
            Self::Dismissing
        }
    }

    #[inline]
    pub const fn is_presenting(self) -> bool {
        matches!(self, Self::Presenting)
    }

    /// Overlay alpha this phase drives toward.
    #[inline]
    pub const fn target_alpha(self) -> f64 {
        match self {
            Self::Presenting => 1.0,
            Self::Dismissing => 0.0,
        }
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Presenting => "presenting",
            Self::Dismissing => "dismissing",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_from_bottom() {
        assert_eq!(SlideDirection::default(), SlideDirection::FromBottom);
    }

    #[test]
    fn axis() {
        assert!(SlideDirection::FromLeft.is_horizontal());
        assert!(SlideDirection::FromRight.is_horizontal());
        assert!(!SlideDirection::FromTop.is_horizontal());
        assert!(!SlideDirection::FromBottom.is_horizontal());
    }

    #[test]
    fn phase_alpha_targets() {
        assert_eq!(TransitionPhase::Presenting.target_alpha(), 1.0);
        assert_eq!(TransitionPhase::Dismissing.target_alpha(), 0.0);
        assert_eq!(
            TransitionPhase::from_presenting(false),
            TransitionPhase::Dismissing
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SlideDirection::FromRight).unwrap();
        assert_eq!(json, "\"from_right\"");
        let back: SlideDirection = serde_json::from_str("\"from_top\"").unwrap();
        assert_eq!(back, SlideDirection::FromTop);
    }
}
