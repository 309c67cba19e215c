#![forbid(unsafe_code)]

//! Transition configuration.
//!
//! With the `policy-config` feature, [`TransitionConfig`] loads from TOML or
//! JSON. Every field is optional in the file; missing fields take the
//! defaults below.
//!
//! ```toml
//! direction = "from_right"
//! backdrop_color = 0x000000ff
//! backdrop_opacity = 0.5
//! ```
//!
//! # Failure Modes
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Unreadable file | `ConfigError::Io` |
//! | Malformed TOML/JSON | `ConfigError::Parse` |
//! | Opacity outside `[0, 1]` or NaN | `ConfigError::InvalidOpacity` |
//! | Unknown file extension | `ConfigError::UnsupportedFormat` |

use slide_core::{Rgba, SlideDirection};

/// Default backdrop opacity: a half-transparent black scrim.
pub const DEFAULT_BACKDROP_OPACITY: f32 = 0.5;

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    Io(String),
    /// The file could not be parsed.
    Parse(String),
    /// Backdrop opacity was outside `[0.0, 1.0]`.
    InvalidOpacity(f32),
    /// The file extension is neither `toml` nor `json`.
    UnsupportedFormat(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::InvalidOpacity(v) => write!(f, "backdrop opacity {v} outside [0, 1]"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported config format '{ext}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Presentation settings shared by every session a manager creates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct TransitionConfig {
    pub direction: SlideDirection,
    /// Scrim color, packed `0xRRGGBBAA`.
    pub backdrop_color: Rgba,
    /// Scrim opacity in `[0.0, 1.0]`, applied on top of the color's alpha.
    pub backdrop_opacity: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            direction: SlideDirection::FromBottom,
            backdrop_color: Rgba::BLACK,
            backdrop_opacity: DEFAULT_BACKDROP_OPACITY,
        }
    }
}

impl TransitionConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigError::InvalidOpacity(self.backdrop_opacity));
        }
        Ok(())
    }
}

#[cfg(feature = "policy-config")]
impl TransitionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = match ext.as_str() {
            "toml" => Self::from_toml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }?;
        tracing::debug!(
            path = %path.display(),
            direction = %config.direction,
            "loaded transition config"
        );
        Ok(config)
    }
}
