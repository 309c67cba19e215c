#![forbid(unsafe_code)]

//! Structured JSON logging for hosts that have no subscriber of their own.

use tracing_subscriber::EnvFilter;

/// Install a global JSON subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used (for
/// example `"slide_transition=debug"`). Fails if the filter does not parse
/// or a global subscriber is already installed.
pub fn init_json(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}
