//! Logging utilities
//!
//! The library only emits `tracing` events. Applications embedding it
//! normally install their own subscriber; [`init`] is there for the ones
//! that do not.

use serde::Serialize;
use std::fmt::Debug;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Wrapper for pretty-printing values in logs as YAML
///
/// ```ignore
/// use formsmith::logging::Pretty;
/// tracing::trace!("options:{}", Pretty(field.options()));
/// ```
///
/// Output starts with a newline. Debug is used if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Install a stderr subscriber at `level`, honoring `RUST_LOG` when set.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(level: Level) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("formsmith={level},{}", Level::WARN)));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
