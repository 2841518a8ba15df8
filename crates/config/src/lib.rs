//! Shared configuration for meshedit
//!
//! This crate provides the single source of truth for the defaults used when
//! a caller does not spell out a coordinate space, backend or vertex filter.

use std::path::Path;

use meshedit_ipc::{Backend, Space};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding [`EditConfig::space`]
pub const ENV_SPACE: &str = "MESHEDIT_SPACE";

/// Environment variable overriding [`EditConfig::backend`]
pub const ENV_BACKEND: &str = "MESHEDIT_BACKEND";

/// Environment variable overriding [`EditConfig::selected_only`]
pub const ENV_SELECTED_ONLY: &str = "MESHEDIT_SELECTED_ONLY";

/// Environment variable overriding [`EditConfig::restore_selection`]
pub const ENV_RESTORE_SELECTION: &str = "MESHEDIT_RESTORE_SELECTION";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Space used when a move does not name one
    pub space: Space,
    /// Backend used when a move does not name one
    pub backend: Backend,
    /// Whether vertex index queries return only selected vertices
    pub selected_only: bool,
    /// Whether selection guards restore the captured selection on exit
    pub restore_selection: bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            space: Space::Local,
            backend: Backend::Auto,
            selected_only: true,
            restore_selection: true,
        }
    }
}

impl EditConfig {
    /// Defaults overridden by `MESHEDIT_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_SPACE) {
            match value.parse() {
                Ok(space) => self.space = space,
                Err(e) => warn!("Ignoring {}: {}", ENV_SPACE, e),
            }
        }
        if let Some(value) = lookup(ENV_BACKEND) {
            match value.parse() {
                Ok(backend) => self.backend = backend,
                Err(e) => warn!("Ignoring {}: {}", ENV_BACKEND, e),
            }
        }
        if let Some(value) = lookup(ENV_SELECTED_ONLY) {
            match parse_flag(&value) {
                Some(flag) => self.selected_only = flag,
                None => warn!("Ignoring {}: '{}' is not a boolean", ENV_SELECTED_ONLY, value),
            }
        }
        if let Some(value) = lookup(ENV_RESTORE_SELECTION) {
            match parse_flag(&value) {
                Some(flag) => self.restore_selection = flag,
                None => warn!(
                    "Ignoring {}: '{}' is not a boolean",
                    ENV_RESTORE_SELECTION, value
                ),
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
