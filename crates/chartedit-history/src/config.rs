#![forbid(unsafe_code)]

//! Tunables for the history timeline.
//!
//! With the `config` feature enabled a [`HistoryConfig`] can be loaded from
//! TOML or JSON at startup:
//!
//! ```toml
//! # chartedit-history.toml
//! action_window_ms = 200
//! sync_view_scope = true
//! ```
//!
//! ```rust,ignore
//! let config = HistoryConfig::from_toml_file("chartedit-history.toml")?;
//! ```
//!
//! Missing keys fall back to [`HistoryConfig::default`].

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default merge window between consecutive history entries.
pub const DEFAULT_ACTION_WINDOW_MS: u64 = 200;

/// Configuration for [`Timeline`](crate::Timeline).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HistoryConfig {
    /// Entries whose timestamps lie strictly within this many milliseconds
    /// of the first entry of an undo/redo run are reverted or replayed
    /// together.
    pub action_window_ms: u64,
    /// Switch the editor's view scope to the focus entity's scope after
    /// undo and redo.
    pub sync_view_scope: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            action_window_ms: DEFAULT_ACTION_WINDOW_MS,
            sync_view_scope: true,
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_action_window(mut self, window: Duration) -> Self {
        self.action_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_sync_view_scope(mut self, sync: bool) -> Self {
        self.sync_view_scope = sync;
        self
    }

    #[must_use]
    pub fn action_window(&self) -> Duration {
        Duration::from_millis(self.action_window_ms)
    }

    /// Validate all parameters. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.action_window_ms == 0 {
            errors.push("action_window_ms must be > 0".into());
        }
        errors
    }

    /// `self` if valid, otherwise every validation message.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
