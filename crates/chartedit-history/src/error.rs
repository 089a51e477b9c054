#![forbid(unsafe_code)]

//! Error types for history construction and configuration loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Rejected attempts to build history records that would break the
/// done/undone partition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("action snapshot must contain at least one entity")]
    EmptySnapshot,

    #[error("action group must contain at least one action")]
    EmptyGroup,
}

/// Errors from loading or validating a [`HistoryConfig`](crate::HistoryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid history config: {}", .0.join("; "))]
    Validation(Vec<String>),
}
