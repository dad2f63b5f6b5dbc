//! Error types for storyline.

use thiserror::Error;

/// Errors that can occur while loading projects or configuration.
///
/// The layout core itself never fails: missing dates, empty event sets and
/// stale filters all degrade to a valid scene.
#[derive(Error, Debug)]
pub enum StorylineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorylineError {
    fn from(e: serde_json::Error) -> Self {
        StorylineError::Serialization(e.to_string())
    }
}

/// Result type alias for storyline operations.
pub type StorylineResult<T> = Result<T, StorylineError>;
