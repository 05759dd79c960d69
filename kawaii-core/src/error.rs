//! Error types for the planner.

use thiserror::Error;

use crate::editor::EditorError;

/// Errors that can occur in planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Could not restore backup: {0}")]
    Restore(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
