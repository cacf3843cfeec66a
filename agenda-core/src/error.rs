//! Error types for the agenda crates.

use thiserror::Error;

/// Errors that can occur in agenda operations.
///
/// `Validation` is kept separate from the infrastructure variants so callers
/// can tell a bad form apart from a failed request.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
