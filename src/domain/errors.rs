//! Domain errors for the stigmergy board.

use thiserror::Error;

/// Errors raised inside the board and its collaborators.
///
/// None of these are fatal to a coordinating agent: persistence failures
/// are logged and the board keeps serving from memory, and a degraded
/// snapshot load starts the board with whatever decoded cleanly.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Snapshot I/O failed: {0}")]
    SnapshotIo(String),

    #[error("Malformed snapshot file: {0}")]
    MalformedSnapshot(String),

    #[error("Unsupported snapshot schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("Task execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BoardResult<T> = Result<T, BoardError>;

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        BoardError::SnapshotIo(err.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization(err.to_string())
    }
}
