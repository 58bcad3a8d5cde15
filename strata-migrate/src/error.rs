//! Error types for the migration engine.

use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Errors that can occur during migration operations.
///
/// Plan building, diffing, and type inference are total functions and never
/// produce errors; everything here comes from the filesystem boundary or
/// from serializing a plan for hashing and persistence.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Plan serialization error (hashing or snapshot writing).
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Snapshot persistence error.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl MigrateError {
    /// Create a snapshot error.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}
