//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create, read, write, list, or delete a filesystem entry.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create an IO error with the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
