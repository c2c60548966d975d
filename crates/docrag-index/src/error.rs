//! Error types for docrag-index.

use std::path::PathBuf;

/// Errors that can occur while building, storing, or searching the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// IO error reading documentation or writing the index blob.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Index blob does not exist yet.
    #[error("index not found at {0}, run `docrag index` first")]
    IndexMissing(PathBuf),
}

/// Result type alias using `IndexError`.
pub type Result<T> = std::result::Result<T, IndexError>;
