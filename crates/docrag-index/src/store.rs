//! Index persistence: a single pretty-printed JSON blob on disk.

use std::path::Path;

use crate::document::DocIndex;
use crate::error::{IndexError, Result};

/// Write the index as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the file cannot be
/// written, or serialization fails.
pub fn save(index: &DocIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(index)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), chunks = index.total_chunks, "index saved");
    Ok(())
}

/// Load an index from disk.
///
/// # Errors
///
/// Returns [`IndexError::IndexMissing`] when the file does not exist, so
/// callers can tell the user to run the index command first.
pub fn load(path: &Path) -> Result<DocIndex> {
    if !path.exists() {
        return Err(IndexError::IndexMissing(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    let index = serde_json::from_str(&json)?;
    Ok(index)
}
