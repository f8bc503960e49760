//! Error types for nbcache

use thiserror::Error;

/// Result type alias for nbcache operations
pub type Result<T> = std::result::Result<T, NbCacheError>;

/// Error types for nbcache operations
#[derive(Error, Debug)]
pub enum NbCacheError {
    /// Notebook file could not be opened or parsed
    #[error("Cannot read notebook '{path}': {reason}")]
    NotebookRead { path: String, reason: String },

    /// Cache key has no entry in the store (expected miss signal)
    #[error("No cache entry for key '{key}'")]
    KeyNotFound { key: String },

    /// Cache entry exists but is not valid JSON; the file has already
    /// been removed when this is raised
    #[error("Corrupt cache entry for key '{key}' (file removed)")]
    CorruptEntry { key: String },

    /// Execution engine failed to start or communicate
    #[error("Execution engine error: {0}")]
    Engine(String),

    /// A setup cell's source could not be matched back into the setup
    /// set while computing its replay prefix
    #[error("Setup cell source not found in setup set: {cell_source:?}")]
    SetupLookup { cell_source: String },

    /// Cache store I/O failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NbCacheError {
    /// Whether this error signals a cache miss rather than a hard failure.
    ///
    /// A corrupt entry counts as a miss: the store has already deleted
    /// the offending file, so recomputing is the correct response.
    pub fn is_cache_miss(&self) -> bool {
        matches!(
            self,
            NbCacheError::KeyNotFound { .. } | NbCacheError::CorruptEntry { .. }
        )
    }
}
