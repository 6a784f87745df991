//! Error types for lingua-sync.

use std::path::PathBuf;

use thiserror::Error;

use lingua_core::DocumentError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the document model (source read/parse failures are fatal).
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (run state).
    #[error("run state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Run state could not be persisted. Fatal: silently losing the revision
    /// checkpoint corrupts every future delta.
    #[error("failed to persist run state at {path}: {source}")]
    StatePersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external command (the revision store's `git`) could not be run.
    #[error("failed to run {command}: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
