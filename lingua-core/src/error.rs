//! Error types for lingua-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from document handling.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
