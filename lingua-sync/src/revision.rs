//! Revision-addressed content retrieval.
//!
//! The pipeline needs the source document *as of the last synchronized
//! revision* to compute a delta. It depends only on the [`RevisionStore`]
//! trait; [`GitRevisionStore`] is the production implementation, shelling out
//! to `git show`. Tests inject in-memory stores.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::SyncError;

/// A capability that returns a file's content as of a given revision.
pub trait RevisionStore {
    /// Content of `path` at `revision`, or `None` if the file did not exist
    /// at that revision.
    fn content_at(&self, path: &Path, revision: &str) -> Result<Option<String>, SyncError>;
}

/// Revision store backed by a git working copy.
#[derive(Debug, Clone)]
pub struct GitRevisionStore {
    repo_root: PathBuf,
}

impl GitRevisionStore {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// The revision identifier of the current checkout.
    pub fn head(&self) -> Result<String, SyncError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .args(["rev-parse", "HEAD"])
            .output()
            .map_err(|e| SyncError::Command {
                command: "git rev-parse HEAD".to_string(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(SyncError::Command {
                command: "git rev-parse HEAD".to_string(),
                source: std::io::Error::other(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl RevisionStore for GitRevisionStore {
    fn content_at(&self, path: &Path, revision: &str) -> Result<Option<String>, SyncError> {
        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);
        let spec = format!("{revision}:{}", relative.display());
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .args(["show", &spec])
            .output()
            .map_err(|e| SyncError::Command {
                command: format!("git show {spec}"),
                source: e,
            })?;
        if !output.status.success() {
            // Unknown revision or file absent at that revision — both mean
            // "no previous document" to the caller.
            tracing::debug!("git show {spec}: {}", String::from_utf8_lossy(&output.stderr).trim());
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}
