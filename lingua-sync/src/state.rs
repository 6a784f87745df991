//! Run state — durable checkpoint of the last synchronized source revision.
//!
//! Persisted as a small JSON document, written with the same atomic
//! `.tmp` + rename pattern as the target documents. Load failures degrade to
//! "no previous state known" (forcing full-translation treatment of every
//! locale); save failures are fatal, since silently losing the checkpoint
//! would corrupt every future delta.

use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// On-disk run state payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunState {
    pub last_synchronized_revision: String,
    pub synced_at: DateTime<Utc>,
}

impl RunState {
    pub fn new(revision: impl Into<String>) -> Self {
        Self {
            last_synchronized_revision: revision.into(),
            synced_at: Utc::now(),
        }
    }
}

/// Load the run state, or `None` when no usable state exists.
///
/// A missing file is the normal first-run case. A corrupt or unreadable file
/// is logged and treated the same way — never fatal.
pub fn load(path: &Path) -> Option<RunState> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(
                "unreadable run state at {}: {err}; treating as first run",
                path.display()
            );
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(state) => Some(state),
        Err(err) => {
            tracing::warn!(
                "corrupt run state at {}: {err}; treating as first run",
                path.display()
            );
            None
        }
    }
}

/// Save the run state atomically. Writes to `<path>.tmp` then renames.
pub fn save(path: &Path, state: &RunState) -> Result<(), SyncError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| SyncError::StatePersist {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(state)?;
    let tmp = tmp_path(path);
    std::fs::write(&tmp, &json).map_err(|e| SyncError::StatePersist {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SyncError::StatePersist {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    Ok(())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    std::path::PathBuf::from(os)
}
