//! Atomic target-document writer.
//!
//! Write protocol:
//! 1. Ensure the parent directory exists.
//! 2. Write to `<path>.lingua.tmp`.
//! 3. Rename to the final path (atomic on POSIX), removing the tmp file on
//!    rename failure.
//!
//! Whether a write is needed at all is the synchronizer's decision; this
//! module only makes the write itself safe against partial files.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Atomically write `content` to `path`.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let tmp = PathBuf::from(format!("{}.lingua.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}
