use crate::error::Result;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive lock serializing changer invocations on one host. The backup
/// daemon may start several changer commands at once; the lock totally
/// orders them, queries included.
///
/// Held for the whole invocation and released on drop; the OS releases the
/// advisory lock when the process exits.
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Blocks without timeout until the lock is ours.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        debug!("Waiting for run lock: {}", path.display());
        file.lock_exclusive()?;
        debug!("Run lock acquired: {}", path.display());

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!("Run lock released: {}", self.path.display());
    }
}
