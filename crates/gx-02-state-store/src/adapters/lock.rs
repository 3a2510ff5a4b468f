//! # Record Locking
//!
//! Serializes read-compute-write cycles on a record file across processes.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). Unlike a data-directory lock, this one blocks until the holder
//! releases it.

use crate::domain::errors::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Exclusive lock on a record, released on drop.
///
/// The lock file itself is never deleted: unlinking it while another
/// process waits would let two holders lock different inodes.
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until the lock at `path` is ours.
    pub fn acquire(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|e| StoreError::Io(format!("open lock {}: {e}", path.display())))?;

        file.lock_exclusive()
            .map_err(|e| StoreError::Io(format!("lock {}: {e}", path.display())))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Take the lock only if nobody holds it.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|e| StoreError::Io(format!("open lock {}: {e}", path.display())))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self {
                file,
                path: path.to_path_buf(),
            })),
            Err(_) => Ok(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_acquire_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.lock");

        let lock = StoreLock::acquire(&path).unwrap();
        assert!(lock.path().exists());
    }

    #[test]
    fn test_second_lock_is_refused_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.lock");

        let held = StoreLock::acquire(&path).unwrap();
        assert!(StoreLock::try_acquire(&path).unwrap().is_none());

        drop(held);
        assert!(StoreLock::try_acquire(&path).unwrap().is_some());
    }

    #[test]
    fn test_lock_file_survives_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.lock");

        drop(StoreLock::acquire(&path).unwrap());
        assert!(path.exists());
    }
}
