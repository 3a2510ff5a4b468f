use super::lock::StoreLock;
use crate::domain::errors::StoreError;
use crate::domain::record::StoredRecord;
use crate::ports::outbound::RecordStore;
use gx_01_assignment_engine::AssignmentState;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed record store.
///
/// One pretty-printed JSON document per exchange at
/// `<dir>/<exchange_id>.json`. Each operation holds `<exchange_id>.lock`
/// for its whole read-compare-write, so separate processes sharing the
/// directory cannot interleave writes.
pub struct FileRecordStore {
    exchange_id: String,
    path: PathBuf,
    lock_path: PathBuf,
    guard: Mutex<()>,
}

impl FileRecordStore {
    /// Open (or prepare) the store under `dir`, creating the directory.
    pub fn open<P: AsRef<Path>>(dir: P, exchange_id: impl Into<String>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let exchange_id = exchange_id.into();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(format!("{exchange_id}.json"));
        if let Ok(metadata) = std::fs::metadata(&path) {
            info!(
                path = %path.display(),
                bytes = metadata.len(),
                "Found existing exchange record"
            );
        } else {
            info!(path = %path.display(), "No exchange record yet");
        }

        Ok(Self {
            lock_path: dir.join(format!("{exchange_id}.lock")),
            exchange_id,
            path,
            guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_checked(&self) -> Result<Option<StoredRecord>, StoreError> {
        let Some(record) = read_record(&self.path)? else {
            return Ok(None);
        };
        if record.exchange_id != self.exchange_id {
            return Err(StoreError::ExchangeMismatch {
                expected: self.exchange_id.clone(),
                found: record.exchange_id,
            });
        }
        record.verify_integrity()?;
        Ok(Some(record))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        let _guard = self.guard.lock();
        let _lock = StoreLock::acquire(&self.lock_path)?;
        self.read_checked()
    }

    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError> {
        let _guard = self.guard.lock();
        let _lock = StoreLock::acquire(&self.lock_path)?;

        let current = self.read_checked()?;
        let actual = current.as_ref().map(|record| record.version);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let next = match current {
            Some(record) => record.successor(state.clone())?,
            None => StoredRecord::first(self.exchange_id.clone(), state.clone())?,
        };
        write_record(&self.path, &next)?;
        debug!(path = %self.path.display(), version = next.version, "Record written");
        Ok(next)
    }

    fn reset(&self) -> Result<(), StoreError> {
        let _guard = self.guard.lock();
        let _lock = StoreLock::acquire(&self.lock_path)?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read a record document; a missing file is `None`.
pub(crate) fn read_record(path: &Path) -> Result<Option<StoredRecord>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Write atomically via temp file and rename.
pub(crate) fn write_record(path: &Path, record: &StoredRecord) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let bytes = serde_json::to_vec_pretty(record)?;
    let temp_path = path.with_extension("tmp");
    let mut file = std::fs::File::create(&temp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    std::fs::rename(&temp_path, path)?;
    Ok(())
}
