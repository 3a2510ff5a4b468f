//! Local-cache fallback
//!
//! Reads prefer the primary store and fall back to the last snapshot the
//! cache saw when the primary is unreachable. Writes always go to the
//! primary; a successful write is mirrored into the cache. Cache writes hold
//! their own lock, so runtimes sharing a cache directory never interleave
//! a snapshot, and an older version never replaces a newer one.

use super::file::{read_record, write_record};
use super::lock::StoreLock;
use crate::domain::errors::StoreError;
use crate::domain::record::StoredRecord;
use crate::ports::outbound::RecordStore;
use gx_01_assignment_engine::AssignmentState;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Snapshot of the last record seen, kept on local disk.
pub struct LocalCache {
    path: PathBuf,
    lock_path: PathBuf,
}

impl LocalCache {
    pub fn new<P: AsRef<Path>>(dir: P, exchange_id: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            path: dir.join(format!("{exchange_id}.cache.json")),
            lock_path: dir.join(format!("{exchange_id}.cache.lock")),
        }
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        if let Some(parent) = self.lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        StoreLock::acquire(&self.lock_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        let record = read_record(&self.path)?;
        if let Some(record) = &record {
            record.verify_integrity()?;
        }
        Ok(record)
    }

    pub fn store(&self, record: &StoredRecord) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        // An unreadable snapshot is simply replaced
        if let Ok(Some(cached)) = read_record(&self.path) {
            if cached.exchange_id == record.exchange_id && cached.version > record.version {
                debug!(
                    cached = cached.version,
                    offered = record.version,
                    "Local cache already newer"
                );
                return Ok(());
            }
        }
        write_record(&self.path, record)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Mirror a record, logging instead of failing.
    fn mirror(&self, record: &StoredRecord) {
        if let Err(err) = self.store(record) {
            warn!(path = %self.path.display(), error = %err, "Could not refresh local cache");
        }
    }
}

/// Primary store with a `LocalCache` read fallback.
pub struct CachedRecordStore<P> {
    primary: P,
    cache: LocalCache,
}

impl<P: RecordStore> CachedRecordStore<P> {
    pub fn new(primary: P, cache: LocalCache) -> Self {
        Self { primary, cache }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }
}

impl<P: RecordStore> RecordStore for CachedRecordStore<P> {
    fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        match self.primary.load() {
            Ok(Some(record)) => {
                self.cache.mirror(&record);
                Ok(Some(record))
            }
            Ok(None) => {
                if let Err(err) = self.cache.clear() {
                    warn!(error = %err, "Could not clear stale local cache");
                }
                Ok(None)
            }
            Err(err) if err.is_unavailable() => {
                warn!(error = %err, "Primary store unavailable; reading local cache");
                let cached = self.cache.load()?;
                match &cached {
                    Some(record) => debug!(version = record.version, "Serving cached record"),
                    None => debug!("Local cache is empty"),
                }
                Ok(cached)
            }
            Err(err) => Err(err),
        }
    }

    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError> {
        let record = self.primary.compare_and_swap(expected_version, state)?;
        self.cache.mirror(&record);
        Ok(record)
    }

    fn reset(&self) -> Result<(), StoreError> {
        self.primary.reset()?;
        self.cache.clear()
    }
}
