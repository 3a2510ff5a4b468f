//! # Outbound Ports (Driven Ports)
//!
//! Backing storage for the exchange record.

use crate::domain::errors::StoreError;
use crate::domain::record::StoredRecord;
use gx_01_assignment_engine::AssignmentState;

/// Abstract interface for the versioned exchange record.
///
/// Production: `FileRecordStore`, optionally behind `CachedRecordStore`
/// Testing: `InMemoryRecordStore`
pub trait RecordStore: Send + Sync {
    /// Current record, if one exists.
    fn load(&self) -> Result<Option<StoredRecord>, StoreError>;

    /// Replace the record only if its version is still `expected_version`.
    ///
    /// `None` means create-if-absent. On success the new record carries
    /// `expected_version + 1` (or 1 on create).
    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError>;

    /// Delete the record for a new cycle.
    fn reset(&self) -> Result<(), StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        (**self).load()
    }

    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError> {
        (**self).compare_and_swap(expected_version, state)
    }

    fn reset(&self) -> Result<(), StoreError> {
        (**self).reset()
    }
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        (**self).load()
    }

    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError> {
        (**self).compare_and_swap(expected_version, state)
    }

    fn reset(&self) -> Result<(), StoreError> {
        (**self).reset()
    }
}
