use crate::domain::errors::StoreError;
use crate::domain::record::StoredRecord;
use crate::ports::outbound::RecordStore;
use gx_01_assignment_engine::AssignmentState;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory record store for tests and single-process use.
///
/// `set_offline(true)` makes every operation fail with `Unavailable`,
/// standing in for an unreachable remote store.
pub struct InMemoryRecordStore {
    exchange_id: String,
    record: Mutex<Option<StoredRecord>>,
    offline: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            record: Mutex::new(None),
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "in-memory store for {} is offline",
                self.exchange_id
            )));
        }
        Ok(())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        self.ensure_online()?;
        Ok(self.record.lock().clone())
    }

    fn compare_and_swap(
        &self,
        expected_version: Option<u64>,
        state: &AssignmentState,
    ) -> Result<StoredRecord, StoreError> {
        self.ensure_online()?;
        let mut slot = self.record.lock();

        let actual = slot.as_ref().map(|record| record.version);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let next = match slot.as_ref() {
            Some(current) => current.successor(state.clone())?,
            None => StoredRecord::first(self.exchange_id.clone(), state.clone())?,
        };
        *slot = Some(next.clone());
        Ok(next)
    }

    fn reset(&self) -> Result<(), StoreError> {
        self.ensure_online()?;
        *self.record.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ParticipantId;

    fn state() -> AssignmentState {
        AssignmentState::new(vec![ParticipantId::from("A"), ParticipantId::from("B")])
    }

    #[test]
    fn test_create_then_update() {
        let store = InMemoryRecordStore::new("x");
        assert_eq!(store.load().unwrap(), None);

        let first = store.compare_and_swap(None, &state()).unwrap();
        assert_eq!(first.version, 1);

        let second = store.compare_and_swap(Some(1), &state()).unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(store.load().unwrap(), Some(second));
    }

    #[test]
    fn test_stale_version_conflicts() {
        let store = InMemoryRecordStore::new("x");
        store.compare_and_swap(None, &state()).unwrap();
        store.compare_and_swap(Some(1), &state()).unwrap();

        let stale = store.compare_and_swap(Some(1), &state());
        assert_eq!(
            stale,
            Err(StoreError::VersionConflict {
                expected: Some(1),
                actual: Some(2)
            })
        );

        let duplicate_create = store.compare_and_swap(None, &state());
        assert!(matches!(
            duplicate_create,
            Err(StoreError::VersionConflict { .. })
        ));
    }

    #[test]
    fn test_reset_clears_record() {
        let store = InMemoryRecordStore::new("x");
        store.compare_and_swap(None, &state()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_offline_store_is_unavailable() {
        let store = InMemoryRecordStore::new("x");
        store.set_offline(true);
        assert!(matches!(store.load(), Err(StoreError::Unavailable(_))));
        store.set_offline(false);
        assert!(store.load().is_ok());
    }
}
