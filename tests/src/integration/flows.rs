//! # Integration Flows
//!
//! Engine, store and runtime together:
//!
//! 1. **File store round trip**: a state drawn by the engine reloads equal
//! 2. **Racing runtimes**: parallel draws over one file store never lose
//!    or duplicate an assignment
//! 3. **Outage**: reads fall back to the local cache, writes fail cleanly

#[cfg(test)]
mod tests {
    use crate::fixtures::{cyclic_roster, family};
    use gx_01_assignment_engine::{AssignmentApi, AssignmentService, StdRandomSource};
    use gx_02_state_store::{
        CachedRecordStore, ExchangeStore, FileRecordStore, InMemoryRecordStore, LocalCache,
        RecordStore, StoreConfig, StoreError,
    };
    use gx_runtime::{ExchangeRuntime, RuntimeError};
    use shared_types::Roster;
    use std::path::Path;
    use std::sync::Arc;

    fn file_runtime(
        roster: &Roster,
        dir: &Path,
        seed: u64,
    ) -> ExchangeRuntime<FileRecordStore, StdRandomSource> {
        let engine = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(seed));
        let store = FileRecordStore::open(dir, roster.exchange_id()).unwrap();
        let config = StoreConfig {
            max_conflict_retries: 32,
        };
        ExchangeRuntime::new(engine, ExchangeStore::new(store, roster.exchange_id(), config))
    }

    // =========================================================================
    // FILE STORE ROUND TRIP
    // =========================================================================

    #[test]
    fn test_drawn_state_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let roster = family();
        let service = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(5));
        let store = FileRecordStore::open(dir.path(), roster.exchange_id()).unwrap();

        let mut state = service.initialize();
        for giver in roster.participants() {
            state = service.request_assignment(&state, giver).unwrap().state;
        }
        store.compare_and_swap(None, &state).unwrap();

        let reopened = FileRecordStore::open(dir.path(), roster.exchange_id()).unwrap();
        let loaded = reopened.load().unwrap().unwrap();
        assert_eq!(loaded.state, state);
        assert!(service.verify(&loaded.state).valid);
    }

    // =========================================================================
    // RACING RUNTIMES
    // =========================================================================

    #[test]
    fn test_parallel_draws_over_one_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let roster = cyclic_roster(8);
        file_runtime(&roster, dir.path(), 0).init().unwrap();

        let handles: Vec<_> = roster
            .participants()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, giver)| {
                let runtime = file_runtime(&roster, dir.path(), i as u64 + 1);
                std::thread::spawn(move || runtime.assign(&giver).map(|outcome| outcome.receiver))
            })
            .collect();

        let mut receivers: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();
        receivers.sort();
        receivers.dedup();
        assert_eq!(receivers.len(), 8);

        let runtime = file_runtime(&roster, dir.path(), 0);
        let status = runtime.status().unwrap();
        assert_eq!(status.version, 9);
        assert!(status.progress.complete);
        assert!(runtime.verify().unwrap().valid);
    }

    #[test]
    fn test_same_giver_racing_commits_once() {
        let dir = tempfile::tempdir().unwrap();
        let roster = family();
        file_runtime(&roster, dir.path(), 0).init().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let runtime = file_runtime(&roster, dir.path(), i);
                std::thread::spawn(move || runtime.assign(&"Rosa".into()))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            file_runtime(&roster, dir.path(), 0)
                .status()
                .unwrap()
                .progress
                .assigned,
            1
        );
    }

    // =========================================================================
    // OUTAGE
    // =========================================================================

    #[test]
    fn test_cached_reads_survive_primary_outage() {
        let dir = tempfile::tempdir().unwrap();
        let roster = family();
        let primary = Arc::new(InMemoryRecordStore::new(roster.exchange_id()));
        let cached = CachedRecordStore::new(
            Arc::clone(&primary),
            LocalCache::new(dir.path(), roster.exchange_id()),
        );
        let engine = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(2));
        let runtime = ExchangeRuntime::new(
            engine,
            ExchangeStore::new(cached, roster.exchange_id(), StoreConfig::default()),
        );

        runtime.init().unwrap();
        let drawn = runtime.assign(&"Chris".into()).unwrap();

        primary.set_offline(true);
        assert_eq!(
            runtime.lookup(&"Chris".into()).unwrap(),
            Some(drawn.receiver)
        );
        assert!(matches!(
            runtime.assign(&"Alan".into()),
            Err(RuntimeError::Store(StoreError::Unavailable(_)))
        ));

        primary.set_offline(false);
        assert!(runtime.assign(&"Alan".into()).is_ok());
    }
}
