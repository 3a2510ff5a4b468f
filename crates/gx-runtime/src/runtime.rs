//! # Exchange Runtime
//!
//! One exchange: roster, engine and store. Every mutating call is a single
//! `transact` cycle, so concurrent invocations against the same record
//! cannot both commit against the same pre-state.

use crate::config::RuntimeConfig;
use crate::errors::RuntimeError;
use chrono::{DateTime, Utc};
use gx_01_assignment_engine::{
    AssignmentApi, AssignmentError, AssignmentService, AssignmentState, ExchangeProgress,
    RandomSource, StdRandomSource, VerificationReport,
};
use gx_02_state_store::{
    CachedRecordStore, ExchangeStore, FileRecordStore, LocalCache, RecordStore, StoreError,
    StoredRecord,
};
use serde::Serialize;
use shared_types::{ParticipantId, Roster};
use std::collections::BTreeSet;
use tracing::{info, warn};

pub type DynRecordStore = Box<dyn RecordStore>;

/// Result of `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitOutcome {
    /// False when an existing record for the same roster was kept
    pub created: bool,
    pub version: u64,
    pub progress: ExchangeProgress,
}

/// Result of `assign`. Carries the secret receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignOutcome {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
    pub attempts: u32,
    pub version: u64,
    pub progress: ExchangeProgress,
}

/// Result of `declare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclareOutcome {
    pub version: u64,
    pub progress: ExchangeProgress,
}

/// Result of `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub exchange_id: String,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub progress: ExchangeProgress,
}

pub struct ExchangeRuntime<S: RecordStore = DynRecordStore, R: RandomSource = StdRandomSource> {
    roster: Roster,
    engine: AssignmentService<R>,
    store: ExchangeStore<S>,
}

impl ExchangeRuntime {
    /// Wire a runtime from configuration: roster file, file store (with
    /// optional local cache) and a seeded or entropy RNG.
    pub fn open(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        let roster = Roster::from_json_file(&config.roster_path)?;
        let exchange_id = roster.exchange_id().to_string();

        let primary = FileRecordStore::open(&config.data_dir, exchange_id.clone())?;
        let store: DynRecordStore = match &config.cache_dir {
            Some(dir) => Box::new(CachedRecordStore::new(
                primary,
                LocalCache::new(dir, &exchange_id),
            )),
            None => Box::new(primary),
        };

        let random = match config.seed {
            Some(seed) => StdRandomSource::from_seed(seed),
            None => StdRandomSource::from_entropy(),
        };

        info!(
            exchange_id = %exchange_id,
            participants = roster.len(),
            data_dir = %config.data_dir.display(),
            cached = config.cache_dir.is_some(),
            "Exchange runtime ready"
        );

        let engine = AssignmentService::with_config(roster, random, config.engine.clone());
        let store = ExchangeStore::new(store, exchange_id, config.store.clone());
        Ok(Self::new(engine, store))
    }
}

impl<S: RecordStore, R: RandomSource> ExchangeRuntime<S, R> {
    pub fn new(engine: AssignmentService<R>, store: ExchangeStore<S>) -> Self {
        Self {
            roster: engine.roster().clone(),
            engine,
            store,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Create the record, or keep an existing one started from the same
    /// participants.
    pub fn init(&self) -> Result<InitOutcome, RuntimeError> {
        let fresh = self.engine.initialize();

        if let Some(existing) = self.store.load()? {
            return self.adopt(existing, &fresh);
        }

        match self.store.create(&fresh) {
            Ok(record) => Ok(InitOutcome {
                created: true,
                version: record.version,
                progress: self.engine.progress(&record.state),
            }),
            // Someone else initialized in between
            Err(StoreError::VersionConflict { .. }) => {
                let existing = self.store.require()?;
                self.adopt(existing, &fresh)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn adopt(
        &self,
        existing: StoredRecord,
        fresh: &AssignmentState,
    ) -> Result<InitOutcome, RuntimeError> {
        let stored: BTreeSet<&ParticipantId> = existing.state.members.iter().collect();
        let wanted: BTreeSet<&ParticipantId> = fresh.members.iter().collect();
        if stored != wanted {
            return Err(RuntimeError::RosterMismatch {
                exchange_id: existing.exchange_id,
            });
        }

        info!(
            exchange_id = %existing.exchange_id,
            version = existing.version,
            "Exchange already initialized; keeping record"
        );
        Ok(InitOutcome {
            created: false,
            version: existing.version,
            progress: self.engine.progress(&existing.state),
        })
    }

    /// Draw a receiver for `giver` and persist it.
    pub fn assign(&self, giver: &ParticipantId) -> Result<AssignOutcome, RuntimeError> {
        let (record, (receiver, attempts)) = self
            .store
            .transact(|state| {
                self.engine
                    .request_assignment(state, giver)
                    .map(|assignment| (assignment.state, (assignment.receiver, assignment.attempts)))
            })
            .map_err(|err| {
                let err = RuntimeError::from(err);
                if err.is_dead_end() {
                    warn!(giver = %giver, error = %err, "Exchange is stuck for this giver; reset to redraw");
                }
                err
            })?;

        Ok(AssignOutcome {
            giver: giver.clone(),
            receiver,
            attempts,
            version: record.version,
            progress: self.engine.progress(&record.state),
        })
    }

    /// Record a pair chosen outside the engine.
    pub fn declare(
        &self,
        giver: &ParticipantId,
        receiver: &ParticipantId,
    ) -> Result<DeclareOutcome, RuntimeError> {
        let (record, ()) = self.store.transact(|state| {
            self.engine
                .declare_assignment(state, giver, receiver)
                .map(|next| (next, ()))
        })?;

        Ok(DeclareOutcome {
            version: record.version,
            progress: self.engine.progress(&record.state),
        })
    }

    /// Who `person` gives to, if they have drawn.
    pub fn lookup(&self, person: &ParticipantId) -> Result<Option<ParticipantId>, RuntimeError> {
        let record = self.current()?;
        if !record.state.is_member(person) {
            return Err(AssignmentError::UnknownParticipant {
                name: person.clone(),
            }
            .into());
        }
        Ok(self.engine.lookup(&record.state, person))
    }

    pub fn verify(&self) -> Result<VerificationReport, RuntimeError> {
        let record = self.current()?;
        Ok(self.engine.verify(&record.state))
    }

    pub fn status(&self) -> Result<StatusReport, RuntimeError> {
        let record = self.current()?;
        Ok(StatusReport {
            progress: self.engine.progress(&record.state),
            exchange_id: record.exchange_id,
            version: record.version,
            updated_at: record.updated_at,
        })
    }

    /// Discard the record so the next `init` starts a new cycle.
    pub fn reset(&self) -> Result<(), RuntimeError> {
        self.store.reset()?;
        Ok(())
    }

    fn current(&self) -> Result<StoredRecord, RuntimeError> {
        self.store
            .load()?
            .ok_or_else(|| RuntimeError::NotInitialized {
                exchange_id: self.store.exchange_id().to_string(),
            })
    }
}
