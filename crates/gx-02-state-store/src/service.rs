//! # Exchange Store Service
//!
//! Wraps a `RecordStore` with integrity checks and an optimistic
//! read-transition-write loop.

use crate::config::StoreConfig;
use crate::domain::errors::{StoreError, TransactError};
use crate::domain::record::StoredRecord;
use crate::ports::outbound::RecordStore;
use gx_01_assignment_engine::AssignmentState;
use tracing::{debug, error, info, warn};

pub struct ExchangeStore<S: RecordStore> {
    store: S,
    exchange_id: String,
    config: StoreConfig,
}

impl<S: RecordStore> ExchangeStore<S> {
    pub fn new(store: S, exchange_id: impl Into<String>, config: StoreConfig) -> Self {
        Self {
            store,
            exchange_id: exchange_id.into(),
            config,
        }
    }

    pub fn exchange_id(&self) -> &str {
        &self.exchange_id
    }

    /// Current record, integrity-checked.
    pub fn load(&self) -> Result<Option<StoredRecord>, StoreError> {
        let record = self.store.load()?;
        if let Some(record) = &record {
            record.verify_integrity()?;
            debug!(
                exchange_id = %self.exchange_id,
                version = record.version,
                "Loaded exchange record"
            );
        }
        Ok(record)
    }

    /// Current record, or `NotFound`.
    pub fn require(&self) -> Result<StoredRecord, StoreError> {
        self.load()?.ok_or_else(|| StoreError::NotFound {
            exchange_id: self.exchange_id.clone(),
        })
    }

    /// Create the record; conflicts if one already exists.
    pub fn create(&self, state: &AssignmentState) -> Result<StoredRecord, StoreError> {
        let record = self.store.compare_and_swap(None, state)?;
        info!(
            exchange_id = %self.exchange_id,
            members = state.members.len(),
            "Exchange record created"
        );
        Ok(record)
    }

    /// Load, apply `transition`, and compare-and-swap the result.
    ///
    /// A lost race re-runs `transition` on the fresh state, up to
    /// `max_conflict_retries` times. A transition error aborts without
    /// writing.
    pub fn transact<T, E, F>(&self, mut transition: F) -> Result<(StoredRecord, T), TransactError<E>>
    where
        F: FnMut(&AssignmentState) -> Result<(AssignmentState, T), E>,
    {
        let attempts = self.config.max_conflict_retries.saturating_add(1);

        for attempt in 1..=attempts {
            let current = self.require()?;
            let (next, output) = transition(&current.state).map_err(TransactError::Rejected)?;

            match self.store.compare_and_swap(Some(current.version), &next) {
                Ok(record) => {
                    debug!(
                        exchange_id = %self.exchange_id,
                        version = record.version,
                        attempt,
                        "Transaction committed"
                    );
                    return Ok((record, output));
                }
                Err(StoreError::VersionConflict { expected, actual }) => {
                    warn!(
                        exchange_id = %self.exchange_id,
                        attempt,
                        expected = ?expected,
                        actual = ?actual,
                        "Concurrent write detected; retrying on fresh state"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        error!(
            exchange_id = %self.exchange_id,
            attempts,
            "Transaction abandoned after repeated conflicts"
        );
        Err(TransactError::Contended { attempts })
    }

    /// Drop the record so a new cycle can start.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.reset()?;
        info!(exchange_id = %self.exchange_id, "Exchange record reset");
        Ok(())
    }
}
