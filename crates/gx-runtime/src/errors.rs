//! Runtime errors

use gx_01_assignment_engine::AssignmentError;
use gx_02_state_store::{StoreError, TransactError};
use shared_types::RosterError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("roster: {0}")]
    Roster(#[from] RosterError),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// Stored record was initialized from a different member list
    #[error("exchange {exchange_id} was started with a different participant list; reset it first")]
    RosterMismatch { exchange_id: String },

    #[error("exchange {exchange_id} has not been initialized")]
    NotInitialized { exchange_id: String },

    #[error("too many concurrent updates ({attempts} attempts); try again")]
    Contended { attempts: u32 },
}

impl RuntimeError {
    /// The remaining pool can no longer serve the giver; only `reset`
    /// and a fresh `init` get the exchange moving again.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, RuntimeError::Assignment(err) if err.is_pool_exhaustion())
    }
}

impl From<TransactError<AssignmentError>> for RuntimeError {
    fn from(err: TransactError<AssignmentError>) -> Self {
        match err {
            TransactError::Store(StoreError::NotFound { exchange_id }) => {
                RuntimeError::NotInitialized { exchange_id }
            }
            TransactError::Store(err) => RuntimeError::Store(err),
            TransactError::Rejected(err) => RuntimeError::Assignment(err),
            TransactError::Contended { attempts } => RuntimeError::Contended { attempts },
        }
    }
}
