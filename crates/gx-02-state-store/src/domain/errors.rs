//! # Domain Errors
//!
//! Error types for the state store.

use thiserror::Error;

/// Errors from record storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists for this exchange
    #[error("no record for exchange {exchange_id}")]
    NotFound { exchange_id: String },

    /// Another writer committed first
    #[error("version conflict: expected {expected:?}, found {actual:?}")]
    VersionConflict {
        expected: Option<u64>,
        actual: Option<u64>,
    },

    /// Stored fingerprint does not match the stored state
    #[error("record for {exchange_id} is corrupt: fingerprint {stored} does not match {computed}")]
    Corrupt {
        exchange_id: String,
        stored: String,
        computed: String,
    },

    /// Record on disk belongs to another exchange
    #[error("record belongs to exchange {found}, expected {expected}")]
    ExchangeMismatch { expected: String, found: String },

    /// Backing store cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether a cached copy may stand in for the failed read.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Io(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Failure of a read-transition-write cycle
#[derive(Debug, Error)]
pub enum TransactError<E> {
    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The transition refused the current state
    #[error("{0}")]
    Rejected(E),

    /// Every attempt lost the race to another writer
    #[error("gave up after {attempts} conflicting writes")]
    Contended { attempts: u32 },
}
