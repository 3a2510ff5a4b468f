//! Persisted exchange record
//!
//! One versioned document per exchange. The version increments by one on
//! every write; the fingerprint is the hex SHA-256 of the state's JSON form.

use super::errors::StoreError;
use chrono::{DateTime, Utc};
use gx_01_assignment_engine::AssignmentState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the serialized state.
pub fn fingerprint(state: &AssignmentState) -> Result<String, StoreError> {
    let bytes = serde_json::to_vec(state)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub exchange_id: String,
    pub version: u64,
    pub fingerprint: String,
    pub updated_at: DateTime<Utc>,
    pub state: AssignmentState,
}

impl StoredRecord {
    /// Version 1 of a new record.
    pub fn first(exchange_id: impl Into<String>, state: AssignmentState) -> Result<Self, StoreError> {
        Ok(Self {
            exchange_id: exchange_id.into(),
            version: 1,
            fingerprint: fingerprint(&state)?,
            updated_at: Utc::now(),
            state,
        })
    }

    /// The record that replaces this one.
    pub fn successor(&self, state: AssignmentState) -> Result<Self, StoreError> {
        Ok(Self {
            exchange_id: self.exchange_id.clone(),
            version: self.version + 1,
            fingerprint: fingerprint(&state)?,
            updated_at: Utc::now(),
            state,
        })
    }

    /// Reject a record whose state no longer matches its fingerprint.
    pub fn verify_integrity(&self) -> Result<(), StoreError> {
        let computed = fingerprint(&self.state)?;
        if computed != self.fingerprint {
            return Err(StoreError::Corrupt {
                exchange_id: self.exchange_id.clone(),
                stored: self.fingerprint.clone(),
                computed,
            });
        }
        Ok(())
    }
}
