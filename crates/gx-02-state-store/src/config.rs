//! Store configuration

use serde::{Deserialize, Serialize};

/// Conflicting writes a transaction absorbs before giving up.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 8;

/// Configuration for the exchange store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Retries after a `VersionConflict` before `transact` reports contention
    pub max_conflict_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}
