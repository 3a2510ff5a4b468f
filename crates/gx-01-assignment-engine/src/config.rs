//! Configuration for the assignment engine

use serde::{Deserialize, Serialize};

/// Default bound on draws per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Default node budget per request for the completion search.
pub const DEFAULT_COMPLETION_SEARCH_BUDGET: usize = 10_000;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Draws per request before giving up with `RetriesExhausted`
    pub max_attempts: u32,
    /// Search nodes per request for the completion search (0 disables it)
    pub completion_search_budget: usize,
    /// Re-check state invariants on every produced state
    pub verify_after_commit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            completion_search_budget: DEFAULT_COMPLETION_SEARCH_BUDGET,
            verify_after_commit: true,
        }
    }
}
