//! Algorithms module for the assignment engine
//!
//! Contains:
//! - One-step feasibility oracle (lookahead)
//! - Bounded completion search
//! - Lookahead candidate selector
//! - Full-assignment verifier

pub mod completion;
pub mod feasibility;
pub mod selector;
pub mod verifier;

pub use completion::{completion_exists, completion_within, SearchOutcome};
pub use feasibility::{basic_candidates, stays_feasible};
pub use selector::LookaheadSelector;
pub use verifier::verify;
