//! # GX-01: Assignment Engine
//!
//! Incremental constrained assignment for a gift exchange. Givers draw one
//! at a time; every generated draw keeps the rest of the exchange
//! completable.
//!
//! ## Architecture
//!
//! - **Domain**: `AssignmentState`, `ExclusionRule`, errors, invariant checks
//! - **Algorithms**: feasibility oracle, bounded completion search,
//!   lookahead selector, verifier
//! - **Ports**: Inbound (`AssignmentApi`) and Outbound (`RandomSource`,
//!   `CandidateSelector`)
//! - **Adapters**: seeded and fixed random sources
//! - **Application**: `AssignmentService`
//!
//! ## State invariants
//!
//! | # | Invariant |
//! |---|-----------|
//! | 1 | `remaining_receivers` = members minus assigned receivers |
//! | 2 | Givers and receivers are members |
//! | 3 | Assignments are injective |
//! | 4 | No self pairs, no repeat of the prior cycle |
//! | 5 | Every unassigned member has a legal receiver (generated path only) |
//!
//! All operations take a state and return a new one. A failed operation
//! leaves its input untouched.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{FixedRandomSource, StdRandomSource};
pub use algorithms::{LookaheadSelector, SearchOutcome};
pub use application::service::AssignmentService;
pub use config::EngineConfig;
pub use domain::entities::*;
pub use domain::errors::AssignmentError;
pub use domain::exclusion::{ExclusionReason, ExclusionRule};
pub use domain::invariants::{check_invariants, InvariantBreach};
pub use domain::value_objects::*;
pub use ports::inbound::AssignmentApi;
pub use ports::outbound::{CandidateSelector, RandomSource};
