//! Domain module for the assignment engine
//!
//! Contains the assignment state, the exclusion rule, errors, value objects
//! and invariant checks.

pub mod entities;
pub mod errors;
pub mod exclusion;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use exclusion::*;
pub use value_objects::*;
