//! # Shared Types Crate
//!
//! Types shared by every crate of the gift-exchange workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the participant identifier and the roster
//!   (participant set plus prior-cycle map) are defined once, here.
//! - **Immutable Configuration**: a `Roster` is validated on construction and
//!   never mutated afterwards. It lives for one exchange cycle.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
