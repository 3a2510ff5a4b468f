//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound `RandomSource` port.

mod random;

pub use random::{FixedRandomSource, StdRandomSource};
