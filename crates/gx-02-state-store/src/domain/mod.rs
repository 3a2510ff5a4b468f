//! Domain module for the state store

pub mod errors;
pub mod record;

pub use errors::*;
pub use record::*;
