//! Ports module for the state store

pub mod outbound;

pub use outbound::RecordStore;
