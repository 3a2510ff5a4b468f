//! # Error Types
//!
//! Errors raised while building or loading a roster.

use thiserror::Error;

/// Errors that can occur while validating the exchange roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A participant identifier is empty or whitespace only.
    #[error("Participant identifier at position {position} is empty")]
    EmptyIdentifier { position: usize },

    /// The same identifier appears more than once in the participant list.
    #[error("Duplicate participant: {name}")]
    DuplicateParticipant { name: String },

    /// The roster file could not be read.
    #[error("Failed to read roster file: {0}")]
    Io(String),

    /// The roster file is not valid roster JSON.
    #[error("Malformed roster: {0}")]
    Malformed(String),
}
