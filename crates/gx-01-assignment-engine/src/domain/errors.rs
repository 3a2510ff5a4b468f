//! Error types for the assignment engine
//!
//! Every variant is an expected, recoverable outcome. A failed operation
//! leaves the caller's state untouched.

use super::exclusion::ExclusionReason;
use shared_types::ParticipantId;
use thiserror::Error;

/// All errors an assignment request or declaration can return.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// Giver or declared receiver is not a member of this exchange
    #[error("{name} is not part of this exchange")]
    UnknownParticipant { name: ParticipantId },

    /// Giver already has a committed receiver
    #[error("{giver} already has an assignment")]
    AlreadyAssigned { giver: ParticipantId },

    /// Declared pair violates an exclusion rule
    #[error("{giver} cannot give to {receiver}: {reason}")]
    InvalidPair {
        giver: ParticipantId,
        receiver: ParticipantId,
        reason: ExclusionReason,
    },

    /// Declared receiver is no longer in the remaining pool
    #[error("{receiver} is already assigned to someone else")]
    ReceiverTaken { receiver: ParticipantId },

    /// Every remaining receiver is forbidden for this giver
    #[error("No legal receiver left for {giver}")]
    NoFeasibleOption { giver: ParticipantId },

    /// Legal receivers exist but each one would strand someone else
    #[error("Every legal receiver for {giver} would strand another participant ({candidates} candidates checked)")]
    LookaheadBlocked {
        giver: ParticipantId,
        candidates: usize,
    },

    /// The retry loop ran out without committing
    #[error("Assignment for {giver} not committed after {attempts} attempts")]
    RetriesExhausted { giver: ParticipantId, attempts: u32 },

    /// A produced state failed a post-commit invariant check
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl AssignmentError {
    /// Whether the failure comes from the remaining pool rather than the
    /// request itself (retrying the same request cannot succeed either way).
    pub fn is_pool_exhaustion(&self) -> bool {
        matches!(
            self,
            AssignmentError::NoFeasibleOption { .. } | AssignmentError::LookaheadBlocked { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssignmentError::InvalidPair {
            giver: "Alan".into(),
            receiver: "Carrie".into(),
            reason: ExclusionReason::PriorCycleRepeat,
        };
        assert_eq!(
            err.to_string(),
            "Alan cannot give to Carrie: same receiver as last cycle"
        );
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = AssignmentError::RetriesExhausted {
            giver: "Rosa".into(),
            attempts: 50,
        };
        assert_eq!(
            err.to_string(),
            "Assignment for Rosa not committed after 50 attempts"
        );
    }

    #[test]
    fn test_pool_exhaustion_classification() {
        assert!(AssignmentError::NoFeasibleOption { giver: "X".into() }.is_pool_exhaustion());
        assert!(!AssignmentError::ReceiverTaken {
            receiver: "X".into()
        }
        .is_pool_exhaustion());
    }
}
