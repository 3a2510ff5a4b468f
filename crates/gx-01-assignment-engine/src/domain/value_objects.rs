//! Value objects returned by the engine

use super::entities::AssignmentState;
use serde::{Deserialize, Serialize};
use shared_types::ParticipantId;
use std::fmt;

/// Successful outcome of a generated assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// State after the commit
    pub state: AssignmentState,
    /// Receiver drawn for the giver
    pub receiver: ParticipantId,
    /// Draws taken before the commit (1 in the normal case)
    pub attempts: u32,
}

/// Snapshot of how far the exchange has progressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeProgress {
    pub total: usize,
    pub assigned: usize,
    pub remaining: usize,
    /// Members still waiting for a receiver, in member order
    pub unassigned: Vec<ParticipantId>,
    pub complete: bool,
}

impl ExchangeProgress {
    pub fn from_state(state: &AssignmentState) -> Self {
        let unassigned: Vec<_> = state.unassigned_members().cloned().collect();
        Self {
            total: state.members.len(),
            assigned: state.assigned_count(),
            remaining: state.remaining_receivers.len(),
            complete: unassigned.is_empty(),
            unassigned,
        }
    }
}

/// One problem found by the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationIssue {
    /// Members with no receiver
    MissingAssignments { members: Vec<ParticipantId> },
    SelfAssignment { giver: ParticipantId },
    PriorCycleRepeat {
        giver: ParticipantId,
        receiver: ParticipantId,
    },
    /// Receiver that is not a member
    ForeignReceiver {
        giver: ParticipantId,
        receiver: ParticipantId,
    },
    /// Receiver shared by two or more givers
    DuplicateReceiver {
        receiver: ParticipantId,
        givers: Vec<ParticipantId>,
    },
}

fn join(ids: &[ParticipantId]) -> String {
    ids.iter()
        .map(ParticipantId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for VerificationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationIssue::MissingAssignments { members } => {
                write!(f, "Missing assignments: {}", join(members))
            }
            VerificationIssue::SelfAssignment { giver } => {
                write!(f, "{} is assigned to themselves", giver)
            }
            VerificationIssue::PriorCycleRepeat { giver, receiver } => {
                write!(f, "{} has {} again (same as last cycle)", giver, receiver)
            }
            VerificationIssue::ForeignReceiver { giver, receiver } => {
                write!(f, "{} is assigned to {}, who is not a member", giver, receiver)
            }
            VerificationIssue::DuplicateReceiver { receiver, givers } => {
                write!(f, "{} is the receiver of several givers: {}", receiver, join(givers))
            }
        }
    }
}

/// Result of a full verification pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub valid: bool,
    pub issues: Vec<VerificationIssue>,
}

impl VerificationReport {
    pub fn from_issues(issues: Vec<VerificationIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }

    /// Human-readable issue lines.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}
