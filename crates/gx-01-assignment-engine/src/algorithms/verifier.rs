//! Full-assignment verifier
//!
//! Re-derives every violation class from the raw `assignments` map, without
//! trusting `remaining_receivers` or `history`. Works on engine output,
//! declared assignments and hand-built or corrupted states alike.

use crate::domain::entities::AssignmentState;
use crate::domain::exclusion::{ExclusionReason, ExclusionRule};
use crate::domain::value_objects::{VerificationIssue, VerificationReport};
use shared_types::ParticipantId;
use std::collections::{BTreeMap, HashSet};

pub fn verify(state: &AssignmentState, rule: &ExclusionRule) -> VerificationReport {
    let mut issues = Vec::new();

    let missing: Vec<ParticipantId> = state.unassigned_members().cloned().collect();
    if !missing.is_empty() {
        issues.push(VerificationIssue::MissingAssignments { members: missing });
    }

    let members: HashSet<&ParticipantId> = state.members.iter().collect();
    let mut givers_by_receiver: BTreeMap<&ParticipantId, Vec<ParticipantId>> = BTreeMap::new();

    for (giver, receiver) in &state.assignments {
        match rule.violation(giver, receiver) {
            Some(ExclusionReason::SelfAssignment) => {
                issues.push(VerificationIssue::SelfAssignment {
                    giver: giver.clone(),
                });
            }
            Some(ExclusionReason::PriorCycleRepeat) => {
                issues.push(VerificationIssue::PriorCycleRepeat {
                    giver: giver.clone(),
                    receiver: receiver.clone(),
                });
            }
            None => {}
        }

        if !members.contains(receiver) {
            issues.push(VerificationIssue::ForeignReceiver {
                giver: giver.clone(),
                receiver: receiver.clone(),
            });
        }

        givers_by_receiver
            .entry(receiver)
            .or_default()
            .push(giver.clone());
    }

    for (receiver, givers) in givers_by_receiver {
        if givers.len() > 1 {
            issues.push(VerificationIssue::DuplicateReceiver {
                receiver: receiver.clone(),
                givers,
            });
        }
    }

    VerificationReport::from_issues(issues)
}
