//! Domain invariants for the assignment state
//!
//! Each check re-derives its invariant from the raw state. The service runs
//! them after every commit; a breach there means an engine bug, never a
//! user error.

use super::entities::AssignmentState;
use super::exclusion::ExclusionRule;
use shared_types::ParticipantId;
use std::collections::HashSet;
use std::fmt;

/// Which invariant a state breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvariantBreach {
    RemainingPoolMismatch,
    NonMemberInAssignments,
    DuplicateReceiver,
    ExcludedPair,
    StrandedParticipant,
}

impl fmt::Display for InvariantBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvariantBreach::RemainingPoolMismatch => "remaining pool does not match assignments",
            InvariantBreach::NonMemberInAssignments => "assignments reference a non-member",
            InvariantBreach::DuplicateReceiver => "a receiver is shared by two givers",
            InvariantBreach::ExcludedPair => "an assignment violates the exclusion rule",
            InvariantBreach::StrandedParticipant => "an unassigned member has no legal receiver left",
        };
        f.write_str(text)
    }
}

/// INVARIANT-1: remaining = members \ values(assignments), order-insensitive,
/// with no duplicates in the pool.
pub fn invariant_remaining_consistent(state: &AssignmentState) -> bool {
    let taken: HashSet<&ParticipantId> = state.assignments.values().collect();
    let expected: HashSet<&ParticipantId> =
        state.members.iter().filter(|m| !taken.contains(m)).collect();
    let actual: HashSet<&ParticipantId> = state.remaining_receivers.iter().collect();

    actual.len() == state.remaining_receivers.len() && actual == expected
}

/// INVARIANT-2: every key and every value is a member.
pub fn invariant_members_only(state: &AssignmentState) -> bool {
    state
        .assignments
        .iter()
        .all(|(giver, receiver)| state.is_member(giver) && state.is_member(receiver))
}

/// INVARIANT-3: no receiver is used by two givers.
pub fn invariant_bijective(state: &AssignmentState) -> bool {
    let mut seen = HashSet::with_capacity(state.assignments.len());
    state.assignments.values().all(|receiver| seen.insert(receiver))
}

/// INVARIANT-4: no self-assignment, no prior-cycle repeat.
pub fn invariant_exclusions_respected(state: &AssignmentState, rule: &ExclusionRule) -> bool {
    state
        .assignments
        .iter()
        .all(|(giver, receiver)| !rule.is_invalid(giver, receiver))
}

/// INVARIANT-5: every unassigned member keeps a legal remaining receiver.
pub fn invariant_feasible(state: &AssignmentState, rule: &ExclusionRule) -> bool {
    stranded_members(state, rule).is_empty()
}

/// Unassigned members with zero legal receivers left in the pool.
pub fn stranded_members(state: &AssignmentState, rule: &ExclusionRule) -> Vec<ParticipantId> {
    state
        .unassigned_members()
        .filter(|member| {
            !state
                .remaining_receivers
                .iter()
                .any(|receiver| !rule.is_invalid(member, receiver))
        })
        .cloned()
        .collect()
}

/// Run INVARIANT-1..4, plus INVARIANT-5 when `include_feasibility` is set.
pub fn check_invariants(
    state: &AssignmentState,
    rule: &ExclusionRule,
    include_feasibility: bool,
) -> Vec<InvariantBreach> {
    let mut breaches = Vec::new();
    if !invariant_remaining_consistent(state) {
        breaches.push(InvariantBreach::RemainingPoolMismatch);
    }
    if !invariant_members_only(state) {
        breaches.push(InvariantBreach::NonMemberInAssignments);
    }
    if !invariant_bijective(state) {
        breaches.push(InvariantBreach::DuplicateReceiver);
    }
    if !invariant_exclusions_respected(state, rule) {
        breaches.push(InvariantBreach::ExcludedPair);
    }
    if include_feasibility && !invariant_feasible(state, rule) {
        breaches.push(InvariantBreach::StrandedParticipant);
    }
    breaches
}
