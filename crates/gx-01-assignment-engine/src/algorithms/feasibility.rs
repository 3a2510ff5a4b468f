//! One-step feasibility oracle
//!
//! Decides whether committing `giver -> candidate` would leave any other
//! unassigned member with zero legal receivers. Each member has at most one
//! forbidden receiver besides themselves, so direct counting detects the
//! dangerous pattern. This is arc consistency, not a full search; see
//! `completion` for the deeper check.

use crate::domain::entities::AssignmentState;
use crate::domain::exclusion::ExclusionRule;
use shared_types::ParticipantId;

/// Remaining receivers that the exclusion rule allows for `giver`.
pub fn basic_candidates<'a>(
    state: &'a AssignmentState,
    rule: &ExclusionRule,
    giver: &ParticipantId,
) -> Vec<&'a ParticipantId> {
    state
        .remaining_receivers
        .iter()
        .filter(|receiver| !rule.is_invalid(giver, receiver))
        .collect()
}

/// Whether every member still unassigned after the hypothetical commit keeps
/// at least one legal receiver in the shrunken pool.
///
/// The hypothetical state is never materialized: `candidate` is skipped in
/// the pool scan and `giver` is skipped among the unassigned.
pub fn stays_feasible(
    state: &AssignmentState,
    rule: &ExclusionRule,
    giver: &ParticipantId,
    candidate: &ParticipantId,
) -> bool {
    state
        .unassigned_members()
        .filter(|member| *member != giver)
        .all(|member| {
            state
                .remaining_receivers
                .iter()
                .any(|receiver| receiver != candidate && !rule.is_invalid(member, receiver))
        })
}
