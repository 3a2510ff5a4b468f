//! Core entities for the assignment engine
//!
//! `AssignmentState` is the partial permutation built so far. It is plain
//! data: the service produces new states from old ones and never mutates a
//! state it was handed.

use serde::{Deserialize, Serialize};
use shared_types::ParticipantId;
use std::collections::BTreeMap;

/// How a pairing entered the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentSource {
    /// Drawn by the engine.
    Generated,
    /// Declared by a participant who already knew their receiver.
    Declared,
}

/// One committed (giver, receiver) pair in the audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Commit position, starting at 1.
    pub sequence: u64,
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
    pub source: AssignmentSource,
}

/// The mutable aggregate for one exchange cycle.
///
/// ## Invariants (re-established by every commit)
///
/// 1. `remaining_receivers` = `members` minus the values of `assignments`
/// 2. keys and values of `assignments` are members
/// 3. no receiver appears twice among the values
/// 4. no giver is assigned themselves or their prior-cycle receiver
/// 5. every unassigned member keeps at least one legal remaining receiver
///
/// Fields are public so that storage adapters and diagnostics can rebuild
/// arbitrary (even malformed) states; all committing transitions go through
/// `AssignmentService`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentState {
    /// Copy of the participant set taken at initialization.
    pub members: Vec<ParticipantId>,
    /// Identifiers not yet consumed as a receiver, in member order.
    pub remaining_receivers: Vec<ParticipantId>,
    /// giver -> receiver
    pub assignments: BTreeMap<ParticipantId, ParticipantId>,
    /// Append-only commit log. Audit only, never consulted for decisions.
    pub history: Vec<Pairing>,
}

impl AssignmentState {
    /// Fresh state: nobody assigned, every member still receivable.
    pub fn new(members: Vec<ParticipantId>) -> Self {
        Self {
            remaining_receivers: members.clone(),
            members,
            assignments: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn receiver_for(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments.get(giver)
    }

    pub fn is_assigned(&self, giver: &ParticipantId) -> bool {
        self.assignments.contains_key(giver)
    }

    pub fn is_member(&self, participant: &ParticipantId) -> bool {
        self.members.contains(participant)
    }

    /// Whether `receiver` is still in the remaining pool.
    pub fn is_available(&self, receiver: &ParticipantId) -> bool {
        self.remaining_receivers.contains(receiver)
    }

    /// Members without a committed receiver, in member order.
    pub fn unassigned_members(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.members
            .iter()
            .filter(move |member| !self.assignments.contains_key(*member))
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    /// True once every member is a giver.
    pub fn is_complete(&self) -> bool {
        self.members.iter().all(|m| self.assignments.contains_key(m))
    }

    /// The committing transition: returns a new state with `giver -> receiver`
    /// recorded, the receiver consumed, and the pair appended to the log.
    ///
    /// Validation is the caller's job.
    pub(crate) fn with_commit(
        &self,
        giver: &ParticipantId,
        receiver: &ParticipantId,
        source: AssignmentSource,
    ) -> Self {
        let mut next = self.clone();
        next.remaining_receivers.retain(|r| r != receiver);
        next.assignments.insert(giver.clone(), receiver.clone());
        next.history.push(Pairing {
            sequence: self.history.len() as u64 + 1,
            giver: giver.clone(),
            receiver: receiver.clone(),
            source,
        });
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = AssignmentState::new(ids(&["A", "B", "C"]));
        assert_eq!(state.remaining_receivers, ids(&["A", "B", "C"]));
        assert!(state.assignments.is_empty());
        assert!(state.history.is_empty());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_commit_consumes_receiver() {
        let state = AssignmentState::new(ids(&["A", "B", "C"]));
        let next = state.with_commit(&"A".into(), &"B".into(), AssignmentSource::Generated);

        assert_eq!(next.remaining_receivers, ids(&["A", "C"]));
        assert_eq!(next.receiver_for(&"A".into()), Some(&"B".into()));
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.history[0].sequence, 1);

        // Input untouched
        assert_eq!(state.remaining_receivers.len(), 3);
        assert!(state.assignments.is_empty());
    }

    #[test]
    fn test_unassigned_members_keep_member_order() {
        let state = AssignmentState::new(ids(&["C", "A", "B"]));
        let next = state.with_commit(&"A".into(), &"C".into(), AssignmentSource::Declared);
        let unassigned: Vec<_> = next.unassigned_members().cloned().collect();
        assert_eq!(unassigned, ids(&["C", "B"]));
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = AssignmentState::new(ids(&["A", "B", "C"]))
            .with_commit(&"A".into(), &"B".into(), AssignmentSource::Generated)
            .with_commit(&"B".into(), &"C".into(), AssignmentSource::Declared);

        let json = serde_json::to_string(&state).unwrap();
        let decoded: AssignmentState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, state);
    }
}
