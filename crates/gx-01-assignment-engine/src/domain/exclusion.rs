//! Exclusion rule: which (giver, receiver) pairs are forbidden outright.

use serde::{Deserialize, Serialize};
use shared_types::{ParticipantId, Roster};
use std::collections::BTreeMap;
use std::fmt;

/// Why a pair is forbidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Receiver is the giver.
    SelfAssignment,
    /// Receiver is who the giver had in the previous cycle.
    PriorCycleRepeat,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::SelfAssignment => f.write_str("self-assignment"),
            ExclusionReason::PriorCycleRepeat => f.write_str("same receiver as last cycle"),
        }
    }
}

/// Pure predicate over (giver, receiver).
///
/// Total over any two identifiers: for someone with no prior-cycle entry
/// (including identifiers outside the roster) only the identity branch fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionRule {
    prior_cycle: BTreeMap<ParticipantId, ParticipantId>,
}

impl ExclusionRule {
    pub fn new(prior_cycle: BTreeMap<ParticipantId, ParticipantId>) -> Self {
        Self { prior_cycle }
    }

    pub fn from_roster(roster: &Roster) -> Self {
        Self::new(roster.prior_cycle().clone())
    }

    /// The reason `giver -> receiver` is forbidden, if it is.
    pub fn violation(
        &self,
        giver: &ParticipantId,
        receiver: &ParticipantId,
    ) -> Option<ExclusionReason> {
        if receiver == giver {
            return Some(ExclusionReason::SelfAssignment);
        }
        if self.prior_cycle.get(giver) == Some(receiver) {
            return Some(ExclusionReason::PriorCycleRepeat);
        }
        None
    }

    pub fn is_invalid(&self, giver: &ParticipantId, receiver: &ParticipantId) -> bool {
        self.violation(giver, receiver).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Last cycle: Alan -> Carrie, Carrie -> Chris, Chris -> Alan
    fn rule() -> ExclusionRule {
        let mut prior = BTreeMap::new();
        prior.insert("Alan".into(), "Carrie".into());
        prior.insert("Carrie".into(), "Chris".into());
        prior.insert("Chris".into(), "Alan".into());
        ExclusionRule::new(prior)
    }

    #[test]
    fn test_self_assignment_is_invalid() {
        let rule = rule();
        assert!(rule.is_invalid(&"Carrie".into(), &"Carrie".into()));
        assert_eq!(
            rule.violation(&"Alan".into(), &"Alan".into()),
            Some(ExclusionReason::SelfAssignment)
        );
    }

    #[test]
    fn test_prior_cycle_repeat_is_invalid() {
        let rule = rule();
        assert_eq!(
            rule.violation(&"Alan".into(), &"Carrie".into()),
            Some(ExclusionReason::PriorCycleRepeat)
        );
        assert!(rule.is_invalid(&"Carrie".into(), &"Chris".into()));
        assert!(rule.is_invalid(&"Chris".into(), &"Alan".into()));
    }

    #[test]
    fn test_valid_pairs() {
        let rule = rule();
        assert!(!rule.is_invalid(&"Carrie".into(), &"Alan".into()));
        assert!(!rule.is_invalid(&"Alan".into(), &"Rosa".into()));
    }

    #[test]
    fn test_unknown_identifier_only_identity_branch() {
        let rule = rule();
        assert!(!rule.is_invalid(&"NewPerson".into(), &"Carrie".into()));
        assert!(rule.is_invalid(&"NewPerson".into(), &"NewPerson".into()));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            ExclusionReason::PriorCycleRepeat.to_string(),
            "same receiver as last cycle"
        );
    }
}
