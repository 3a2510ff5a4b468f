//! Lookahead Candidate Selector
//!
//! 1. `basic`: remaining receivers allowed by the exclusion rule
//! 2. `safe`: the subset the feasibility oracle certifies
//! 3. with a search budget configured, draw from `safe` uniformly without
//!    replacement and keep the first candidate the completion search does
//!    not prove dead. The pick is uniform over the candidates that keep the
//!    exchange completable; candidates left undetermined once the budget is
//!    spent count as completable.
//! 4. if every safe candidate is proven dead, a uniform draw from `safe`
//!
//! The budget is shared by every search in one request. An empty `safe`
//! set yields `None`; the selector never falls back to an unsafe pick.

use super::completion::{completion_within, SearchOutcome};
use super::feasibility::{basic_candidates, stays_feasible};
use crate::domain::entities::AssignmentState;
use crate::domain::exclusion::ExclusionRule;
use crate::ports::outbound::{CandidateSelector, RandomSource};
use shared_types::ParticipantId;
use tracing::debug;

/// Default selector: one-step lookahead plus bounded completion search.
#[derive(Clone, Debug)]
pub struct LookaheadSelector {
    search_budget: usize,
}

impl LookaheadSelector {
    /// `search_budget` is the node limit per request; 0 disables the search.
    pub fn new(search_budget: usize) -> Self {
        Self { search_budget }
    }

    /// One-step lookahead only.
    pub fn one_step() -> Self {
        Self::new(0)
    }

    fn draw_completable<'a>(
        &self,
        state: &AssignmentState,
        rule: &ExclusionRule,
        giver: &ParticipantId,
        safe: &[&'a ParticipantId],
        random: &dyn RandomSource,
    ) -> &'a ParticipantId {
        let unassigned: Vec<&ParticipantId> = state
            .unassigned_members()
            .filter(|member| *member != giver)
            .collect();

        let mut nodes = self.search_budget;
        let mut undrawn = safe.to_vec();
        let mut dead = 0usize;
        while !undrawn.is_empty() {
            let index = random.random_index(undrawn.len()) % undrawn.len();
            let candidate = undrawn.swap_remove(index);
            let pool: Vec<&ParticipantId> = state
                .remaining_receivers
                .iter()
                .filter(|r| *r != candidate)
                .collect();
            match completion_within(&unassigned, &pool, rule, &mut nodes) {
                SearchOutcome::Dead => dead += 1,
                outcome => {
                    debug!(
                        safe = safe.len(),
                        dead,
                        ?outcome,
                        nodes_left = nodes,
                        "Completion search accepted candidate"
                    );
                    return candidate;
                }
            }
        }

        debug!(safe = safe.len(), "Every safe candidate is a dead end");
        safe[random.random_index(safe.len()) % safe.len()]
    }
}

impl Default for LookaheadSelector {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COMPLETION_SEARCH_BUDGET)
    }
}

impl CandidateSelector for LookaheadSelector {
    fn select_receiver(
        &self,
        state: &AssignmentState,
        rule: &ExclusionRule,
        giver: &ParticipantId,
        random: &dyn RandomSource,
    ) -> Option<ParticipantId> {
        let basic = basic_candidates(state, rule, giver);
        if basic.is_empty() {
            debug!(giver = %giver, "No basic candidates");
            return None;
        }

        let basic_count = basic.len();
        let safe: Vec<&ParticipantId> = basic
            .into_iter()
            .filter(|candidate| stays_feasible(state, rule, giver, candidate))
            .collect();
        if safe.is_empty() {
            debug!(
                giver = %giver,
                basic = basic_count,
                "Lookahead rejected every basic candidate"
            );
            return None;
        }

        let pick = if self.search_budget == 0 || safe.len() < 2 {
            safe[random.random_index(safe.len()) % safe.len()]
        } else {
            self.draw_completable(state, rule, giver, &safe, random)
        };
        Some(pick.clone())
    }
}
