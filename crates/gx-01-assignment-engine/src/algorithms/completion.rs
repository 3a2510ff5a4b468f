//! Bounded completion search
//!
//! Depth-first search over the remaining sub-problem: can every member in
//! `unassigned` get a distinct legal receiver from `pool`? The most
//! constrained member is expanded first. The search visits at most `budget`
//! nodes and reports `Undetermined` when it runs out. `completion_within`
//! draws from a node counter shared by several searches.

use crate::domain::exclusion::ExclusionRule;
use shared_types::ParticipantId;

/// Answer of a bounded completion search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A full completion exists.
    Completable,
    /// No completion exists.
    Dead,
    /// Budget ran out before an answer.
    Undetermined,
}

pub fn completion_exists(
    unassigned: &[&ParticipantId],
    pool: &[&ParticipantId],
    rule: &ExclusionRule,
    budget: usize,
) -> SearchOutcome {
    let mut nodes = budget;
    completion_within(unassigned, pool, rule, &mut nodes)
}

/// `completion_exists` charged against `nodes`, which is left with whatever
/// the search did not spend.
pub fn completion_within(
    unassigned: &[&ParticipantId],
    pool: &[&ParticipantId],
    rule: &ExclusionRule,
    nodes: &mut usize,
) -> SearchOutcome {
    match search(unassigned, pool, rule, nodes) {
        Some(true) => SearchOutcome::Completable,
        Some(false) => SearchOutcome::Dead,
        None => SearchOutcome::Undetermined,
    }
}

fn search(
    unassigned: &[&ParticipantId],
    pool: &[&ParticipantId],
    rule: &ExclusionRule,
    nodes: &mut usize,
) -> Option<bool> {
    if unassigned.is_empty() {
        return Some(true);
    }
    if *nodes == 0 {
        return None;
    }
    *nodes -= 1;

    // Most constrained member first
    let Some((index, option_count)) = unassigned
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let count = pool.iter().filter(|r| !rule.is_invalid(member, r)).count();
            (i, count)
        })
        .min_by_key(|(_, count)| *count)
    else {
        return Some(true);
    };
    if option_count == 0 {
        return Some(false);
    }

    let member = unassigned[index];
    let rest: Vec<&ParticipantId> = unassigned
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, m)| *m)
        .collect();

    let mut undetermined = false;
    for receiver in pool.iter().filter(|r| !rule.is_invalid(member, r)) {
        let next_pool: Vec<&ParticipantId> =
            pool.iter().filter(|r| *r != receiver).copied().collect();
        match search(&rest, &next_pool, rule, nodes) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => undetermined = true,
        }
    }

    if undetermined {
        None
    } else {
        Some(false)
    }
}
