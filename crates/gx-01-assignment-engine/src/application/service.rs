//! Assignment Service
//!
//! Main service implementing `AssignmentApi`.

use crate::adapters::StdRandomSource;
use crate::algorithms::{basic_candidates, verify, LookaheadSelector};
use crate::config::EngineConfig;
use crate::domain::entities::{AssignmentSource, AssignmentState};
use crate::domain::errors::AssignmentError;
use crate::domain::exclusion::ExclusionRule;
use crate::domain::invariants::{check_invariants, stranded_members};
use crate::domain::value_objects::{Assignment, ExchangeProgress, VerificationReport};
use crate::ports::inbound::AssignmentApi;
use crate::ports::outbound::{CandidateSelector, RandomSource};
use shared_types::{ParticipantId, Roster};

use tracing::{debug, error, info, warn};

/// Assignment Service
///
/// Orchestrates one request:
/// 1. Validate the giver
/// 2. Ask the selector for a receiver (bounded retries)
/// 3. Classify a refusal as `NoFeasibleOption` or `LookaheadBlocked`
/// 4. Double-check the exclusion rule on the proposed pair
/// 5. Commit and re-check invariants
pub struct AssignmentService<R: RandomSource = StdRandomSource> {
    roster: Roster,
    rule: ExclusionRule,
    config: EngineConfig,
    random: R,
    selector: Box<dyn CandidateSelector>,
}

impl<R: RandomSource> AssignmentService<R> {
    /// Create a new service with default config
    pub fn new(roster: Roster, random: R) -> Self {
        Self::with_config(roster, random, EngineConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(roster: Roster, random: R, config: EngineConfig) -> Self {
        let rule = ExclusionRule::from_roster(&roster);
        let selector = Box::new(LookaheadSelector::new(config.completion_search_budget));
        Self {
            roster,
            rule,
            config,
            random,
            selector,
        }
    }

    /// Replace the candidate selection strategy
    pub fn with_selector(mut self, selector: impl CandidateSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn rule(&self) -> &ExclusionRule {
        &self.rule
    }

    /// Giver must be a member without a receiver
    fn validate_giver(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
    ) -> Result<(), AssignmentError> {
        if !state.is_member(giver) {
            return Err(AssignmentError::UnknownParticipant {
                name: giver.clone(),
            });
        }
        if state.is_assigned(giver) {
            return Err(AssignmentError::AlreadyAssigned {
                giver: giver.clone(),
            });
        }
        Ok(())
    }

    /// Apply the committing transition and re-check invariants on the result
    fn commit(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
        receiver: &ParticipantId,
        source: AssignmentSource,
    ) -> Result<AssignmentState, AssignmentError> {
        let next = state.with_commit(giver, receiver, source);

        if self.config.verify_after_commit {
            let include_feasibility = source == AssignmentSource::Generated;
            let breaches = check_invariants(&next, &self.rule, include_feasibility);
            if !breaches.is_empty() {
                let detail = breaches
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                error!(
                    giver = %giver,
                    source = ?source,
                    breaches = %detail,
                    "Commit would break state invariants; state left unchanged"
                );
                return Err(AssignmentError::InvariantViolation(detail));
            }
        }

        Ok(next)
    }
}

impl AssignmentService<StdRandomSource> {
    /// Service with an entropy-seeded random source
    pub fn from_roster(roster: Roster) -> Self {
        Self::new(roster, StdRandomSource::from_entropy())
    }
}

impl<R: RandomSource> AssignmentApi for AssignmentService<R> {
    fn initialize(&self) -> AssignmentState {
        info!(
            exchange_id = self.roster.exchange_id(),
            participants = self.roster.len(),
            "Initializing exchange state"
        );
        AssignmentState::new(self.roster.participants().to_vec())
    }

    fn request_assignment(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
    ) -> Result<Assignment, AssignmentError> {
        self.validate_giver(state, giver)?;

        for attempt in 1..=self.config.max_attempts {
            let Some(candidate) =
                self.selector
                    .select_receiver(state, &self.rule, giver, &self.random)
            else {
                let basic = basic_candidates(state, &self.rule, giver).len();
                if basic == 0 {
                    warn!(giver = %giver, "No legal receiver remains");
                    return Err(AssignmentError::NoFeasibleOption {
                        giver: giver.clone(),
                    });
                }
                warn!(
                    giver = %giver,
                    candidates = basic,
                    "Every legal receiver would strand another participant"
                );
                return Err(AssignmentError::LookaheadBlocked {
                    giver: giver.clone(),
                    candidates: basic,
                });
            };

            if let Some(reason) = self.rule.violation(giver, &candidate) {
                error!(
                    giver = %giver,
                    attempt,
                    reason = %reason,
                    "Selector proposed an excluded pair; retrying"
                );
                continue;
            }
            if !state.is_available(&candidate) {
                error!(
                    giver = %giver,
                    attempt,
                    "Selector proposed a receiver outside the remaining pool; retrying"
                );
                continue;
            }

            let next = self.commit(state, giver, &candidate, AssignmentSource::Generated)?;

            info!(
                giver = %giver,
                attempts = attempt,
                assigned = next.assigned_count(),
                total = next.members.len(),
                "Assignment committed"
            );
            debug!(giver = %giver, receiver = %candidate, "Drawn receiver");

            return Ok(Assignment {
                state: next,
                receiver: candidate,
                attempts: attempt,
            });
        }

        error!(
            giver = %giver,
            attempts = self.config.max_attempts,
            "Retry bound exhausted without a valid draw"
        );
        Err(AssignmentError::RetriesExhausted {
            giver: giver.clone(),
            attempts: self.config.max_attempts,
        })
    }

    fn declare_assignment(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
        receiver: &ParticipantId,
    ) -> Result<AssignmentState, AssignmentError> {
        self.validate_giver(state, giver)?;

        if !state.is_member(receiver) {
            return Err(AssignmentError::UnknownParticipant {
                name: receiver.clone(),
            });
        }
        if let Some(reason) = self.rule.violation(giver, receiver) {
            return Err(AssignmentError::InvalidPair {
                giver: giver.clone(),
                receiver: receiver.clone(),
                reason,
            });
        }
        if !state.is_available(receiver) {
            return Err(AssignmentError::ReceiverTaken {
                receiver: receiver.clone(),
            });
        }

        let next = self.commit(state, giver, receiver, AssignmentSource::Declared)?;

        let stranded = stranded_members(&next, &self.rule);
        if !stranded.is_empty() {
            warn!(
                giver = %giver,
                stranded = stranded.len(),
                "Declared assignment leaves participants without a legal receiver"
            );
        }

        info!(
            giver = %giver,
            assigned = next.assigned_count(),
            total = next.members.len(),
            "Declared assignment recorded"
        );

        Ok(next)
    }

    fn lookup(&self, state: &AssignmentState, person: &ParticipantId) -> Option<ParticipantId> {
        state.receiver_for(person).cloned()
    }

    fn verify(&self, state: &AssignmentState) -> VerificationReport {
        let report = verify(state, &self.rule);
        if report.valid {
            info!("Verification passed");
        } else {
            warn!(issues = report.issues.len(), "Verification found issues");
        }
        report
    }

    fn progress(&self, state: &AssignmentState) -> ExchangeProgress {
        ExchangeProgress::from_state(state)
    }
}
