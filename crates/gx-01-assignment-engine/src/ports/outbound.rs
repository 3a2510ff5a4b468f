//! Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the engine consumes: a randomness source and the candidate
//! selection strategy.

use crate::domain::entities::AssignmentState;
use crate::domain::exclusion::ExclusionRule;
use shared_types::ParticipantId;

/// Source of uniform random indices.
///
/// Injected into the service so tests can fix or enumerate draws.
pub trait RandomSource: Send + Sync {
    /// A value in `0..len`. `len` is never zero when called by the engine.
    fn random_index(&self, len: usize) -> usize;
}

/// Strategy that picks a receiver for a giver.
///
/// Returns `None` when it has no safe choice to offer; the engine then
/// classifies the failure itself.
pub trait CandidateSelector: Send + Sync {
    fn select_receiver(
        &self,
        state: &AssignmentState,
        rule: &ExclusionRule,
        giver: &ParticipantId,
        random: &dyn RandomSource,
    ) -> Option<ParticipantId>;
}
