//! Inbound Ports (Driving Ports / API)
//!
//! Every operation is a pure state transition: the caller passes the current
//! state in and receives the next one back. Persisting it is the caller's job.

use crate::domain::entities::AssignmentState;
use crate::domain::errors::AssignmentError;
use crate::domain::value_objects::{Assignment, ExchangeProgress, VerificationReport};
use shared_types::ParticipantId;

/// Primary assignment API
pub trait AssignmentApi: Send + Sync {
    /// Fresh state for the configured roster.
    fn initialize(&self) -> AssignmentState;

    /// Draw a receiver for `giver`.
    ///
    /// On success returns the next state and the receiver. On failure the
    /// input state is the state to keep.
    fn request_assignment(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
    ) -> Result<Assignment, AssignmentError>;

    /// Record a receiver the giver already knows.
    ///
    /// Does not consult the lookahead: a declared pair is accepted even if it
    /// narrows later options.
    fn declare_assignment(
        &self,
        state: &AssignmentState,
        giver: &ParticipantId,
        receiver: &ParticipantId,
    ) -> Result<AssignmentState, AssignmentError>;

    /// Receiver assigned to `person`, if any.
    fn lookup(&self, state: &AssignmentState, person: &ParticipantId) -> Option<ParticipantId>;

    /// Full verification of `state`.
    fn verify(&self, state: &AssignmentState) -> VerificationReport;

    /// Progress summary.
    fn progress(&self, state: &AssignmentState) -> ExchangeProgress;
}
