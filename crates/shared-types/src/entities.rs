//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `ParticipantId`
//! - **Configuration**: `Roster` (participant set + prior-cycle map), `RosterFile`

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::errors::RosterError;

// =============================================================================
// IDENTITY
// =============================================================================

/// Unique identifier (name) of a participant in the exchange.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Default exchange identifier used when a roster file omits one.
pub const DEFAULT_EXCHANGE_ID: &str = "gift-exchange";

/// The fixed group for one exchange cycle.
///
/// Holds the ordered participant set and, per participant, the receiver they
/// were assigned in the previous cycle. Validated once on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    exchange_id: String,
    participants: Vec<ParticipantId>,
    prior_cycle: BTreeMap<ParticipantId, ParticipantId>,
}

impl Roster {
    /// Build a roster, rejecting empty and duplicate identifiers.
    ///
    /// Prior-cycle entries that mention someone outside the participant set
    /// are kept (the exclusion rule is total over identifiers) but logged.
    pub fn new(
        participants: Vec<ParticipantId>,
        prior_cycle: BTreeMap<ParticipantId, ParticipantId>,
    ) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(participants.len());
        for (position, participant) in participants.iter().enumerate() {
            if participant.as_str().trim().is_empty() {
                return Err(RosterError::EmptyIdentifier { position });
            }
            if !seen.insert(participant) {
                return Err(RosterError::DuplicateParticipant {
                    name: participant.to_string(),
                });
            }
        }

        for (giver, receiver) in &prior_cycle {
            if !seen.contains(giver) || !seen.contains(receiver) {
                tracing::warn!(
                    giver = %giver,
                    "Prior-cycle entry references someone outside the roster"
                );
            }
        }

        Ok(Self {
            exchange_id: DEFAULT_EXCHANGE_ID.to_string(),
            participants,
            prior_cycle,
        })
    }

    /// Set the identifier under which this exchange is persisted.
    pub fn with_exchange_id(mut self, exchange_id: impl Into<String>) -> Self {
        self.exchange_id = exchange_id.into();
        self
    }

    /// Load and validate a roster from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RosterError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a roster from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, RosterError> {
        let file: RosterFile =
            serde_json::from_str(raw).map_err(|e| RosterError::Malformed(e.to_string()))?;
        file.into_roster()
    }

    pub fn exchange_id(&self) -> &str {
        &self.exchange_id
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn prior_cycle(&self) -> &BTreeMap<ParticipantId, ParticipantId> {
        &self.prior_cycle
    }

    /// Receiver `giver` had in the previous cycle, if any.
    pub fn prior_receiver(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.prior_cycle.get(giver)
    }

    pub fn contains(&self, participant: &ParticipantId) -> bool {
        self.participants.contains(participant)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// On-disk shape of a roster.
///
/// ```json
/// {
///   "exchange_id": "family-2025",
///   "participants": ["Rosa", "Alan"],
///   "prior_cycle": { "Alan": "Rosa" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub exchange_id: Option<String>,
    pub participants: Vec<ParticipantId>,
    #[serde(default)]
    pub prior_cycle: BTreeMap<ParticipantId, ParticipantId>,
}

impl RosterFile {
    pub fn into_roster(self) -> Result<Roster, RosterError> {
        let roster = Roster::new(self.participants, self.prior_cycle)?;
        Ok(match self.exchange_id {
            Some(id) => roster.with_exchange_id(id),
            None => roster,
        })
    }
}
