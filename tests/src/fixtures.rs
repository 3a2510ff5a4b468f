//! Shared rosters for tests and benchmarks.

use shared_types::{ParticipantId, Roster};
use std::collections::BTreeMap;

pub fn ids(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|n| ParticipantId::from(*n)).collect()
}

/// Roster from names and `(giver, last receiver)` pairs.
pub fn roster(names: &[&str], prior: &[(&str, &str)]) -> Roster {
    let prior: BTreeMap<ParticipantId, ParticipantId> = prior
        .iter()
        .map(|(g, r)| (ParticipantId::from(*g), ParticipantId::from(*r)))
        .collect();
    match Roster::new(ids(names), prior) {
        Ok(roster) => roster,
        Err(err) => panic!("fixture roster is invalid: {err}"),
    }
}

/// `size` people whose last-cycle receivers form one cycle.
pub fn cyclic_roster(size: usize) -> Roster {
    let members: Vec<ParticipantId> = (0..size)
        .map(|i| ParticipantId::from(format!("P{i:03}")))
        .collect();
    let prior: BTreeMap<ParticipantId, ParticipantId> = (0..size)
        .map(|i| (members[i].clone(), members[(i + 1) % size].clone()))
        .collect();
    match Roster::new(members, prior) {
        Ok(roster) => roster,
        Err(err) => panic!("fixture roster is invalid: {err}"),
    }
}

/// The seven-person family with last year's draw.
pub fn family() -> Roster {
    roster(
        &["Rosa", "Alan", "Nhic", "Camila", "Chris", "Carrie", "Ethan"],
        &[
            ("Alan", "Carrie"),
            ("Carrie", "Chris"),
            ("Chris", "Alan"),
            ("Nhic", "Ethan"),
            ("Rosa", "Camila"),
            ("Camila", "Nhic"),
            ("Ethan", "Rosa"),
        ],
    )
}
