//! The fixed 12-match schedule played every tournament day.

use serde::{Deserialize, Serialize};

/// Number of pair slots on a tournament day.
pub const TEAM_SLOTS: usize = 4;

/// Number of matches in the fixed schedule.
pub const MATCH_COUNT: usize = 12;

/// Slot content meaning "no pair plays here" (6-player days).
pub const BYE_TEAM: &str = "FOLGA";

/// Which side of a match a score belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// One entry of the schedule: match number and the two pair slots that meet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MatchSlot {
    pub id: u8,
    pub slot_a: usize,
    pub slot_b: usize,
}

const fn pairing(id: u8, slot_a: usize, slot_b: usize) -> MatchSlot {
    MatchSlot { id, slot_a, slot_b }
}

/// Every pair meets every other pair twice. The table is a constant of the
/// event, not configuration.
pub const MATCH_SCHEDULE: [MatchSlot; MATCH_COUNT] = [
    pairing(1, 0, 1),
    pairing(2, 2, 3),
    pairing(3, 1, 2),
    pairing(4, 3, 0),
    pairing(5, 2, 0),
    pairing(6, 3, 1),
    pairing(7, 0, 1),
    pairing(8, 2, 3),
    pairing(9, 1, 2),
    pairing(10, 3, 0),
    pairing(11, 2, 0),
    pairing(12, 3, 1),
];
