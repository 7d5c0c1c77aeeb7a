//! Tournament record for one calendar date, plus the core error type.

use crate::models::schedule::{BYE_TEAM, MATCH_COUNT, MATCH_SCHEDULE, TEAM_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A draw needs exactly 6 or 8 distinct present players.
    InvalidPresenceCount { selected: usize },
    /// Player name resolved to nothing (empty or whitespace-only input).
    EmptyPlayerName,
    /// Team slot index outside 0..=3.
    TeamSlotOutOfRange(usize),
    /// Match index outside 0..=11.
    MatchOutOfRange(usize),
    /// Privileged operation attempted without the admin capability.
    PermissionDenied,
    /// The day is already finished; annual points were not applied again.
    AlreadyFinished,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidPresenceCount { selected } => {
                write!(f, "Need exactly 6 or 8 present players to draw (have {})", selected)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name is empty"),
            TournamentError::TeamSlotOutOfRange(slot) => write!(f, "No team slot {}", slot),
            TournamentError::MatchOutOfRange(idx) => write!(f, "No match {}", idx),
            TournamentError::PermissionDenied => write!(f, "Only the admin can do this"),
            TournamentError::AlreadyFinished => write!(f, "Tournament already finished"),
        }
    }
}

/// True for slot contents that mean "no pair plays here": empty text or the
/// bye marker, however capitalized.
pub fn is_bye_or_empty(name: &str) -> bool {
    let n = name.trim();
    n.is_empty() || n.eq_ignore_ascii_case(BYE_TEAM)
}

/// Recorded state of one match: both scores and the stopwatch text.
///
/// Scores are nullable because they are typed in while the match is still
/// being played; a missing side keeps the match out of the standings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
    /// Opaque duration text supplied by the stopwatch display.
    #[serde(default)]
    pub duration: String,
}

impl MatchScore {
    pub fn clear(&mut self) {
        *self = MatchScore::default();
    }
}

fn default_team_slots() -> Vec<String> {
    vec![String::new(); TEAM_SLOTS]
}

fn default_scores() -> Vec<MatchScore> {
    vec![MatchScore::default(); MATCH_COUNT]
}

/// One tournament day: four pair slots, twelve recorded matches, the presence
/// list used for draws, and the annual-award receipt once finished.
///
/// Field defaults double as backfill when loading snapshots written by older
/// versions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(default = "default_team_slots")]
    pub team_slots: Vec<String>,
    #[serde(default = "default_scores")]
    pub scores: Vec<MatchScore>,
    /// Canonical names marked present for the day (draw input only).
    #[serde(default)]
    pub present_players: Vec<String>,
    #[serde(default)]
    pub finished: bool,
    /// Exact points this day contributed to the annual ranking; the receipt
    /// used to take them back out on reset. `Some` iff `finished`.
    #[serde(default)]
    pub annual_award: Option<BTreeMap<String, u32>>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Empty day: no pairs, no scores, not finished.
    pub fn new() -> Self {
        Self {
            team_slots: default_team_slots(),
            scores: default_scores(),
            present_players: Vec::new(),
            finished: false,
            annual_award: None,
        }
    }

    /// Restore the fixed vector lengths on records from malformed or
    /// hand-edited snapshots.
    pub fn backfill(&mut self) {
        self.team_slots.resize(TEAM_SLOTS, String::new());
        self.scores.resize(MATCH_COUNT, MatchScore::default());
    }

    /// A match has a game iff both of its slots hold a real pair.
    pub fn match_is_active(&self, idx: usize) -> bool {
        let m = match MATCH_SCHEDULE.get(idx) {
            Some(m) => m,
            None => return false,
        };
        !is_bye_or_empty(&self.team_slots[m.slot_a]) && !is_bye_or_empty(&self.team_slots[m.slot_b])
    }

    /// Wipe scores and durations of every match that currently has no game.
    /// Called after any slot write so stale results never survive a pair
    /// becoming empty or a bye.
    pub fn clear_inactive_matches(&mut self) {
        for idx in 0..MATCH_COUNT {
            if !self.match_is_active(idx) {
                self.scores[idx].clear();
            }
        }
    }
}
