//! Pair composition for a tournament day: presence list, random draw,
//! manual slot naming.

use crate::logic::names::{normalize_key, resolve_name, INITIAL_PLAYERS};
use crate::models::{Tournament, TournamentError, BYE_TEAM, TEAM_SLOTS};
use crate::store::AnnualRanking;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Mark a player present or absent for the day. Any spelling variant already
/// on the list is removed before the canonical one is added, so the list
/// never holds the same person twice.
pub fn set_presence(
    t: &mut Tournament,
    annual: &AnnualRanking,
    name: &str,
    present: bool,
) -> Result<(), TournamentError> {
    let canonical = resolve_name(name, annual);
    if canonical.is_empty() {
        return Err(TournamentError::EmptyPlayerName);
    }
    let key = normalize_key(&canonical);
    t.present_players.retain(|n| normalize_key(n) != key);
    if present {
        t.present_players.push(canonical);
    }
    Ok(())
}

/// Bulk presence toggle: enabling marks the first 6 or 8 roster players
/// (any other count means 8), disabling clears the list.
pub fn select_all_present(t: &mut Tournament, annual: &AnnualRanking, enable: bool, count: usize) {
    if enable {
        let n = if count == 6 { 6 } else { 8 };
        t.present_players = INITIAL_PLAYERS
            .iter()
            .take(n)
            .map(|p| resolve_name(p, annual))
            .collect();
    } else {
        t.present_players.clear();
    }
}

/// Draw the day's pairs from the presence list.
///
/// Requires exactly 6 or 8 distinct players (spelling variants count once).
/// 8 players fill all four slots; 6 fill three and the fourth becomes the
/// bye slot, wiping the scores of every match that no longer has a game.
/// Existing pairs are overwritten; asking the user first is the front-end's
/// job.
pub fn draw_teams(t: &mut Tournament, annual: &AnnualRanking) -> Result<(), TournamentError> {
    let mut pool: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for name in &t.present_players {
        let canonical = resolve_name(name, annual);
        if canonical.is_empty() {
            continue;
        }
        if seen.insert(normalize_key(&canonical)) {
            pool.push(canonical);
        }
    }

    if pool.len() != 6 && pool.len() != 8 {
        return Err(TournamentError::InvalidPresenceCount {
            selected: pool.len(),
        });
    }

    pool.shuffle(&mut rand::thread_rng());

    let mut slots: Vec<String> = pool
        .chunks_exact(2)
        .map(|pair| format!("{}/{}", pair[0], pair[1]))
        .collect();
    if slots.len() < TEAM_SLOTS {
        slots.push(BYE_TEAM.to_string());
    }
    t.team_slots = slots;
    t.clear_inactive_matches();
    Ok(())
}

/// Write a slot's name directly (manual pairs instead of a draw). Free text;
/// the bye marker and empty text deactivate the slot's matches.
pub fn assign_team(t: &mut Tournament, slot: usize, name: &str) -> Result<(), TournamentError> {
    if slot >= TEAM_SLOTS {
        return Err(TournamentError::TeamSlotOutOfRange(slot));
    }
    t.team_slots[slot] = name.to_string();
    t.clear_inactive_matches();
    Ok(())
}

/// Empty all four slots and reopen the day. Every match loses its game, so
/// all scores clear. Points already granted stay in the annual ranking;
/// taking them back is the privileged reset, not this.
pub fn clear_teams(t: &mut Tournament) {
    t.team_slots = vec![String::new(); TEAM_SLOTS];
    t.finished = false;
    t.annual_award = None;
    t.clear_inactive_matches();
}
