//! Daily standings derived from recorded scores. Pure: reads a tournament,
//! never mutates it.

use crate::models::{is_bye_or_empty, Tournament, MATCH_SCHEDULE, TEAM_SLOTS};
use serde::Serialize;

/// One ranked row of the daily table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team: String,
    pub wins: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// Score balance: points scored minus points conceded.
    pub saldo: i64,
}

/// Rank the day's pairs: wins first, then saldo. A match contributes only
/// once both sides have a score; equal scores award no win to either pair.
/// Bye and empty slots stay out of the table, and exact ties keep slot order.
pub fn compute_standings(t: &Tournament) -> Vec<TeamStanding> {
    let mut wins = [0u32; TEAM_SLOTS];
    let mut points_for = [0u32; TEAM_SLOTS];
    let mut points_against = [0u32; TEAM_SLOTS];

    for (idx, m) in MATCH_SCHEDULE.iter().enumerate() {
        if !t.match_is_active(idx) {
            continue;
        }
        let (a, b) = match (t.scores[idx].score_a, t.scores[idx].score_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        points_for[m.slot_a] += a;
        points_against[m.slot_a] += b;
        points_for[m.slot_b] += b;
        points_against[m.slot_b] += a;
        if a > b {
            wins[m.slot_a] += 1;
        } else if b > a {
            wins[m.slot_b] += 1;
        }
    }

    let mut table: Vec<TeamStanding> = (0..TEAM_SLOTS)
        .filter(|&i| !is_bye_or_empty(&t.team_slots[i]))
        .map(|i| TeamStanding {
            team: t.team_slots[i].clone(),
            wins: wins[i],
            points_for: points_for[i],
            points_against: points_against[i],
            saldo: i64::from(points_for[i]) - i64::from(points_against[i]),
        })
        .collect();

    table.sort_by(|x, y| y.wins.cmp(&x.wins).then(y.saldo.cmp(&x.saldo)));
    table
}
