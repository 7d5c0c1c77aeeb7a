//! Data structures: the fixed match schedule and the per-date tournament record.

mod schedule;
mod tournament;

pub use schedule::{MatchSlot, Side, BYE_TEAM, MATCH_COUNT, MATCH_SCHEDULE, TEAM_SLOTS};
pub use tournament::{is_bye_or_empty, MatchScore, Tournament, TournamentError};
