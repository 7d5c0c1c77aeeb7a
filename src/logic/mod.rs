//! Tournament-day operations: presence and pairs, score entry, standings,
//! and the annual ranking ledger.

mod annual;
mod names;
mod scoring;
mod standings;
mod teams;

pub use annual::{compute_award, finalize_tournament, reset_ranking, reset_tournament};
pub use names::{normalize_key, resolve_name, INITIAL_PLAYERS};
pub use scoring::{record_duration, record_score};
pub use standings::{compute_standings, TeamStanding};
pub use teams::{assign_team, clear_teams, draw_teams, select_all_present, set_presence};
