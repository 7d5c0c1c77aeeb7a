//! Volei do Caos tracker: library with models, store, and scoring logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    assign_team, clear_teams, compute_award, compute_standings, draw_teams, finalize_tournament,
    normalize_key, record_duration, record_score, reset_ranking, reset_tournament, resolve_name,
    select_all_present, set_presence, TeamStanding, INITIAL_PLAYERS,
};
pub use models::{
    is_bye_or_empty, MatchScore, MatchSlot, Side, Tournament, TournamentError, BYE_TEAM,
    MATCH_COUNT, MATCH_SCHEDULE, TEAM_SLOTS,
};
pub use store::{AnnualRanking, Database, RankingEntry, Store};
