//! Score and duration entry against the fixed match schedule.

use crate::models::{Side, Tournament, TournamentError, MATCH_COUNT};

/// Record one side's score. Writes to a match without a game (bye or empty
/// slot) are ignored rather than rejected; scores arrive keystroke by
/// keystroke while the match is still being played.
pub fn record_score(
    t: &mut Tournament,
    idx: usize,
    side: Side,
    value: Option<u32>,
) -> Result<(), TournamentError> {
    if idx >= MATCH_COUNT {
        return Err(TournamentError::MatchOutOfRange(idx));
    }
    if !t.match_is_active(idx) {
        return Ok(());
    }
    match side {
        Side::A => t.scores[idx].score_a = value,
        Side::B => t.scores[idx].score_b = value,
    }
    Ok(())
}

/// Record the duration text shown by the stopwatch. Same inactive-match
/// guard as scores; the text itself is opaque to the core.
pub fn record_duration(
    t: &mut Tournament,
    idx: usize,
    duration: &str,
) -> Result<(), TournamentError> {
    if idx >= MATCH_COUNT {
        return Err(TournamentError::MatchOutOfRange(idx));
    }
    if !t.match_is_active(idx) {
        return Ok(());
    }
    t.scores[idx].duration = duration.to_string();
    Ok(())
}
