//! Annual ranking ledger: point awards when a day is finished, and their
//! reversal (estorno) when a finished day is reset.

use crate::logic::names::resolve_name;
use crate::logic::standings::compute_standings;
use crate::models::{Tournament, TournamentError};
use crate::store::{AnnualRanking, Store};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Points granted per final position: a full day of four pairs, or three on
/// a bye day. Any other surviving count grants nothing.
fn point_table(teams: usize) -> &'static [u32] {
    match teams {
        4 => &[5, 3, 2, 2],
        3 => &[5, 3, 2],
        _ => &[],
    }
}

/// The exact contribution this day would make to the annual ranking.
///
/// Pair names split on `/`; each token resolves to its canonical player and
/// collects the pair's position points. A player listed twice in one pair
/// collects twice.
pub fn compute_award(t: &Tournament, annual: &AnnualRanking) -> BTreeMap<String, u32> {
    let standings = compute_standings(t);
    let points = point_table(standings.len());

    let mut award = BTreeMap::new();
    for (rank, row) in standings.iter().enumerate() {
        let pts = match points.get(rank) {
            Some(&p) => p,
            None => 0,
        };
        if pts == 0 {
            continue;
        }
        for token in row.team.split('/') {
            let player = resolve_name(token, annual);
            if player.is_empty() {
                continue;
            }
            *award.entry(player).or_insert(0) += pts;
        }
    }
    award
}

/// Close out the day: grant its award to the annual ranking, keep the award
/// on the tournament as the estorno receipt, and mark the day finished.
/// One-way; a second call reports `AlreadyFinished` and changes nothing.
pub fn finalize_tournament(store: &mut Store, date: NaiveDate) -> Result<(), TournamentError> {
    let award = {
        let (t, annual) = store.tournament_and_ranking(date);
        if t.finished {
            return Err(TournamentError::AlreadyFinished);
        }
        compute_award(t, annual)
    };
    for (player, pts) in &award {
        *store.db.annual_points.entry(player.clone()).or_insert(0) += pts;
    }
    let t = store.tournament_mut(date);
    t.annual_award = Some(award);
    t.finished = true;
    Ok(())
}

/// Take a finished day's points back out of the ranking. Uses the stored
/// receipt when present, otherwise recomputes from the current scores
/// (records written before receipts existed). Totals floor at zero so a
/// manually edited ranking never goes negative, and the fixed roster keeps
/// its entries.
fn revert_award(store: &mut Store, date: NaiveDate) {
    let award = {
        let (t, annual) = store.tournament_and_ranking(date);
        match &t.annual_award {
            Some(receipt) => receipt.clone(),
            None => compute_award(t, annual),
        }
    };
    for (player, pts) in &award {
        let total = store.db.annual_points.entry(player.clone()).or_insert(0);
        *total = total.saturating_sub(*pts);
    }
    store.ensure_seed_players();
}

/// Wipe the annual ranking back to the fixed roster at zero points.
/// Privileged: refused without the admin capability.
pub fn reset_ranking(store: &mut Store, is_admin: bool) -> Result<(), TournamentError> {
    if !is_admin {
        return Err(TournamentError::PermissionDenied);
    }
    store.db.annual_points.clear();
    store.ensure_seed_players();
    Ok(())
}

/// Throw one day away and start it over. A finished day first gives its
/// points back to the annual ranking. Privileged: refused without the admin
/// capability.
pub fn reset_tournament(
    store: &mut Store,
    date: NaiveDate,
    is_admin: bool,
) -> Result<(), TournamentError> {
    if !is_admin {
        return Err(TournamentError::PermissionDenied);
    }
    let finished = store
        .db
        .tournaments
        .get(&date)
        .map(|t| t.finished)
        .unwrap_or(false);
    if finished {
        revert_award(store, date);
    }
    store.db.tournaments.insert(date, Tournament::new());
    Ok(())
}
