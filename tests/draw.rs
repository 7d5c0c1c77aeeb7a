//! Integration tests for pair composition: presence list, draws, bye handling.

use chrono::NaiveDate;
use volei_caos_web::{
    assign_team, clear_teams, draw_teams, record_score, select_all_present, set_presence, Side,
    Store, TournamentError, BYE_TEAM, INITIAL_PLAYERS, MATCH_SCHEDULE,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn store_with_present(names: &[&str]) -> Store {
    let mut store = Store::in_memory();
    let (t, annual) = store.tournament_and_ranking(date());
    for n in names {
        set_presence(t, annual, n, true).unwrap();
    }
    store
}

#[test]
fn draw_with_8_fills_four_pair_slots() {
    let mut store = store_with_present(&[
        "Rodrigo", "Italo", "MB", "Claudino", "Bené", "Samuel", "Vitim", "Pedro",
    ]);
    let (t, annual) = store.tournament_and_ranking(date());
    draw_teams(t, annual).unwrap();

    assert_eq!(t.team_slots.len(), 4);
    for slot in &t.team_slots {
        assert_eq!(slot.matches('/').count(), 1, "slot {:?} is not a pair", slot);
    }
    let mut drawn: Vec<&str> = t
        .team_slots
        .iter()
        .flat_map(|s| s.split('/'))
        .collect();
    drawn.sort_unstable();
    let mut expected = vec![
        "Bené", "Claudino", "Italo", "MB", "Pedro", "Rodrigo", "Samuel", "Vitim",
    ];
    expected.sort_unstable();
    assert_eq!(drawn, expected);
}

#[test]
fn draw_with_6_leaves_a_bye_slot() {
    let mut store = store_with_present(&["Rodrigo", "Italo", "MB", "Claudino", "Bené", "Samuel"]);
    let (t, annual) = store.tournament_and_ranking(date());
    draw_teams(t, annual).unwrap();

    assert_eq!(t.team_slots[3], BYE_TEAM);
    for slot in &t.team_slots[..3] {
        assert_eq!(slot.matches('/').count(), 1);
    }
}

#[test]
fn draw_with_6_clears_scores_of_matches_touching_the_bye_slot() {
    let mut store = store_with_present(&["Rodrigo", "Italo", "MB", "Claudino", "Bené", "Samuel"]);
    let (t, annual) = store.tournament_and_ranking(date());
    for i in 0..4 {
        assign_team(t, i, &format!("T{}", i)).unwrap();
    }
    // Match 0 is slots 0v1, match 1 is slots 2v3.
    record_score(t, 0, Side::A, Some(21)).unwrap();
    record_score(t, 0, Side::B, Some(15)).unwrap();
    record_score(t, 1, Side::A, Some(10)).unwrap();

    draw_teams(t, annual).unwrap();

    // Slots 0..3 hold fresh pairs, so the 0v1 score survives the redraw.
    assert_eq!(t.scores[0].score_a, Some(21));
    assert_eq!(t.scores[0].score_b, Some(15));
    // Every match that references the bye slot lost its game and its score.
    for (idx, m) in MATCH_SCHEDULE.iter().enumerate() {
        if m.slot_a == 3 || m.slot_b == 3 {
            assert_eq!(t.scores[idx].score_a, None, "match {} kept a score", idx);
            assert_eq!(t.scores[idx].score_b, None);
            assert_eq!(t.scores[idx].duration, "");
        }
    }
}

#[test]
fn draw_rejects_wrong_presence_counts() {
    for n in [5usize, 7, 9] {
        let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut store = store_with_present(&refs);
        let (t, annual) = store.tournament_and_ranking(date());
        let before = t.team_slots.clone();

        let err = draw_teams(t, annual).unwrap_err();
        assert_eq!(err, TournamentError::InvalidPresenceCount { selected: n });
        assert_eq!(t.team_slots, before, "a failed draw must not touch slots");
    }
}

#[test]
fn draw_counts_spelling_variants_once() {
    // 8 checkboxes ticked, but two of them are the same person.
    let mut store = store_with_present(&[
        "Rodrigo", "Italo", "MB", "Claudino", "Bené", "Samuel", "Vitim", "Pedro",
    ]);
    let (t, _) = store.tournament_and_ranking(date());
    t.present_players.push("rodrigo".to_string());
    t.present_players.push("ITALO".to_string());
    let (t, annual) = store.tournament_and_ranking(date());

    // Still 8 distinct people, so the draw goes through.
    draw_teams(t, annual).unwrap();
    assert!(t.team_slots.iter().all(|s| s.matches('/').count() == 1));
}

#[test]
fn presence_list_holds_one_spelling_per_person() {
    let mut store = Store::in_memory();
    let (t, annual) = store.tournament_and_ranking(date());

    set_presence(t, annual, "Diêgo", true).unwrap();
    set_presence(t, annual, "diego", true).unwrap();
    assert_eq!(t.present_players, vec!["Diêgo".to_string()]);

    set_presence(t, annual, "DIEGO", false).unwrap();
    assert!(t.present_players.is_empty());
}

#[test]
fn set_presence_rejects_empty_names() {
    let mut store = Store::in_memory();
    let (t, annual) = store.tournament_and_ranking(date());
    assert_eq!(
        set_presence(t, annual, "", true),
        Err(TournamentError::EmptyPlayerName)
    );
    assert_eq!(
        set_presence(t, annual, "   ", true),
        Err(TournamentError::EmptyPlayerName)
    );
}

#[test]
fn select_all_present_marks_the_first_roster_players() {
    let mut store = Store::in_memory();
    let (t, annual) = store.tournament_and_ranking(date());

    select_all_present(t, annual, true, 6);
    assert_eq!(t.present_players.len(), 6);
    assert_eq!(t.present_players[0], INITIAL_PLAYERS[0]);

    select_all_present(t, annual, true, 8);
    assert_eq!(t.present_players.len(), 8);

    // Any other count means the default of 8.
    select_all_present(t, annual, true, 7);
    assert_eq!(t.present_players.len(), 8);

    select_all_present(t, annual, false, 8);
    assert!(t.present_players.is_empty());
}

#[test]
fn assigning_an_empty_slot_clears_its_matches_immediately() {
    let mut store = Store::in_memory();
    let t = store.tournament_mut(date());
    for (i, team) in ["A/B", "C/D", "E/F", "G/H"].iter().enumerate() {
        assign_team(t, i, team).unwrap();
    }
    record_score(t, 0, Side::A, Some(21)).unwrap(); // 0v1
    record_score(t, 1, Side::A, Some(12)).unwrap(); // 2v3

    assign_team(t, 1, "").unwrap();

    // Matches referencing slot 1 lost their scores at the transition...
    assert_eq!(t.scores[0].score_a, None);
    // ...matches that kept both pairs did not.
    assert_eq!(t.scores[1].score_a, Some(12));

    // And later writes to the dead match are ignored, not stored.
    record_score(t, 0, Side::A, Some(99)).unwrap();
    assert_eq!(t.scores[0].score_a, None);
}

#[test]
fn record_score_rejects_out_of_range_matches() {
    let mut store = Store::in_memory();
    let t = store.tournament_mut(date());
    assert_eq!(
        record_score(t, 12, Side::A, Some(1)),
        Err(TournamentError::MatchOutOfRange(12))
    );
}

#[test]
fn assign_team_rejects_out_of_range_slots() {
    let mut store = Store::in_memory();
    let t = store.tournament_mut(date());
    assert_eq!(
        assign_team(t, 4, "A/B"),
        Err(TournamentError::TeamSlotOutOfRange(4))
    );
}

#[test]
fn clear_teams_reopens_the_day() {
    let mut store = Store::in_memory();
    let t = store.tournament_mut(date());
    for (i, team) in ["A/B", "C/D", "E/F", "G/H"].iter().enumerate() {
        assign_team(t, i, team).unwrap();
    }
    record_score(t, 0, Side::A, Some(21)).unwrap();
    t.finished = true;
    t.annual_award = Some(Default::default());

    clear_teams(t);

    assert!(t.team_slots.iter().all(|s| s.is_empty()));
    assert!(!t.finished);
    assert!(t.annual_award.is_none());
    assert!(t.scores.iter().all(|s| s.score_a.is_none() && s.score_b.is_none()));
}
