//! Integration tests for score reporting, edits, and standings.

use padel_tournament_web::{
    create_tournament, report_score, standings, GameId, GameScore, PlayerId, Tournament,
    TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn score(team_1: u8, team_2: u8) -> GameScore {
    GameScore { team_1, team_2 }
}

/// Four players on one court: round 1 is a single game.
fn small_tournament() -> Tournament {
    let names: Vec<String> = ["Ann", "Ben", "Cleo", "Dan"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    create_tournament("Test", &names, 1, &mut StdRng::seed_from_u64(1)).unwrap()
}

/// The only game of round 1: its id and both teams' member ids.
fn first_game(t: &Tournament) -> (GameId, [PlayerId; 2], [PlayerId; 2]) {
    let game = &t.rounds[0].games[0];
    (game.id, game.team_1.players, game.team_2.players)
}

fn points(t: &Tournament, id: PlayerId) -> u32 {
    t.player(id).unwrap().points
}

#[test]
fn report_gives_each_member_their_team_score() {
    let mut t = small_tournament();
    let (game_id, team_1, team_2) = first_game(&t);

    report_score(&mut t, 1, game_id, score(3, 1), false).unwrap();

    for id in team_1 {
        assert_eq!(points(&t, id), 3);
    }
    for id in team_2 {
        assert_eq!(points(&t, id), 1);
    }
    assert_eq!(t.rounds[0].games[0].score, Some(score(3, 1)));
}

#[test]
fn edit_reverses_the_old_result_before_applying_the_new() {
    let mut t = small_tournament();
    let (game_id, team_1, team_2) = first_game(&t);

    report_score(&mut t, 1, game_id, score(3, 1), false).unwrap();
    report_score(&mut t, 1, game_id, score(1, 3), true).unwrap();

    // Exactly one application of the corrected result: 1 and 3, never 4.
    for id in team_1 {
        assert_eq!(points(&t, id), 1);
    }
    for id in team_2 {
        assert_eq!(points(&t, id), 3);
    }
    assert_eq!(t.rounds[0].games[0].score, Some(score(1, 3)));
}

#[test]
fn re_report_without_edit_flag_is_rejected() {
    let mut t = small_tournament();
    let (game_id, team_1, _) = first_game(&t);

    report_score(&mut t, 1, game_id, score(3, 1), false).unwrap();
    let err = report_score(&mut t, 1, game_id, score(5, 2), false);
    assert!(matches!(err, Err(TournamentError::AlreadyScored(id)) if id == game_id));

    // First result stands untouched.
    assert_eq!(t.rounds[0].games[0].score, Some(score(3, 1)));
    for id in team_1 {
        assert_eq!(points(&t, id), 3);
    }
}

#[test]
fn edit_flag_on_an_unscored_game_simply_applies() {
    let mut t = small_tournament();
    let (game_id, team_1, _) = first_game(&t);

    report_score(&mut t, 1, game_id, score(4, 2), true).unwrap();
    for id in team_1 {
        assert_eq!(points(&t, id), 4);
    }
}

#[test]
fn tied_scores_are_rejected_without_mutation() {
    let mut t = small_tournament();
    let (game_id, team_1, team_2) = first_game(&t);

    assert!(matches!(
        report_score(&mut t, 1, game_id, score(2, 2), false),
        Err(TournamentError::TiedScore)
    ));
    assert_eq!(t.rounds[0].games[0].score, None);
    for id in team_1.iter().chain(team_2.iter()) {
        assert_eq!(points(&t, *id), 0);
    }
}

#[test]
fn scores_above_the_maximum_are_rejected() {
    let mut t = small_tournament();
    let (game_id, _, _) = first_game(&t);

    assert!(matches!(
        report_score(&mut t, 1, game_id, score(8, 1), false),
        Err(TournamentError::ScoreOutOfRange { team_1: 8, team_2: 1 })
    ));
    // 7-0 is the edge of the allowed range.
    report_score(&mut t, 1, game_id, score(7, 0), false).unwrap();
}

#[test]
fn unknown_round_or_game_is_rejected() {
    let mut t = small_tournament();
    let (game_id, _, _) = first_game(&t);

    assert!(matches!(
        report_score(&mut t, 9, game_id, score(3, 1), false),
        Err(TournamentError::RoundNotFound(9))
    ));

    let missing = GameId::new_v4();
    assert!(matches!(
        report_score(&mut t, 1, missing, score(3, 1), false),
        Err(TournamentError::GameNotFound(id)) if id == missing
    ));
}

#[test]
fn standings_sort_by_points_with_stable_ties() {
    let mut t = small_tournament();
    let (game_id, _, _) = first_game(&t);
    report_score(&mut t, 1, game_id, score(3, 1), false).unwrap();

    let rows = standings(&t);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].points, 3);
    assert_eq!(rows[1].points, 3);
    assert_eq!(rows[2].points, 1);
    assert_eq!(rows[3].points, 1);

    // Ties keep creation order: the expected ranking is the player list
    // stably sorted by points, so ids must match position for position.
    let mut expected: Vec<PlayerId> = t.players.iter().map(|p| p.id).collect();
    expected.sort_by_key(|id| std::cmp::Reverse(points(&t, *id)));
    let got: Vec<PlayerId> = rows.iter().map(|r| r.player_id).collect();
    assert_eq!(got, expected);

    for row in &rows {
        assert_eq!(row.matches_played, 1);
    }
}

#[test]
fn standings_before_any_result_keep_creation_order() {
    let t = small_tournament();
    let rows = standings(&t);
    let got: Vec<PlayerId> = rows.iter().map(|r| r.player_id).collect();
    let expected: Vec<PlayerId> = t.players.iter().map(|p| p.id).collect();
    assert_eq!(got, expected);
    assert!(rows.iter().all(|r| r.points == 0 && r.matches_played == 0));
}

#[test]
fn unscored_games_do_not_count_as_played() {
    let mut t = small_tournament();
    let (game_id, team_1, _) = first_game(&t);

    assert!(standings(&t).iter().all(|r| r.matches_played == 0));
    report_score(&mut t, 1, game_id, score(6, 4), false).unwrap();

    let rows = standings(&t);
    let row = rows.iter().find(|r| r.player_id == team_1[0]).unwrap();
    assert_eq!(row.matches_played, 1);
}
