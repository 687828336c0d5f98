//! Integration tests for tournament creation, reset, navigation, and the
//! persisted snapshot format.

use padel_tournament_web::models::DEFAULT_COURT_COUNT;
use padel_tournament_web::{
    advance_round, create_tournament, report_score, GameScore, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[test]
fn create_rejects_blank_tournament_name() {
    assert!(matches!(
        create_tournament("   ", &names(8), 2, &mut rng()),
        Err(TournamentError::EmptyTournamentName)
    ));
}

#[test]
fn create_rejects_blank_player_names() {
    let mut list = names(8);
    list[3] = "   ".to_string();
    assert!(matches!(
        create_tournament("Test", &list, 2, &mut rng()),
        Err(TournamentError::EmptyPlayerName)
    ));
}

#[test]
fn create_rejects_duplicate_names_case_insensitively() {
    let list = vec![
        "Ann".to_string(),
        "Ben".to_string(),
        "ann".to_string(),
        "Dan".to_string(),
    ];
    assert!(matches!(
        create_tournament("Test", &list, 1, &mut rng()),
        Err(TournamentError::DuplicatePlayerName(n)) if n == "ann"
    ));
}

#[test]
fn create_rejects_out_of_range_player_counts() {
    assert!(matches!(
        create_tournament("Test", &names(3), 1, &mut rng()),
        Err(TournamentError::PlayerCountOutOfRange { count: 3 })
    ));
    assert!(matches!(
        create_tournament("Test", &names(25), 6, &mut rng()),
        Err(TournamentError::PlayerCountOutOfRange { count: 25 })
    ));
}

#[test]
fn create_rejects_zero_courts() {
    assert!(matches!(
        create_tournament("Test", &names(8), 0, &mut rng()),
        Err(TournamentError::InvalidCourtCount { courts: 0 })
    ));
}

#[test]
fn create_trims_names() {
    let list = vec![
        "  Ann ".to_string(),
        "Ben".to_string(),
        " Cleo".to_string(),
        "Dan ".to_string(),
    ];
    let t = create_tournament("  Friday night  ", &list, 1, &mut rng()).unwrap();
    assert_eq!(t.name, "Friday night");
    assert_eq!(t.players[0].name, "Ann");
    assert_eq!(t.players[2].name, "Cleo");
}

#[test]
fn create_generates_round_one_and_sets_the_cursor() {
    let t = create_tournament("Test", &names(8), 2, &mut rng()).unwrap();
    assert_eq!(t.rounds.len(), 1);
    assert_eq!(t.active_round, 1);
    assert_eq!(t.rounds[0].number, 1);
    assert_eq!(t.rounds[0].games.len(), 2);
    assert!(t.groups.is_empty());
    assert!(!t.is_grouped());
}

#[test]
fn twenty_four_players_get_three_fixed_groups() {
    let t = create_tournament("Big night", &names(24), 4, &mut rng()).unwrap();
    assert!(t.is_grouped());
    assert_eq!(t.groups.len(), 3);
    assert!(t.groups.iter().all(|g| g.len() == 8));
    // Two groups of eight meet in round 1: four full games.
    assert_eq!(t.rounds[0].games.len(), 4);
    assert_eq!(t.waiting_players(1).len(), 8);
}

#[test]
fn previous_round_never_drops_below_one() {
    let mut t = create_tournament("Test", &names(8), 2, &mut rng()).unwrap();
    t.go_to_previous_round();
    assert_eq!(t.active_round, 1);

    advance_round(&mut t, &mut rng()).unwrap();
    assert_eq!(t.active_round, 2);
    t.go_to_previous_round();
    t.go_to_previous_round();
    assert_eq!(t.active_round, 1);
}

#[test]
fn reset_blanks_everything_but_keeps_the_id() {
    let mut t = create_tournament("Test", &names(8), 2, &mut rng()).unwrap();
    let id = t.id;
    advance_round(&mut t, &mut rng()).unwrap();

    t.reset();
    assert_eq!(t.id, id);
    assert!(t.name.is_empty());
    assert!(t.players.is_empty());
    assert!(t.rounds.is_empty());
    assert!(t.groups.is_empty());
    assert_eq!(t.active_round, 0);
    assert_eq!(t.court_count, DEFAULT_COURT_COUNT);
}

#[test]
fn waiting_players_is_empty_when_everyone_plays() {
    let t = create_tournament("Test", &names(8), 2, &mut rng()).unwrap();
    assert!(t.waiting_players(1).is_empty());
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut rng = rng();
    let mut t = create_tournament("Persist me", &names(24), 4, &mut rng).unwrap();
    advance_round(&mut t, &mut rng).unwrap();
    let game = t.rounds[0].games[0].id;
    report_score(&mut t, 1, game, GameScore { team_1: 6, team_2: 2 }, false).unwrap();

    let json = serde_json::to_string(&t).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
