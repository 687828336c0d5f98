//! Tournament creation: input validation, group assignment, first round.

use crate::logic::allocation::{partition_into_groups, GROUPED_COHORT_SIZE};
use crate::logic::rounds::generate_round;
use crate::models::{Player, Tournament, TournamentError, MAX_PLAYERS, MIN_PLAYERS};
use rand::Rng;

/// Validate the inputs and build a ready-to-play tournament with round 1
/// already generated and the cursor on it.
///
/// Names are trimmed; they must be non-empty and unique (case-insensitive).
/// Exactly 24 players triggers the grouped schedule: a random partition into
/// three fixed groups of eight that holds for the tournament's lifetime.
pub fn create_tournament(
    name: impl Into<String>,
    player_names: &[String],
    court_count: u32,
    rng: &mut impl Rng,
) -> Result<Tournament, TournamentError> {
    let name = name.into();
    let name_trimmed = name.trim();
    if name_trimmed.is_empty() {
        return Err(TournamentError::EmptyTournamentName);
    }
    if court_count < 1 {
        return Err(TournamentError::InvalidCourtCount {
            courts: court_count,
        });
    }

    let mut players: Vec<Player> = Vec::with_capacity(player_names.len());
    for raw in player_names {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(TournamentError::DuplicatePlayerName(trimmed.to_string()));
        }
        players.push(Player::new(trimmed));
    }
    if players.len() < MIN_PLAYERS || players.len() > MAX_PLAYERS {
        return Err(TournamentError::PlayerCountOutOfRange {
            count: players.len(),
        });
    }

    let groups = if players.len() == GROUPED_COHORT_SIZE {
        let ids: Vec<_> = players.iter().map(|p| p.id).collect();
        partition_into_groups(&ids, rng)
    } else {
        Vec::new()
    };

    let mut tournament = Tournament::new(name_trimmed, players, court_count, groups);
    let first = generate_round(&tournament, 1, rng);
    tournament.rounds.push(first);
    tournament.active_round = 1;
    log::info!(
        "created tournament '{}' with {} players on {} courts (grouped: {})",
        tournament.name,
        tournament.players.len(),
        tournament.court_count,
        tournament.is_grouped()
    );
    Ok(tournament)
}
