//! Round generation: partnership ledger → allocation → pairing → games.

use crate::logic::allocation;
use crate::logic::pairing::pair_players;
use crate::logic::partnerships::PartnershipLedger;
use crate::models::{Game, PlayerId, Round, Team, Tournament, TournamentError};
use rand::Rng;

/// Build one full round for the given round number.
///
/// The partnership ledger is rebuilt from every round strictly before
/// `round_number`, the planner picks the playing set in the mode matching
/// the cohort, the pairing engine forms teams, and consecutive teams are
/// grouped two-at-a-time into games with courts assigned round-robin
/// (game `i` plays on court `(i % court_count) + 1`).
///
/// The round's shape is a pure function of the tournament and the rng, so
/// callers needing reproducible rounds pass a seeded rng.
pub fn generate_round<R: Rng>(tournament: &Tournament, round_number: u32, rng: &mut R) -> Round {
    let ledger =
        PartnershipLedger::build(tournament.rounds.iter().filter(|r| r.number < round_number));

    let pool: Vec<PlayerId> = tournament.players.iter().map(|p| p.id).collect();
    let plan = if tournament.is_grouped() {
        allocation::plan_grouped(
            &pool,
            &tournament.groups,
            tournament.court_count,
            round_number,
            rng,
        )
    } else {
        allocation::plan_flat(&pool, tournament.court_count, round_number, rng)
    };

    let pairs = pair_players(&plan.playing, &ledger);

    let mut games = Vec::with_capacity(pairs.len() / 2);
    for (i, chunk) in pairs.chunks_exact(2).enumerate() {
        let i = i as u32;
        let court = (i % tournament.court_count) + 1;
        let team_1 = Team::new(2 * i + 1, chunk[0].0, chunk[0].1);
        let team_2 = Team::new(2 * i + 2, chunk[1].0, chunk[1].1);
        games.push(Game::new(court, team_1, team_2));
    }

    log::debug!(
        "generated round {}: {} games, {} waiting",
        round_number,
        games.len(),
        plan.waiting.len()
    );
    Round::new(round_number, games)
}

/// Move the cursor to the next round, generating it first if it does not
/// exist yet. Advancing never requires the current round to be fully
/// scored; unscored games simply stay unscored and count for nobody.
pub fn advance_round<R: Rng>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.players.is_empty() {
        return Err(TournamentError::NotStarted);
    }
    let next = tournament.active_round + 1;
    if tournament.round(next).is_none() {
        let round = generate_round(tournament, next, rng);
        tournament.rounds.push(round);
    }
    tournament.active_round = next;
    Ok(())
}
