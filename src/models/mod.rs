//! Data structures for the padel tournament: players, games, rounds, state.

mod game;
mod player;
mod round;
mod tournament;

pub use game::{Game, GameId, GameScore, Team};
pub use player::{Player, PlayerId, Standing};
pub use round::Round;
pub use tournament::{
    Tournament, TournamentError, TournamentId, DEFAULT_COURT_COUNT, MAX_PLAYERS, MIN_PLAYERS,
};
