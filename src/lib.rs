//! Padel americano tournament organizer: library with models and round logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, create_tournament, generate_round, pair_players, partition_into_groups,
    plan_flat, plan_grouped, report_score, standings, valid_court_counts, waiting_count,
    PartnershipLedger, RoundPlan, MAX_GAME_SCORE,
};
pub use models::{
    Game, GameId, GameScore, Player, PlayerId, Round, Standing, Team, Tournament, TournamentError,
    TournamentId,
};
