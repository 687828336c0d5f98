//! Tournament business logic: setup, allocation, pairing, rounds, scoring.

mod allocation;
mod pairing;
mod partnerships;
mod rounds;
mod scoring;
mod setup;

pub use allocation::{
    partition_into_groups, plan_flat, plan_grouped, valid_court_counts, waiting_count, RoundPlan,
    GROUPED_COHORT_SIZE, GROUP_COUNT, GROUP_SIZE, MAX_WAITING_PLAYERS, PLAYERS_PER_COURT,
};
pub use pairing::pair_players;
pub use partnerships::PartnershipLedger;
pub use rounds::{advance_round, generate_round};
pub use scoring::{report_score, standings, MAX_GAME_SCORE};
pub use setup::create_tournament;
