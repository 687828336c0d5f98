//! Round: one generation cycle's ordered set of games.

use crate::models::game::Game;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// An ordered collection of games for one round. Rounds are append-only:
/// once generated, the game set and team assignments are fixed and only the
/// score fields inside games mutate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number; strictly increasing, no gaps.
    pub number: u32,
    pub games: Vec<Game>,
}

impl Round {
    pub fn new(number: u32, games: Vec<Game>) -> Self {
        Self { number, games }
    }

    /// Ids of every player appearing in this round's games.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids = Vec::with_capacity(self.games.len() * 4);
        for g in &self.games {
            ids.extend(g.team_1.players);
            ids.extend(g.team_2.players);
        }
        ids
    }
}
