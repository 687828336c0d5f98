//! Team, Game and GameScore for 2v2 games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Two players assigned to play together for one round.
///
/// Holds player ids only. Names and points are looked up live from the
/// tournament's player list so an edited score can never leave a stale copy
/// behind inside a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// 1-based team number, unique within the round that created it.
    pub number: u32,
    pub players: [PlayerId; 2],
}

impl Team {
    pub fn new(number: u32, a: PlayerId, b: PlayerId) -> Self {
        Self {
            number,
            players: [a, b],
        }
    }

    /// Whether the given player is one of the two members.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }
}

/// A recorded result: games won by each team. Never a tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub team_1: u8,
    pub team_2: u8,
}

/// A single 2v2 game on one court. `score` is `None` until reported.
/// Court and team membership never change after creation; only `score` does.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Court number, 1..=court_count.
    pub court: u32,
    pub team_1: Team,
    pub team_2: Team,
    pub score: Option<GameScore>,
}

impl Game {
    pub fn new(court: u32, team_1: Team, team_2: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            court,
            team_1,
            team_2,
            score: None,
        }
    }

    /// Whether the given player appears on either team.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.team_1.contains(id) || self.team_2.contains(id)
    }
}
