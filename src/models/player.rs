//! Player and Standing data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams and lookups).
pub type PlayerId = Uuid;

/// A tournament entrant. Points accumulate across rounds and are only ever
/// touched by the scoring engine (report/edit), never copied into teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
}

impl Player {
    /// Create a new player with the given name and zero points.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            points: 0,
        }
    }
}

/// One row of the standings table (for API / display).
/// Rank is implicit: standings are returned best-first.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
    /// Games with a recorded score in which this player appeared.
    pub matches_played: u32,
}
