//! Tournament aggregate and TournamentError.

use crate::models::game::GameId;
use crate::models::player::{Player, PlayerId};
use crate::models::round::Round;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inclusive bounds on the participant count accepted at creation.
pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 24;

/// Court count a tournament falls back to after a reset.
pub const DEFAULT_COURT_COUNT: u32 = 4;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament name is empty or whitespace.
    EmptyTournamentName,
    /// A player name is empty or whitespace.
    EmptyPlayerName,
    /// The same player name was given twice (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// Participant count outside the supported range (4..=24).
    PlayerCountOutOfRange { count: usize },
    /// Court count must be at least 1.
    InvalidCourtCount { courts: u32 },
    /// No player with this id exists in the tournament.
    PlayerNotFound(PlayerId),
    /// No round with this number exists.
    RoundNotFound(u32),
    /// No game with this id exists in the addressed round.
    GameNotFound(GameId),
    /// The game already has a result and the report was not flagged as an edit.
    AlreadyScored(GameId),
    /// One or both scores exceed the allowed maximum.
    ScoreOutOfRange { team_1: u8, team_2: u8 },
    /// Tied scores are not permitted.
    TiedScore,
    /// Operation requires a created tournament (players and rounds present).
    NotStarted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyTournamentName => write!(f, "Tournament name is required"),
            TournamentError::EmptyPlayerName => write!(f, "Player names must not be empty"),
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "Player name '{}' appears more than once", name)
            }
            TournamentError::PlayerCountOutOfRange { count } => write!(
                f,
                "Need between {} and {} players (got {})",
                MIN_PLAYERS, MAX_PLAYERS, count
            ),
            TournamentError::InvalidCourtCount { courts } => {
                write!(f, "Court count must be at least 1 (got {})", courts)
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::RoundNotFound(number) => write!(f, "No round {}", number),
            TournamentError::GameNotFound(_) => write!(f, "Game not found in this round"),
            TournamentError::AlreadyScored(_) => {
                write!(f, "Game already has a result; resubmit as an edit")
            }
            TournamentError::ScoreOutOfRange { team_1, team_2 } => write!(
                f,
                "Scores must be between 0 and {} (got {}-{})",
                crate::logic::MAX_GAME_SCORE,
                team_1,
                team_2
            ),
            TournamentError::TiedScore => write!(f, "Scores cannot be equal"),
            TournamentError::NotStarted => write!(f, "Tournament has no players yet"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: players, rounds, court count, and the round cursor.
/// This struct is the complete snapshot the host persists and resumes from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Players in creation order. Standings ties resolve in this order.
    pub players: Vec<Player>,
    /// Number of courts available each round.
    pub court_count: u32,
    /// Generated rounds, numbered 1..=rounds.len() with no gaps.
    pub rounds: Vec<Round>,
    /// Display cursor: 0 before any round exists, else 1..=rounds.len().
    /// Navigation only; it never affects round data.
    pub active_round: u32,
    /// Fixed partition for the 24-player grouped mode (three groups of
    /// eight, assigned once at creation). Empty in flat mode.
    pub groups: Vec<Vec<PlayerId>>,
}

impl Tournament {
    /// Assemble a tournament with no rounds yet. Round 1 is generated by
    /// `create_tournament`, which also validates the inputs.
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        court_count: u32,
        groups: Vec<Vec<PlayerId>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players,
            court_count,
            rounds: Vec::new(),
            active_round: 0,
            groups,
        }
    }

    /// Look up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable reference to a player by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a round by its 1-based number.
    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number == number)
    }

    /// The round the cursor points at, if any round exists.
    pub fn current_round(&self) -> Option<&Round> {
        self.round(self.active_round)
    }

    /// Whether this tournament uses the fixed three-group schedule.
    pub fn is_grouped(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Move the cursor back one round, never below round 1.
    pub fn go_to_previous_round(&mut self) {
        if self.active_round > 1 {
            self.active_round -= 1;
        }
    }

    /// Players sitting out the given round: everyone not appearing in any of
    /// its games. Derived on demand, never stored.
    pub fn waiting_players(&self, round_number: u32) -> Vec<&Player> {
        let playing: Vec<PlayerId> = match self.round(round_number) {
            Some(r) => r.player_ids(),
            None => return Vec::new(),
        };
        self.players
            .iter()
            .filter(|p| !playing.contains(&p.id))
            .collect()
    }

    /// Wipe everything back to the blank aggregate (players, rounds, groups,
    /// name). The id is kept so the host's handle stays valid.
    pub fn reset(&mut self) {
        self.name.clear();
        self.players.clear();
        self.court_count = DEFAULT_COURT_COUNT;
        self.rounds.clear();
        self.active_round = 0;
        self.groups.clear();
    }
}
