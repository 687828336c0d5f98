//! Partnership ledger: how often two players have been teammates.

use crate::models::{PlayerId, Round};
use std::collections::HashMap;

/// Count of prior partnerships per unordered pair of player ids. Rebuilt
/// from round history whenever pairing needs it and never persisted, so it
/// cannot drift from the rounds it summarizes.
#[derive(Clone, Debug, Default)]
pub struct PartnershipLedger {
    counts: HashMap<(PlayerId, PlayerId), u32>,
}

/// Normalized key for an unordered pair.
fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PartnershipLedger {
    /// Build the ledger from the given rounds: every team in every game
    /// counts as one partnership for its two members.
    pub fn build<'a, I>(rounds: I) -> Self
    where
        I: IntoIterator<Item = &'a Round>,
    {
        let mut ledger = Self::default();
        for round in rounds {
            for game in &round.games {
                for team in [&game.team_1, &game.team_2] {
                    ledger.record(team.players[0], team.players[1]);
                }
            }
        }
        ledger
    }

    fn record(&mut self, a: PlayerId, b: PlayerId) {
        *self.counts.entry(key(a, b)).or_insert(0) += 1;
    }

    /// How many prior rounds paired these two players together.
    pub fn times_paired(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts.get(&key(a, b)).copied().unwrap_or(0)
    }
}
