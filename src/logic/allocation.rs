//! Allocation planner: who plays this round, who waits, and on which basis.

use crate::models::{PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use rand::seq::SliceRandom;
use rand::Rng;

/// A doubles game occupies one court with two teams of two.
pub const PLAYERS_PER_COURT: usize = 4;

/// Most players the court rule allows to sit out simultaneously.
pub const MAX_WAITING_PLAYERS: usize = 6;

/// Cohort size that switches a tournament to the fixed three-group schedule.
pub const GROUPED_COHORT_SIZE: usize = 24;

/// Grouped mode: three fixed groups of eight.
pub const GROUP_COUNT: usize = 3;
pub const GROUP_SIZE: usize = 8;

/// The planner's verdict for one round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundPlan {
    /// Players taking a court this round, in pairing order (pre-shuffled).
    pub playing: Vec<PlayerId>,
    /// Players sitting this round out.
    pub waiting: Vec<PlayerId>,
}

/// Court counts the host may offer for a cohort of `player_count`.
///
/// Rosters outside `MIN_PLAYERS..=MAX_PLAYERS` get no options. Flat cohorts
/// admit a court count `c` when `0 <= player_count - 4c <= 6`, i.e. courts
/// are never left empty and at most six players wait. The 24-player grouped
/// cohort plays 16 at a time but may book up to 6 courts (see `plan_grouped`
/// for what happens beyond 4).
pub fn valid_court_counts(player_count: usize) -> Vec<u32> {
    if player_count == GROUPED_COHORT_SIZE {
        return (4..=6).collect();
    }
    let mut options = Vec::new();
    if player_count < MIN_PLAYERS || player_count > MAX_PLAYERS {
        return options;
    }
    for courts in 1..=player_count.div_ceil(PLAYERS_PER_COURT) {
        let capacity = courts * PLAYERS_PER_COURT;
        if capacity <= player_count && player_count - capacity <= MAX_WAITING_PLAYERS {
            options.push(courts as u32);
        }
    }
    options
}

/// Players left waiting each round under a given court choice. Mirrors the
/// window arithmetic of `plan_flat`/`plan_grouped` without building a plan,
/// so the setup form can label its court options.
pub fn waiting_count(player_count: usize, court_count: u32) -> usize {
    let pool = if player_count == GROUPED_COHORT_SIZE {
        GROUP_SIZE * 2
    } else {
        player_count
    };
    let capacity = court_count as usize * PLAYERS_PER_COURT;
    let on_court = pool.min(capacity) / PLAYERS_PER_COURT * PLAYERS_PER_COURT;
    player_count - on_court
}

/// Flat mode: a rotating window of the pool plays, the rest wait.
///
/// The window holds the largest multiple of 4 that fits both the pool and
/// the court capacity, taken from the pool rotated by
/// `(round_number - 1) * capacity` positions so that across rounds every
/// player cycles through playing and waiting. The window is then shuffled so
/// the pairing engine sees a fresh candidate order each round.
pub fn plan_flat<R: Rng>(
    pool: &[PlayerId],
    court_count: u32,
    round_number: u32,
    rng: &mut R,
) -> RoundPlan {
    let (mut playing, waiting) = rotated_window(pool, court_count, round_number);
    playing.shuffle(rng);
    RoundPlan { playing, waiting }
}

/// Grouped mode: two of the three fixed groups meet each round on a
/// rotating schedule. Rounds 1, 4, 7… take groups A+B, rounds 2, 5, 8…
/// A+C, rounds 3, 6, 9… B+C. The 16-player union is shuffled and windowed
/// exactly like a flat pool; the resting group always waits.
pub fn plan_grouped<R: Rng>(
    all_players: &[PlayerId],
    groups: &[Vec<PlayerId>],
    court_count: u32,
    round_number: u32,
    rng: &mut R,
) -> RoundPlan {
    let selected: [usize; 2] = match round_number.saturating_sub(1) % GROUP_COUNT as u32 {
        0 => [0, 1],
        1 => [0, 2],
        _ => [1, 2],
    };

    let mut candidates = Vec::with_capacity(GROUP_SIZE * 2);
    for &g in &selected {
        if let Some(group) = groups.get(g) {
            candidates.extend_from_slice(group);
        }
    }

    let capacity = court_count as usize * PLAYERS_PER_COURT;
    if capacity > candidates.len() {
        log::warn!(
            "{} courts exceed the {}-player group union; extra courts stay idle this round",
            court_count,
            candidates.len()
        );
    }

    candidates.shuffle(rng);
    let (playing, _) = rotated_window(&candidates, court_count, round_number);

    let waiting = all_players
        .iter()
        .filter(|id| !playing.contains(id))
        .copied()
        .collect();
    RoundPlan { playing, waiting }
}

/// Partition a 24-player cohort into three groups of eight with a single
/// shuffle. Runs once, at tournament creation; the partition never changes.
pub fn partition_into_groups<R: Rng>(players: &[PlayerId], rng: &mut R) -> Vec<Vec<PlayerId>> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    shuffled.chunks(GROUP_SIZE).map(|c| c.to_vec()).collect()
}

/// The rotation-window selection shared by both modes: playing set size is
/// always a multiple of 4 (a ragged tail cannot form complete games and
/// waits instead), and the window start advances by one capacity per round.
fn rotated_window(pool: &[PlayerId], court_count: u32, round_number: u32) -> (Vec<PlayerId>, Vec<PlayerId>) {
    let n = pool.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let capacity = court_count as usize * PLAYERS_PER_COURT;
    let window = n.min(capacity) / PLAYERS_PER_COURT * PLAYERS_PER_COURT;
    let offset = (round_number.saturating_sub(1) as usize * capacity) % n;

    let playing = (0..window).map(|i| pool[(offset + i) % n]).collect();
    let waiting = (window..n).map(|i| pool[(offset + i) % n]).collect();
    (playing, waiting)
}
