//! Pairing engine: team assignment with repeat-partnership avoidance.

use crate::logic::partnerships::PartnershipLedger;
use crate::models::PlayerId;
use std::collections::HashSet;

/// Pair up every player in `pool` (length must be even; the allocation
/// planner only emits playing sets whose size is a multiple of 4).
///
/// Depth-first backtracking search: take the first unpaired player, try each
/// later unpaired player in pool order, skipping candidates this player has
/// partnered before, and accept the first complete pairing found. When no
/// zero-repeat pairing exists the search exhausts and the pool is paired
/// sequentially instead (0 with 1, 2 with 3, …), which may repeat
/// partnerships but is deterministic for a given pool order.
///
/// Always returns a complete pairing covering every id exactly once.
pub fn pair_players(pool: &[PlayerId], ledger: &PartnershipLedger) -> Vec<(PlayerId, PlayerId)> {
    let mut used = HashSet::with_capacity(pool.len());
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    if backtrack(pool, ledger, &mut used, &mut pairs) {
        return pairs;
    }

    log::debug!(
        "no repeat-free pairing exists for {} players; falling back to sequential pairing",
        pool.len()
    );
    pool.chunks_exact(2).map(|c| (c[0], c[1])).collect()
}

fn backtrack(
    pool: &[PlayerId],
    ledger: &PartnershipLedger,
    used: &mut HashSet<PlayerId>,
    pairs: &mut Vec<(PlayerId, PlayerId)>,
) -> bool {
    if used.len() == pool.len() {
        return true;
    }
    let available: Vec<PlayerId> = pool.iter().filter(|id| !used.contains(id)).copied().collect();
    if available.len() < 2 {
        return false;
    }

    let first = available[0];
    for &candidate in &available[1..] {
        if ledger.times_paired(first, candidate) > 0 {
            continue;
        }
        used.insert(first);
        used.insert(candidate);
        pairs.push((first, candidate));
        if backtrack(pool, ledger, used, pairs) {
            return true;
        }
        pairs.pop();
        used.remove(&first);
        used.remove(&candidate);
    }
    false
}
