//! Scoring engine: result validation, point accrual, edits, standings.

use crate::models::{GameId, GameScore, PlayerId, Standing, Tournament, TournamentError};

/// Most games a team can win in one match.
pub const MAX_GAME_SCORE: u8 = 7;

/// Record or edit a game result and settle player points.
///
/// Each member of a team gains points equal to their team's raw score (a
/// 6-3 result is worth 6 points to each winner and 3 to each loser). When a
/// result is edited, the previously applied deltas are subtracted before the
/// new ones are applied, so totals always reflect exactly one application of
/// each recorded result no matter how often it is edited.
///
/// Rejections (nothing is mutated): scores above [`MAX_GAME_SCORE`], tied
/// scores, unknown round or game ids, and re-reporting a scored game without
/// the edit flag.
pub fn report_score(
    tournament: &mut Tournament,
    round_number: u32,
    game_id: GameId,
    score: GameScore,
    is_edit: bool,
) -> Result<(), TournamentError> {
    if score.team_1 > MAX_GAME_SCORE || score.team_2 > MAX_GAME_SCORE {
        return Err(TournamentError::ScoreOutOfRange {
            team_1: score.team_1,
            team_2: score.team_2,
        });
    }
    if score.team_1 == score.team_2 {
        return Err(TournamentError::TiedScore);
    }

    // Copy out the membership and old result so the rounds borrow ends
    // before player points are touched.
    let round = tournament
        .round(round_number)
        .ok_or(TournamentError::RoundNotFound(round_number))?;
    let game = round
        .games
        .iter()
        .find(|g| g.id == game_id)
        .ok_or(TournamentError::GameNotFound(game_id))?;
    if !is_edit && game.score.is_some() {
        return Err(TournamentError::AlreadyScored(game_id));
    }
    let team_1 = game.team_1.players;
    let team_2 = game.team_2.players;
    let old_score = game.score;

    // All four members must exist before any of them is mutated.
    for id in team_1.iter().chain(team_2.iter()) {
        if tournament.player(*id).is_none() {
            return Err(TournamentError::PlayerNotFound(*id));
        }
    }

    if let Some(old) = old_score {
        subtract_points(tournament, &team_1, old.team_1);
        subtract_points(tournament, &team_2, old.team_2);
    }
    add_points(tournament, &team_1, score.team_1);
    add_points(tournament, &team_2, score.team_2);

    if let Some(g) = tournament
        .rounds
        .iter_mut()
        .find(|r| r.number == round_number)
        .and_then(|r| r.games.iter_mut().find(|g| g.id == game_id))
    {
        g.score = Some(score);
    }
    Ok(())
}

fn add_points(tournament: &mut Tournament, members: &[PlayerId; 2], amount: u8) {
    for &id in members {
        if let Some(p) = tournament.player_mut(id) {
            p.points += u32::from(amount);
        }
    }
}

fn subtract_points(tournament: &mut Tournament, members: &[PlayerId; 2], amount: u8) {
    for &id in members {
        if let Some(p) = tournament.player_mut(id) {
            p.points -= u32::from(amount);
        }
    }
}

/// Current standings: one row per player, points descending. The sort is
/// stable, so players on equal points keep their creation order.
pub fn standings(tournament: &Tournament) -> Vec<Standing> {
    let mut rows: Vec<Standing> = tournament
        .players
        .iter()
        .map(|p| Standing {
            player_id: p.id,
            name: p.name.clone(),
            points: p.points,
            matches_played: matches_played(tournament, p.id),
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Games with a recorded score, across all rounds, in which the player took part.
fn matches_played(tournament: &Tournament, id: PlayerId) -> u32 {
    tournament
        .rounds
        .iter()
        .flat_map(|r| r.games.iter())
        .filter(|g| g.score.is_some() && g.involves(id))
        .count() as u32
}
