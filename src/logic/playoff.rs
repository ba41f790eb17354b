//! Matchup resolution: the only transition that moves a playoff forward.

use crate::models::{MatchRecord, MovieId, Playoff, PlayoffError, PlayoffState, Stage};
use chrono::Utc;

/// Declare `winner_id` the winner of the current matchup.
///
/// Both matchup movies leave the pool (matched by id) and the winner is appended to
/// the back, so the pool shrinks by exactly one. With one movie left the playoff is
/// Complete; otherwise the next matchup is the new front two.
///
/// Fails without touching the playoff if it is not in progress or if `winner_id` is
/// not one of the two movies in the matchup.
pub fn resolve_matchup(playoff: &mut Playoff, winner_id: &MovieId) -> Result<(), PlayoffError> {
    match playoff.state {
        PlayoffState::NotStarted => return Err(PlayoffError::NotStarted),
        PlayoffState::Complete => return Err(PlayoffError::AlreadyComplete),
        PlayoffState::InProgress => {}
    }
    let matchup = playoff
        .current_matchup
        .as_ref()
        .ok_or(PlayoffError::NotStarted)?;
    let (winner, loser) = matchup
        .split(winner_id)
        .ok_or_else(|| PlayoffError::InvalidWinner(winner_id.clone()))?;
    let (winner, loser) = (winner.clone(), loser.clone());

    let record = MatchRecord {
        number: playoff.history.len() + 1,
        stage: playoff
            .stage
            .unwrap_or_else(|| Stage::for_pool_size(playoff.pool.len())),
        winner_id: winner.id.clone(),
        winner_title: winner.title.clone(),
        loser_id: loser.id.clone(),
        loser_title: loser.title.clone(),
        decided_at: Utc::now(),
    };

    playoff
        .pool
        .retain(|m| m.id != winner.id && m.id != loser.id);
    playoff.pool.push(winner);
    playoff.history.push(record);

    if playoff.pool.len() == 1 {
        playoff.state = PlayoffState::Complete;
        playoff.completed_at = Some(Utc::now());
        playoff.refresh_matchup();
        log::info!(
            "Playoff {} complete after {} matchups, champion: {}",
            playoff.id,
            playoff.history.len(),
            playoff.pool[0].title
        );
    } else {
        playoff.refresh_matchup();
        log::debug!(
            "Playoff {}: {} beat {}, {} left",
            playoff.id,
            winner_id,
            loser.id,
            playoff.pool.len()
        );
    }
    Ok(())
}
