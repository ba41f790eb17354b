//! Seeding: shuffle the picks and put the playoff in progress.

use crate::models::{Movie, Playoff, PlayoffError, PlayoffState};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

/// Uniformly random permutation of `items` (Fisher–Yates), returned as a new vector.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniform index in `0..=i`.
/// The input slice is left as it was.
pub fn shuffle_items<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Seed the playoff with `movies` in the order given (no shuffle).
///
/// Requires at least 2 movies with distinct ids. On success the playoff is InProgress
/// with the first two movies as the matchup.
pub fn seed_playoff(playoff: &mut Playoff, movies: Vec<Movie>) -> Result<(), PlayoffError> {
    if playoff.state != PlayoffState::NotStarted {
        return Err(PlayoffError::AlreadyStarted);
    }
    if movies.len() < 2 {
        return Err(PlayoffError::InsufficientItems {
            count: movies.len(),
        });
    }
    let mut seen = HashSet::new();
    for m in &movies {
        if !seen.insert(&m.id) {
            return Err(PlayoffError::DuplicateMovie(m.id.clone()));
        }
    }

    playoff.pool = movies;
    playoff.state = PlayoffState::InProgress;
    playoff.started_at = Some(Utc::now());
    playoff.refresh_matchup();
    log::info!(
        "Playoff {} started with {} movies ({})",
        playoff.id,
        playoff.pool.len(),
        playoff.stage.map(|s| s.label()).unwrap_or("-")
    );
    Ok(())
}

/// Shuffle `movies` with `rng`, then seed the playoff with that order.
pub fn start_playoff<R: Rng + ?Sized>(
    playoff: &mut Playoff,
    movies: &[Movie],
    rng: &mut R,
) -> Result<(), PlayoffError> {
    if movies.len() < 2 {
        return Err(PlayoffError::InsufficientItems {
            count: movies.len(),
        });
    }
    seed_playoff(playoff, shuffle_items(movies, rng))
}
