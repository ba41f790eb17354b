//! Playoff and PlayoffState.

use crate::models::movie::{Movie, MovieId};
use crate::models::stage::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during playoff operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayoffError {
    /// Fewer than 2 movies were supplied for seeding.
    InsufficientItems { count: usize },
    /// The same movie id was supplied twice for seeding.
    DuplicateMovie(MovieId),
    /// The winner is not one of the two movies in the current matchup.
    InvalidWinner(MovieId),
    /// The playoff has not been seeded yet.
    NotStarted,
    /// The playoff was already seeded.
    AlreadyStarted,
    /// The playoff has a champion; no more matchups to resolve.
    AlreadyComplete,
}

impl std::fmt::Display for PlayoffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayoffError::InsufficientItems { count } => {
                write!(f, "Cannot start: need at least 2 movies (have {})", count)
            }
            PlayoffError::DuplicateMovie(id) => write!(f, "Movie {} was picked more than once", id),
            PlayoffError::InvalidWinner(id) => {
                write!(f, "Movie {} is not part of the current matchup", id)
            }
            PlayoffError::NotStarted => write!(f, "Playoffs have not started"),
            PlayoffError::AlreadyStarted => write!(f, "Playoffs have already started"),
            PlayoffError::AlreadyComplete => write!(f, "Playoffs are already over"),
        }
    }
}

impl std::error::Error for PlayoffError {}

/// Unique identifier for a playoff run.
pub type PlayoffId = Uuid;

/// Lifecycle of a playoff.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffState {
    /// Created, not yet seeded.
    #[default]
    NotStarted,
    /// Two or more movies left; a matchup is waiting for a decision.
    InProgress,
    /// One movie left: the champion.
    Complete,
}

/// The two movies currently facing each other: always the first two of the pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub first: Movie,
    pub second: Movie,
}

impl Matchup {
    pub fn contains(&self, id: &MovieId) -> bool {
        self.first.id == *id || self.second.id == *id
    }

    /// Split into (winner, loser) for `winner_id`; `None` if it is in neither slot.
    pub fn split(&self, winner_id: &MovieId) -> Option<(&Movie, &Movie)> {
        if self.first.id == *winner_id {
            Some((&self.first, &self.second))
        } else if self.second.id == *winner_id {
            Some((&self.second, &self.first))
        } else {
            None
        }
    }
}

/// One resolved matchup, kept for the results screen and CSV export.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based position of this matchup in the run.
    pub number: usize,
    pub stage: Stage,
    pub winner_id: MovieId,
    pub winner_title: String,
    pub loser_id: MovieId,
    pub loser_title: String,
    pub decided_at: DateTime<Utc>,
}

/// Full playoff state: remaining pool, current matchup, stage, history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Playoff {
    pub id: PlayoffId,
    pub state: PlayoffState,
    /// Movies not yet eliminated. Front two play next; winners go to the back.
    pub pool: Vec<Movie>,
    pub current_matchup: Option<Matchup>,
    /// Recomputed after every transition; `None` unless in progress.
    pub stage: Option<Stage>,
    pub history: Vec<MatchRecord>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for Playoff {
    fn default() -> Self {
        Self::new()
    }
}

impl Playoff {
    /// Create a new playoff in NotStarted state with an empty pool.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: PlayoffState::NotStarted,
            pool: Vec::new(),
            current_matchup: None,
            stage: None,
            history: Vec::new(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn pool(&self) -> &[Movie] {
        &self.pool
    }

    pub fn current_matchup(&self) -> Option<&Matchup> {
        self.current_matchup.as_ref()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlayoffState::Complete
    }

    /// The last movie standing, once complete.
    pub fn champion(&self) -> Option<&Movie> {
        if self.is_complete() {
            self.pool.first()
        } else {
            None
        }
    }

    /// Matchups still to be played before a champion is known.
    pub fn remaining_matchups(&self) -> usize {
        match self.state {
            PlayoffState::InProgress => self.pool.len() - 1,
            _ => 0,
        }
    }

    /// Point the matchup and stage at the current front of the pool.
    pub(crate) fn refresh_matchup(&mut self) {
        if self.pool.len() >= 2 {
            self.current_matchup = Some(Matchup {
                first: self.pool[0].clone(),
                second: self.pool[1].clone(),
            });
            self.stage = Some(Stage::for_pool_size(self.pool.len()));
        } else {
            self.current_matchup = None;
            self.stage = None;
        }
    }
}
