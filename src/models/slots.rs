//! SlotBoard: the selection screen's list of movie slots.

use crate::models::movie::{Movie, MovieId};
use serde::{Deserialize, Serialize};

/// Slots on a fresh board.
pub const INITIAL_SLOTS: usize = 2;

/// Largest board an expansion may produce.
pub const MAX_SLOTS: usize = 64;

/// Errors that can occur while editing the slot board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SlotError {
    /// No slot at this index.
    OutOfRange { index: usize, len: usize },
    /// The movie already sits in another slot.
    DuplicateMovie(MovieId),
    /// Another expansion would exceed MAX_SLOTS.
    TooManySlots,
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotError::OutOfRange { index, len } => {
                write!(f, "Slot {} does not exist (board has {} slots)", index + 1, len)
            }
            SlotError::DuplicateMovie(id) => write!(f, "Movie {} is already picked", id),
            SlotError::TooManySlots => write!(f, "Cannot add more than {} slots", MAX_SLOTS),
        }
    }
}

impl std::error::Error for SlotError {}

/// Slots the user fills with movies before starting the playoffs.
///
/// Edits return a new board (see `logic::slots`); a board handed to another
/// component is never changed underneath it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotBoard {
    pub slots: Vec<Option<Movie>>,
    /// How many times "add more slots" has been applied.
    pub expansions: u32,
}

impl Default for SlotBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBoard {
    pub fn new() -> Self {
        Self {
            slots: vec![None; INITIAL_SLOTS],
            expansions: 0,
        }
    }

    /// Filled slots' movies, in slot order.
    pub fn selected(&self) -> Vec<Movie> {
        self.slots.iter().flatten().cloned().collect()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// The playoffs need at least two picks.
    pub fn can_start(&self) -> bool {
        self.filled() >= 2
    }
}
