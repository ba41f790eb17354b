//! Slot board edits. Every edit returns a new board; the input is never mutated.

use crate::models::{Movie, SlotBoard, SlotError, MAX_SLOTS};

/// Slot count after `expansions` expansions: 2, 4, 8, 16, ...
pub fn slot_count(expansions: u32) -> Option<usize> {
    1usize.checked_shl(expansions.checked_add(1)?)
}

/// Grow `slots` to `slot_count(expansions)`, keeping existing slots and appending empty ones.
///
/// `expansions` is the count after this expansion. A target smaller than the current
/// length, or one that does not fit in a usize, leaves the slots as they are.
pub fn expand_slots(slots: &[Option<Movie>], expansions: u32) -> Vec<Option<Movie>> {
    let mut out = slots.to_vec();
    if let Some(target) = slot_count(expansions) {
        if target > out.len() {
            out.resize(target, None);
        }
    }
    out
}

impl SlotBoard {
    /// The board after one more "add more slots".
    pub fn expanded(&self) -> Result<SlotBoard, SlotError> {
        let expansions = self.expansions + 1;
        match slot_count(expansions) {
            Some(n) if n <= MAX_SLOTS => Ok(SlotBoard {
                slots: expand_slots(&self.slots, expansions),
                expansions,
            }),
            _ => Err(SlotError::TooManySlots),
        }
    }

    /// The board with `movie` placed in slot `index` (replacing whatever was there).
    pub fn with_movie(&self, index: usize, movie: Movie) -> Result<SlotBoard, SlotError> {
        self.check_index(index)?;
        let taken_elsewhere = self
            .slots
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.as_ref().is_some_and(|m| m.id == movie.id));
        if taken_elsewhere {
            return Err(SlotError::DuplicateMovie(movie.id));
        }
        let mut slots = self.slots.clone();
        slots[index] = Some(movie);
        Ok(SlotBoard {
            slots,
            expansions: self.expansions,
        })
    }

    /// The board with slot `index` emptied.
    pub fn without_movie(&self, index: usize) -> Result<SlotBoard, SlotError> {
        self.check_index(index)?;
        let mut slots = self.slots.clone();
        slots[index] = None;
        Ok(SlotBoard {
            slots,
            expansions: self.expansions,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), SlotError> {
        if index >= self.slots.len() {
            return Err(SlotError::OutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(())
    }
}
