//! Per-browser-session state: the slot board and current playoff, kept in step with
//! the selection store.

use crate::logic::{resolve_matchup, start_playoff};
use crate::models::{MovieId, Playoff, PlayoffError, SlotBoard, SlotError};
use crate::selection::{SelectionStore, SelectionStoreError, SessionId};
use rand::Rng;
use std::time::Instant;

/// Errors from session-level operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    Slot(SlotError),
    Playoff(PlayoffError),
    Store(SelectionStoreError),
    /// No playoff has been started in this session.
    NoPlayoff,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Slot(e) => write!(f, "{}", e),
            SessionError::Playoff(e) => write!(f, "{}", e),
            SessionError::Store(e) => write!(f, "{}", e),
            SessionError::NoPlayoff => write!(f, "No playoffs"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SlotError> for SessionError {
    fn from(e: SlotError) -> Self {
        SessionError::Slot(e)
    }
}

impl From<PlayoffError> for SessionError {
    fn from(e: PlayoffError) -> Self {
        SessionError::Playoff(e)
    }
}

impl From<SelectionStoreError> for SessionError {
    fn from(e: SelectionStoreError) -> Self {
        SessionError::Store(e)
    }
}

/// Per-session entry: slot board, current playoff, last activity (for auto-cleanup).
#[derive(Clone, Debug)]
pub struct SessionEntry {
    pub board: SlotBoard,
    pub playoff: Option<Playoff>,
    pub last_activity: Instant,
}

impl Default for SessionEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEntry {
    pub fn new() -> Self {
        Self {
            board: SlotBoard::new(),
            playoff: None,
            last_activity: Instant::now(),
        }
    }

    /// Install `board` and mirror its picks into `store`. The board is only replaced
    /// once the store has accepted the picks.
    pub fn commit_board<S: SelectionStore + ?Sized>(
        &mut self,
        store: &S,
        session: SessionId,
        board: SlotBoard,
    ) -> Result<&SlotBoard, SessionError> {
        store.save(session, board.selected())?;
        self.board = board;
        Ok(&self.board)
    }

    /// Start a playoff from the saved picks, shuffled with `rng`. Replaces any
    /// unfinished run; on error the previous playoff is kept.
    pub fn begin_playoff<S: SelectionStore + ?Sized, R: Rng + ?Sized>(
        &mut self,
        store: &S,
        session: SessionId,
        rng: &mut R,
    ) -> Result<&Playoff, SessionError> {
        let picks = store.load(session)?;
        let mut playoff = Playoff::new();
        start_playoff(&mut playoff, &picks, rng)?;
        Ok(&*self.playoff.insert(playoff))
    }

    /// Resolve the current matchup. The decision that produces the champion clears the
    /// saved picks and resets the board; a rejected decision changes nothing.
    pub fn decide_winner<S: SelectionStore + ?Sized>(
        &mut self,
        store: &S,
        session: SessionId,
        winner_id: &MovieId,
    ) -> Result<&Playoff, SessionError> {
        let playoff = self.playoff.as_mut().ok_or(SessionError::NoPlayoff)?;
        resolve_matchup(playoff, winner_id)?;
        if playoff.is_complete() {
            // The decision already stands; a store failure only leaves stale picks behind.
            if let Err(e) = store.clear(session) {
                log::error!("Session {}: could not clear picks: {}", session, e);
            }
            self.board = SlotBoard::new();
        }
        Ok(&*playoff)
    }
}
