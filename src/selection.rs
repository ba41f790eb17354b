//! Selection store: the user's picks, carried from the selection screen to the playoffs.

use crate::models::Movie;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Identifies one browser session.
pub type SessionId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectionStoreError {
    /// The store's lock was poisoned by a panic elsewhere.
    Poisoned,
}

impl std::fmt::Display for SelectionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionStoreError::Poisoned => write!(f, "selection store lock error"),
        }
    }
}

impl std::error::Error for SelectionStoreError {}

/// Where picks live between the selection screen and the playoffs.
pub trait SelectionStore {
    /// Replace the session's picks.
    fn save(&self, session: SessionId, movies: Vec<Movie>) -> Result<(), SelectionStoreError>;
    /// The session's picks; empty if none were saved.
    fn load(&self, session: SessionId) -> Result<Vec<Movie>, SelectionStoreError>;
    /// Forget the session's picks.
    fn clear(&self, session: SessionId) -> Result<(), SelectionStoreError>;
}

/// Process-local store, one entry per session.
#[derive(Debug, Default)]
pub struct InMemorySelectionStore {
    picks: RwLock<HashMap<SessionId, Vec<Movie>>>,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions with saved picks.
    pub fn len(&self) -> usize {
        self.picks.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SelectionStore for InMemorySelectionStore {
    fn save(&self, session: SessionId, movies: Vec<Movie>) -> Result<(), SelectionStoreError> {
        let mut g = self.picks.write().map_err(|_| SelectionStoreError::Poisoned)?;
        g.insert(session, movies);
        Ok(())
    }

    fn load(&self, session: SessionId) -> Result<Vec<Movie>, SelectionStoreError> {
        let g = self.picks.read().map_err(|_| SelectionStoreError::Poisoned)?;
        Ok(g.get(&session).cloned().unwrap_or_default())
    }

    fn clear(&self, session: SessionId) -> Result<(), SelectionStoreError> {
        let mut g = self.picks.write().map_err(|_| SelectionStoreError::Poisoned)?;
        g.remove(&session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear_per_session() {
        let store = InMemorySelectionStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store
            .save(a, vec![Movie::new("tt1", "One", "2001"), Movie::new("tt2", "Two", "2002")])
            .unwrap();
        store.save(b, vec![Movie::new("tt3", "Three", "2003")]).unwrap();

        assert_eq!(store.load(a).unwrap().len(), 2);
        store.clear(a).unwrap();
        assert!(store.load(a).unwrap().is_empty());
        assert_eq!(store.load(b).unwrap().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_replaces_previous_picks() {
        let store = InMemorySelectionStore::new();
        let s = Uuid::new_v4();
        store.save(s, vec![Movie::new("tt1", "One", "2001")]).unwrap();
        store.save(s, vec![Movie::new("tt2", "Two", "2002")]).unwrap();
        let picks = store.load(s).unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id.as_str(), "tt2");
    }
}
