//! Integration tests for session state: picks mirrored into the selection store on every
//! board change and cleared once, when the playoff produces its champion.

use movie_playoffs_web::{
    InMemorySelectionStore, Movie, MovieId, PlayoffError, SelectionStore, SelectionStoreError,
    SessionEntry, SessionError, SessionId, SlotBoard,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use uuid::Uuid;

/// In-memory store that counts `clear` calls.
#[derive(Default)]
struct CountingStore {
    inner: InMemorySelectionStore,
    clears: Cell<usize>,
}

impl SelectionStore for CountingStore {
    fn save(&self, session: SessionId, movies: Vec<Movie>) -> Result<(), SelectionStoreError> {
        self.inner.save(session, movies)
    }

    fn load(&self, session: SessionId) -> Result<Vec<Movie>, SelectionStoreError> {
        self.inner.load(session)
    }

    fn clear(&self, session: SessionId) -> Result<(), SelectionStoreError> {
        self.clears.set(self.clears.get() + 1);
        self.inner.clear(session)
    }
}

/// Store whose every call fails.
struct BrokenStore;

impl SelectionStore for BrokenStore {
    fn save(&self, _: SessionId, _: Vec<Movie>) -> Result<(), SelectionStoreError> {
        Err(SelectionStoreError::Poisoned)
    }

    fn load(&self, _: SessionId) -> Result<Vec<Movie>, SelectionStoreError> {
        Err(SelectionStoreError::Poisoned)
    }

    fn clear(&self, _: SessionId) -> Result<(), SelectionStoreError> {
        Err(SelectionStoreError::Poisoned)
    }
}

fn movie(id: &str) -> Movie {
    Movie::new(id, format!("Title {id}"), "2001")
}

fn pick(entry: &mut SessionEntry, store: &CountingStore, sid: SessionId, index: usize, id: &str) {
    let board = entry.board.with_movie(index, movie(id)).unwrap();
    entry.commit_board(store, sid, board).unwrap();
}

fn stored_ids(store: &CountingStore, sid: SessionId) -> Vec<String> {
    store
        .load(sid)
        .unwrap()
        .iter()
        .map(|m| m.id.to_string())
        .collect()
}

#[test]
fn every_board_change_is_saved() {
    let store = CountingStore::default();
    let sid = Uuid::new_v4();
    let mut entry = SessionEntry::new();

    pick(&mut entry, &store, sid, 0, "a");
    assert_eq!(stored_ids(&store, sid), vec!["a"]);
    pick(&mut entry, &store, sid, 1, "b");
    assert_eq!(stored_ids(&store, sid), vec!["a", "b"]);

    let board = entry.board.expanded().unwrap();
    entry.commit_board(&store, sid, board).unwrap();
    assert_eq!(entry.board.slots.len(), 4);
    assert_eq!(stored_ids(&store, sid), vec!["a", "b"]);

    let board = entry.board.without_movie(0).unwrap();
    entry.commit_board(&store, sid, board).unwrap();
    assert_eq!(stored_ids(&store, sid), vec!["b"]);
    assert_eq!(store.clears.get(), 0);
}

#[test]
fn picks_are_cleared_exactly_once_on_completion() {
    let store = CountingStore::default();
    let sid = Uuid::new_v4();
    let mut entry = SessionEntry::new();
    let board = entry.board.expanded().unwrap();
    entry.commit_board(&store, sid, board).unwrap();
    pick(&mut entry, &store, sid, 0, "a");
    pick(&mut entry, &store, sid, 1, "b");
    pick(&mut entry, &store, sid, 2, "c");

    entry
        .begin_playoff(&store, sid, &mut StdRng::seed_from_u64(5))
        .unwrap();

    let mut decisions = 0;
    loop {
        let first = entry
            .playoff
            .as_ref()
            .and_then(|p| p.current_matchup())
            .map(|m| m.first.id.clone())
            .unwrap();
        let playoff = entry.decide_winner(&store, sid, &first).unwrap();
        decisions += 1;
        if playoff.is_complete() {
            break;
        }
        // Still running: picks and board untouched.
        assert_eq!(store.clears.get(), 0);
        assert_eq!(stored_ids(&store, sid).len(), 3);
        assert_eq!(entry.board.filled(), 3);
    }
    assert_eq!(decisions, 2);
    assert_eq!(store.clears.get(), 1);
    assert!(store.load(sid).unwrap().is_empty());
    assert_eq!(entry.board, SlotBoard::new());

    let champion = entry.playoff.as_ref().and_then(|p| p.champion()).unwrap().id.clone();
    assert_eq!(
        entry.decide_winner(&store, sid, &champion).unwrap_err(),
        SessionError::Playoff(PlayoffError::AlreadyComplete)
    );
    assert_eq!(store.clears.get(), 1);
}

#[test]
fn rejected_winner_keeps_picks() {
    let store = CountingStore::default();
    let sid = Uuid::new_v4();
    let mut entry = SessionEntry::new();
    pick(&mut entry, &store, sid, 0, "a");
    pick(&mut entry, &store, sid, 1, "b");
    entry
        .begin_playoff(&store, sid, &mut StdRng::seed_from_u64(1))
        .unwrap();

    let err = entry
        .decide_winner(&store, sid, &MovieId::from("zzz"))
        .unwrap_err();
    assert_eq!(err, SessionError::Playoff(PlayoffError::InvalidWinner(MovieId::from("zzz"))));
    assert_eq!(store.clears.get(), 0);
    assert_eq!(stored_ids(&store, sid), vec!["a", "b"]);
    assert!(!entry.playoff.as_ref().unwrap().is_complete());
}

#[test]
fn cannot_start_with_one_pick() {
    let store = CountingStore::default();
    let sid = Uuid::new_v4();
    let mut entry = SessionEntry::new();
    pick(&mut entry, &store, sid, 0, "a");

    let err = entry
        .begin_playoff(&store, sid, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert_eq!(err, SessionError::Playoff(PlayoffError::InsufficientItems { count: 1 }));
    assert!(entry.playoff.is_none());
}

#[test]
fn deciding_without_a_playoff() {
    let store = CountingStore::default();
    let mut entry = SessionEntry::new();
    assert_eq!(
        entry
            .decide_winner(&store, Uuid::new_v4(), &MovieId::from("a"))
            .unwrap_err(),
        SessionError::NoPlayoff
    );
    assert_eq!(store.clears.get(), 0);
}

#[test]
fn failed_save_keeps_the_old_board() {
    let sid = Uuid::new_v4();
    let mut entry = SessionEntry::new();
    let board = entry.board.with_movie(0, movie("a")).unwrap();
    assert_eq!(
        entry.commit_board(&BrokenStore, sid, board).unwrap_err(),
        SessionError::Store(SelectionStoreError::Poisoned)
    );
    assert_eq!(entry.board, SlotBoard::new());
}
