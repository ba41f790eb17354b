//! Movie playoffs web app: library with models and business logic.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod logic;
pub mod models;
pub mod selection;
pub mod session;

pub use catalog::{CatalogError, OmdbClient};
pub use config::AppConfig;
pub use debounce::{SearchDebouncer, Settled};
pub use logic::{
    expand_slots, format_runtime, history_csv, parse_runtime_minutes, resolve_matchup,
    seed_playoff, shuffle_items, slot_count, start_playoff,
};
pub use models::{
    MatchRecord, Matchup, Movie, MovieId, Playoff, PlayoffError, PlayoffId, PlayoffState,
    SearchHit, SlotBoard, SlotError, Stage,
};
pub use selection::{InMemorySelectionStore, SelectionStore, SelectionStoreError, SessionId};
pub use session::{SessionEntry, SessionError};
