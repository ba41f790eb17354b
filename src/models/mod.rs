//! Data structures for movie playoffs: movies, stages, playoff state, slot board.

mod movie;
mod playoff;
mod slots;
mod stage;

pub use movie::{Movie, MovieId, SearchHit};
pub use playoff::{MatchRecord, Matchup, Playoff, PlayoffError, PlayoffId, PlayoffState};
pub use slots::{SlotBoard, SlotError, INITIAL_SLOTS, MAX_SLOTS};
pub use stage::Stage;
