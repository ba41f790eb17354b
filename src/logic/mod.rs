//! Playoff business logic: seeding, matchup resolution, slots, formatting, export.

mod export;
mod playoff;
mod runtime;
mod seeding;
mod slots;

pub use export::history_csv;
pub use playoff::resolve_matchup;
pub use runtime::{format_runtime, parse_runtime_minutes};
pub use seeding::{seed_playoff, shuffle_items, start_playoff};
pub use slots::{expand_slots, slot_count};
