//! Stage label shown above the current matchup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse progress band derived from how many movies are still in the pool.
///
/// The bands are fixed and do not track real round numbers: a pool of 7 is
/// "Quarter-finals" just like a pool of 8.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Round of 16")]
    RoundOf16,
    #[serde(rename = "Quarter-finals")]
    QuarterFinals,
    #[serde(rename = "Semi-finals")]
    SemiFinals,
    #[serde(rename = "Final")]
    Final,
}

impl Stage {
    /// Band for a pool of `remaining` movies.
    pub fn for_pool_size(remaining: usize) -> Self {
        match remaining {
            n if n > 8 => Stage::RoundOf16,
            n if n > 4 => Stage::QuarterFinals,
            n if n > 2 => Stage::SemiFinals,
            _ => Stage::Final,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::RoundOf16 => "Round of 16",
            Stage::QuarterFinals => "Quarter-finals",
            Stage::SemiFinals => "Semi-finals",
            Stage::Final => "Final",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(Stage::for_pool_size(64), Stage::RoundOf16);
        assert_eq!(Stage::for_pool_size(9), Stage::RoundOf16);
        assert_eq!(Stage::for_pool_size(8), Stage::QuarterFinals);
        assert_eq!(Stage::for_pool_size(5), Stage::QuarterFinals);
        assert_eq!(Stage::for_pool_size(4), Stage::SemiFinals);
        assert_eq!(Stage::for_pool_size(3), Stage::SemiFinals);
        assert_eq!(Stage::for_pool_size(2), Stage::Final);
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(serde_json::to_string(&Stage::QuarterFinals).unwrap(), "\"Quarter-finals\"");
        assert_eq!(Stage::RoundOf16.to_string(), "Round of 16");
    }
}
