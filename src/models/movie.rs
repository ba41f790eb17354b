//! Movie and SearchHit data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Catalog identifier for a movie (an IMDb id such as `tt0078748`).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A movie picked for the playoffs. Never mutated once built; two movies are the
/// same movie when their ids match, whatever the other fields say.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
    /// Raw runtime as the catalog reports it, e.g. "142 min".
    pub runtime: Option<String>,
    pub runtime_minutes: Option<u32>,
}

impl Movie {
    /// Movie with only the search-level fields known.
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
            year: year.into(),
            poster_url: None,
            plot: None,
            runtime: None,
            runtime_minutes: None,
        }
    }

    pub fn with_poster(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    /// Set the raw runtime and the minutes parsed from it.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        let runtime = runtime.into();
        self.runtime_minutes = crate::logic::parse_runtime_minutes(&runtime);
        self.runtime = Some(runtime);
        self
    }

    /// Runtime formatted for display ("2h 22m"), if known.
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.as_deref().map(crate::logic::format_runtime)
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One row of a title search: enough to show in a picker, not a full record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

impl SearchHit {
    /// Year as a number: the leading digits of `year` ("2001–2003" is 2001).
    pub fn year_number(&self) -> Option<u32> {
        let digits: String = self.year.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_everything_but_id() {
        let a = Movie::new("tt0078748", "Alien", "1979");
        let b = Movie::new("tt0078748", "Alien (Director's Cut)", "2003").with_plot("In space...");
        assert_eq!(a, b);
        assert_ne!(a, Movie::new("tt0090605", "Aliens", "1986"));
    }

    #[test]
    fn with_runtime_parses_minutes() {
        let m = Movie::new("tt1", "X", "2000").with_runtime("142 min");
        assert_eq!(m.runtime_minutes, Some(142));
        assert_eq!(m.runtime_label().as_deref(), Some("2h 22m"));
    }

    #[test]
    fn year_number_takes_leading_digits() {
        let hit = SearchHit {
            id: MovieId::from("tt1"),
            title: "Series".into(),
            year: "2001–2003".into(),
            poster_url: None,
        };
        assert_eq!(hit.year_number(), Some(2001));
    }
}
