//! Ordering of title-search results.

use crate::models::SearchHit;
use std::cmp::Reverse;

/// Results kept after ranking.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Rank hits for `query`: exact title first, then titles starting with the query, then
/// newest first. Title checks ignore case. Ties keep catalog order. Keeps the top 5.
pub fn rank_search_hits(mut hits: Vec<SearchHit>, query: &str) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    hits.sort_by_key(|hit| {
        let title = hit.title.to_lowercase();
        let tier = if title == query {
            0
        } else if title.starts_with(&query) {
            1
        } else {
            2
        };
        let year = hit.year_number();
        // Missing years sort after every real year.
        (tier, year.is_none(), Reverse(year))
    });
    hits.truncate(MAX_SEARCH_RESULTS);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieId;

    fn hit(id: &str, title: &str, year: &str) -> SearchHit {
        SearchHit {
            id: MovieId::from(id),
            title: title.into(),
            year: year.into(),
            poster_url: None,
        }
    }

    fn ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn exact_then_prefix_then_year() {
        let hits = vec![
            hit("old", "The Alien Years", "1990"),
            hit("new", "Planet of Aliens", "2020"),
            hit("prefix", "Alien: Covenant", "2017"),
            hit("exact", "ALIEN", "1979"),
        ];
        let ranked = rank_search_hits(hits, "alien");
        assert_eq!(ids(&ranked), vec!["exact", "prefix", "new", "old"]);
    }

    #[test]
    fn keeps_top_five() {
        let hits = (0..10)
            .map(|i| hit(&format!("tt{i}"), &format!("Movie {i}"), &format!("{}", 2000 + i)))
            .collect();
        let ranked = rank_search_hits(hits, "zzz");
        assert_eq!(ranked.len(), MAX_SEARCH_RESULTS);
        assert_eq!(ranked[0].id.as_str(), "tt9");
    }

    #[test]
    fn unparseable_year_sorts_last() {
        let hits = vec![hit("na", "B", "N/A"), hit("y", "C", "1950")];
        let ranked = rank_search_hits(hits, "x");
        assert_eq!(ids(&ranked), vec!["y", "na"]);
    }

    #[test]
    fn largest_possible_year_ranks_first() {
        let hits = vec![
            hit("old", "A", "1999"),
            hit("max", "B", "4294967295"),
            hit("na", "C", "N/A"),
        ];
        let ranked = rank_search_hits(hits, "zzz");
        assert_eq!(ids(&ranked), vec!["max", "old", "na"]);
    }
}
