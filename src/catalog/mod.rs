//! Movie catalog: OMDb lookups and search-result ranking.

mod omdb;
mod ranking;

pub use omdb::{
    CatalogError, CatalogResult, OmdbClient, MIN_QUERY_LEN, OMDB_DEFAULT_BASE_URL,
};
pub use ranking::{rank_search_hits, MAX_SEARCH_RESULTS};
