use crate::catalog::ranking::rank_search_hits;
use crate::models::{Movie, MovieId, SearchHit};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub type CatalogResult<T> = Result<T, CatalogError>;

pub const OMDB_DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// Queries shorter than this are answered with no results and no request.
pub const MIN_QUERY_LEN: usize = 3;

/// OMDb's marker for an absent field.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug)]
pub enum CatalogError {
    /// No API key configured.
    NotConfigured,
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotConfigured => write!(f, "OMDb API key is not configured"),
            CatalogError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            CatalogError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            CatalogError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            CatalogError::NotFound(msg) => write!(f, "Not found: {msg}"),
            CatalogError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchEntry>,
    #[serde(default)]
    response: String,
    error: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
struct SearchEntry {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Deserialize, Default, Debug)]
struct DetailResponse {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn available(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

impl From<SearchEntry> for SearchHit {
    fn from(e: SearchEntry) -> Self {
        SearchHit {
            id: MovieId(e.imdb_id),
            title: e.title,
            year: e.year,
            poster_url: available(e.poster),
        }
    }
}

impl From<DetailResponse> for Movie {
    fn from(d: DetailResponse) -> Self {
        let mut movie = Movie::new(d.imdb_id, d.title, d.year);
        movie.poster_url = available(d.poster);
        movie.plot = available(d.plot);
        if let Some(runtime) = available(d.runtime) {
            movie = movie.with_runtime(runtime);
        }
        movie
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// OMDb client: title search and full-record lookup.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("movie-playoffs/0.1")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Movies whose title matches `query`, ranked and cut to the top 5.
    pub async fn search_by_title(&self, query: &str) -> CatalogResult<Vec<SearchHit>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let url = self.url(&[("s", query), ("type", "movie")])?;
        let raw: SearchResponse = self.get(url).await?;
        if !raw.response.eq_ignore_ascii_case("true") {
            log::debug!(
                "OMDb search for {:?} returned nothing: {}",
                query,
                raw.error.as_deref().unwrap_or("no reason given")
            );
            return Ok(Vec::new());
        }
        let hits = raw.search.into_iter().map(SearchHit::from).collect();
        Ok(rank_search_hits(hits, query))
    }

    /// Full record for one movie, including plot and runtime.
    pub async fn fetch_detail(&self, id: &MovieId) -> CatalogResult<Movie> {
        let url = self.url(&[("i", id.as_str()), ("plot", "short")])?;
        let raw: DetailResponse = self.get(url).await?;
        if !raw.response.eq_ignore_ascii_case("true") {
            return Err(CatalogError::NotFound(
                raw.error.unwrap_or_else(|| format!("no movie with id {id}")),
            ));
        }
        Ok(Movie::from(raw))
    }

    /// Search that never fails: errors are logged and become an empty list.
    pub async fn search_or_empty(&self, query: &str) -> Vec<SearchHit> {
        match self.search_by_title(query).await {
            Ok(hits) => hits,
            Err(e) => {
                log::warn!("Movie search for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Detail lookup that never fails: errors are logged and become `None`.
    pub async fn detail_or_none(&self, id: &MovieId) -> Option<Movie> {
        match self.fetch_detail(id).await {
            Ok(movie) => Some(movie),
            Err(e) => {
                log::warn!("Movie lookup for {} failed: {}", id, e);
                None
            }
        }
    }

    fn url(&self, params: &[(&str, &str)]) -> CatalogResult<Url> {
        if self.api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured);
        }
        let mut all = vec![("apikey", self.api_key.as_str()), ("r", "json")];
        all.extend_from_slice(params);
        Url::parse_with_params(&format!("{}/", self.base_url), &all)
            .map_err(|e| CatalogError::Other(format!("bad catalog url {}: {e}", self.base_url)))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
        let shown = url.path().to_string();
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e, shown.clone()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| CatalogError::Parsing(e, shown)),
            Err(e) => Err(CatalogError::Api(e, shown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_maps_not_available_to_none() {
        let raw: DetailResponse = serde_json::from_str(
            r#"{"Title":"Alien","Year":"1979","Runtime":"N/A","Plot":"N/A",
                "Poster":"N/A","imdbID":"tt0078748","Response":"True"}"#,
        )
        .unwrap();
        let movie = Movie::from(raw);
        assert_eq!(movie.id.as_str(), "tt0078748");
        assert_eq!(movie.poster_url, None);
        assert_eq!(movie.plot, None);
        assert_eq!(movie.runtime, None);
        assert_eq!(movie.runtime_minutes, None);
    }

    #[test]
    fn failed_search_body_parses() {
        let raw: SearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(raw.search.is_empty());
        assert_eq!(raw.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn missing_api_key_is_not_configured() {
        let client = OmdbClient::new(OMDB_DEFAULT_BASE_URL, " ");
        assert!(matches!(client.url(&[("s", "alien")]), Err(CatalogError::NotConfigured)));
    }
}
