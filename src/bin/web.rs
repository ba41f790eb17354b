//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `AppConfig` for the environment it reads
//! (HOST, PORT, OMDB_API_KEY, ...).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use movie_playoffs_web::{
    history_csv, AppConfig, InMemorySelectionStore, MatchRecord, Movie, MovieId, OmdbClient,
    Playoff, PlayoffError, PlayoffId, PlayoffState, SearchDebouncer, SearchHit, SelectionStore,
    SessionEntry, SessionError, SessionId, Settled, SlotBoard,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Cookie-session key holding the browser's SessionId.
const SESSION_KEY: &str = "session_id";

/// Everything the handlers share. Built once in `main`.
struct Shared {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    selections: InMemorySelectionStore,
    catalog: OmdbClient,
    debouncer: SearchDebouncer<SessionId>,
    shuffle_seed: Option<u64>,
}

type AppState = Data<Shared>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
    /// A newer search from the same session replaced this one.
    superseded: bool,
}

#[derive(Deserialize)]
struct PickMovieBody {
    movie_id: MovieId,
}

#[derive(Deserialize)]
struct SlotPath {
    index: usize,
}

#[derive(Serialize)]
struct BoardView<'a> {
    slots: &'a [Option<Movie>],
    expansions: u32,
    filled: usize,
    can_start: bool,
}

impl<'a> BoardView<'a> {
    fn of(board: &'a SlotBoard) -> Self {
        Self {
            slots: &board.slots,
            expansions: board.expansions,
            filled: board.filled(),
            can_start: board.can_start(),
        }
    }
}

/// A movie as the playoff screen shows it: runtime already formatted.
#[derive(Serialize)]
struct MovieCard<'a> {
    id: &'a MovieId,
    title: &'a str,
    year: &'a str,
    poster_url: Option<&'a str>,
    plot: Option<&'a str>,
    runtime: Option<String>,
}

impl<'a> MovieCard<'a> {
    fn of(m: &'a Movie) -> Self {
        Self {
            id: &m.id,
            title: &m.title,
            year: &m.year,
            poster_url: m.poster_url.as_deref(),
            plot: m.plot.as_deref(),
            runtime: m.runtime_label(),
        }
    }
}

#[derive(Serialize)]
struct PlayoffView<'a> {
    id: PlayoffId,
    state: PlayoffState,
    stage: Option<&'static str>,
    matchup: Option<[MovieCard<'a>; 2]>,
    champion: Option<MovieCard<'a>>,
    /// Movies still to be knocked out ("N movies remaining").
    remaining: usize,
    history: &'a [MatchRecord],
}

impl<'a> PlayoffView<'a> {
    fn of(p: &'a Playoff) -> Self {
        Self {
            id: p.id,
            state: p.state,
            stage: p.stage().map(|s| s.label()),
            matchup: p
                .current_matchup()
                .map(|m| [MovieCard::of(&m.first), MovieCard::of(&m.second)]),
            champion: p.champion().map(MovieCard::of),
            remaining: p.remaining_matchups(),
            history: &p.history,
        }
    }
}

/// The caller's SessionId, minting one into the cookie on first contact.
fn session_id(session: &Session) -> Result<SessionId, HttpResponse> {
    match session.get::<SessionId>(SESSION_KEY) {
        Ok(Some(id)) => Ok(id),
        Ok(None) | Err(_) => {
            let id = Uuid::new_v4();
            session
                .insert(SESSION_KEY, id)
                .map_err(|_| HttpResponse::InternalServerError().body("session error"))?;
            Ok(id)
        }
    }
}

/// The session's entry (created if missing), with last_activity refreshed.
fn touch(sessions: &mut HashMap<SessionId, SessionEntry>, sid: SessionId) -> &mut SessionEntry {
    let entry = sessions.entry(sid).or_insert_with(SessionEntry::new);
    entry.last_activity = Instant::now();
    entry
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "movie-playoffs-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Search-as-you-type. Only the last query after a pause reaches OMDb; earlier ones
/// answer `superseded: true` with no results.
#[get("/api/search")]
async fn api_search(state: AppState, session: Session, params: Query<SearchParams>) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if state.debouncer.settle(sid).await == Settled::Superseded {
        log::debug!("Search {:?} superseded for session {}", params.query, sid);
        return HttpResponse::Ok().json(SearchResponse {
            results: Vec::new(),
            superseded: true,
        });
    }
    let results = state.catalog.search_or_empty(&params.query).await;
    HttpResponse::Ok().json(SearchResponse {
        results,
        superseded: false,
    })
}

/// Full record for one movie (404 if the catalog has nothing or is unreachable).
#[get("/api/movies/{id}")]
async fn api_get_movie(state: AppState, path: Path<String>) -> HttpResponse {
    match state.catalog.detail_or_none(&MovieId::new(path.into_inner())).await {
        Some(movie) => HttpResponse::Ok().json(movie),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Movie not found" })),
    }
}

/// Current slot board for this session.
#[get("/api/selection")]
async fn api_get_selection(state: AppState, session: Session) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = touch(&mut g, sid);
    HttpResponse::Ok().json(BoardView::of(&entry.board))
}

/// Put a movie (looked up in the catalog by id) into a slot.
#[put("/api/selection/slots/{index}")]
async fn api_fill_slot(
    state: AppState,
    session: Session,
    path: Path<SlotPath>,
    body: Json<PickMovieBody>,
) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    // Catalog call first: no lock is held across the await.
    let movie = match state.catalog.detail_or_none(&body.movie_id).await {
        Some(m) => m,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Movie not found" })),
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = touch(&mut g, sid);
    match entry.board.with_movie(path.index, movie) {
        Ok(board) => commit_board(&state, sid, entry, board),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Empty a slot.
#[delete("/api/selection/slots/{index}")]
async fn api_clear_slot(state: AppState, session: Session, path: Path<SlotPath>) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = touch(&mut g, sid);
    match entry.board.without_movie(path.index) {
        Ok(board) => commit_board(&state, sid, entry, board),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Double the number of slots (2 → 4 → 8 → ...).
#[post("/api/selection/expand")]
async fn api_expand_slots(state: AppState, session: Session) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = touch(&mut g, sid);
    match entry.board.expanded() {
        Ok(board) => commit_board(&state, sid, entry, board),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Install `board`, mirroring its picks into the selection store.
fn commit_board(state: &Shared, sid: SessionId, entry: &mut SessionEntry, board: SlotBoard) -> HttpResponse {
    match entry.commit_board(&state.selections, sid, board) {
        Ok(board) => HttpResponse::Ok().json(BoardView::of(board)),
        Err(e) => session_error(sid, e),
    }
}

/// Map a session-level failure to a JSON error response.
fn session_error(sid: SessionId, e: SessionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        SessionError::NoPlayoff => HttpResponse::NotFound().json(body),
        SessionError::Store(_) => HttpResponse::InternalServerError().json(body),
        SessionError::Playoff(PlayoffError::InvalidWinner(_)) => {
            log::error!("Session {}: {}", sid, e);
            HttpResponse::BadRequest().json(body)
        }
        SessionError::Playoff(_) | SessionError::Slot(_) => HttpResponse::BadRequest().json(body),
    }
}

/// Start playoffs from the saved picks (shuffled). Replaces any unfinished run.
#[post("/api/playoffs")]
async fn api_start_playoffs(state: AppState, session: Session) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut rng = match state.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match touch(&mut g, sid).begin_playoff(&state.selections, sid, &mut rng) {
        Ok(playoff) => HttpResponse::Ok().json(PlayoffView::of(playoff)),
        Err(e) => session_error(sid, e),
    }
}

/// Current playoff (404 if none was started).
#[get("/api/playoffs")]
async fn api_get_playoff(state: AppState, session: Session) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match touch(&mut g, sid).playoff.as_ref() {
        Some(p) => HttpResponse::Ok().json(PlayoffView::of(p)),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No playoffs" })),
    }
}

/// Pick the winner of the current matchup. When that decides the champion, the saved
/// picks are cleared and the slot board starts over.
#[put("/api/playoffs/winner")]
async fn api_playoff_winner(state: AppState, session: Session, body: Json<PickMovieBody>) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match touch(&mut g, sid).decide_winner(&state.selections, sid, &body.movie_id) {
        Ok(playoff) => HttpResponse::Ok().json(PlayoffView::of(playoff)),
        Err(e) => session_error(sid, e),
    }
}

/// Resolved matchups of the current playoff as CSV.
#[get("/api/playoffs/history.csv")]
async fn api_playoff_history_csv(state: AppState, session: Session) -> HttpResponse {
    let sid = match session_id(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let g = match state.sessions.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let playoff = match g.get(&sid).and_then(|e| e.playoff.as_ref()) {
        Some(p) => p,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No playoffs" })),
    };
    match history_csv(playoff) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"playoff-{}.csv\"", playoff.id),
            ))
            .body(body),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    if config.omdb_api_key.is_empty() {
        log::warn!("OMDB_API_KEY is not set; movie searches will return no results");
    }
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Shared {
        sessions: RwLock::new(HashMap::new()),
        selections: InMemorySelectionStore::new(),
        catalog: OmdbClient::new(config.omdb_base_url.clone(), config.omdb_api_key.clone()),
        debouncer: SearchDebouncer::new(config.search_debounce),
        shuffle_seed: config.shuffle_seed,
    });

    // Background task: every 30 minutes, remove sessions inactive past the timeout
    let state_cleanup = state.clone();
    let session_timeout = config.session_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.sessions.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let expired: Vec<SessionId> = g
                .iter()
                .filter(|(_, entry)| entry.last_activity.elapsed() >= session_timeout)
                .map(|(id, _)| *id)
                .collect();
            for id in &expired {
                g.remove(id);
                let _ = state_cleanup.selections.clear(*id);
                state_cleanup.debouncer.forget(id);
            }
            if !expired.is_empty() {
                log::info!("Cleaned up {} inactive session(s)", expired.len());
            }
        }
    });

    let session_key = Key::generate();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .route("/playoffs", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_search)
            .service(api_get_movie)
            .service(api_get_selection)
            .service(api_fill_slot)
            .service(api_clear_slot)
            .service(api_expand_slots)
            .service(api_start_playoffs)
            .service(api_playoff_history_csv)
            .service(api_get_playoff)
            .service(api_playoff_winner)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
