//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (snapshot
//! directory, default data/), SESSION_KEY (cookie key, at least 64 bytes;
//! default: a key file kept under DATA_DIR).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use padel_tournament_web::{
    advance_round, create_tournament, report_score, standings, valid_court_counts, waiting_count,
    GameId, GameScore, Tournament, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + host metadata. `last_activity`
/// drives auto-cleanup and is never persisted.
struct TournamentEntry {
    tournament: Tournament,
    created_at: DateTime<Utc>,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID (sessioned). Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Directory holding one JSON snapshot per tournament.
type DataDir = Data<PathBuf>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Session key under which a browser's current tournament id is remembered.
const SESSION_TOURNAMENT_KEY: &str = "tournament_id";

/// File under DATA_DIR holding the generated cookie key.
const SESSION_KEY_FILE: &str = "session_key";

/// On-disk form of one tournament: the core snapshot plus host metadata.
#[derive(Serialize, Deserialize)]
struct StoredTournament {
    tournament: Tournament,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    player_names: Vec<String>,
    court_count: u32,
}

#[derive(Deserialize)]
struct ScoreBody {
    round: u32,
    game_id: GameId,
    team_1: u8,
    team_2: u8,
    /// When true, a previously recorded result is replaced instead of rejected.
    #[serde(default)]
    edit: bool,
}

#[derive(Deserialize)]
struct CourtOptionsQuery {
    players: usize,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Court counts available for a cohort, with how many players would wait.
/// Drives the court selector on the setup form.
#[get("/api/court-options")]
async fn api_court_options(query: Query<CourtOptionsQuery>) -> HttpResponse {
    let options: Vec<serde_json::Value> = valid_court_counts(query.players)
        .into_iter()
        .map(|courts| {
            serde_json::json!({
                "courts": courts,
                "waiting": waiting_count(query.players, courts),
            })
        })
        .collect();
    HttpResponse::Ok().json(serde_json::json!({
        "players": query.players,
        "court_options": options,
    }))
}

/// Create a new tournament with round 1 already generated. The id is stored
/// in the cookie session so the browser can resume after a reload.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    data_dir: DataDir,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let tournament = match create_tournament(
        body.name.as_str(),
        &body.player_names,
        body.court_count,
        &mut rand::thread_rng(),
    ) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    if !valid_court_counts(tournament.players.len()).contains(&tournament.court_count) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Cannot run {} court(s) with {} players",
                tournament.court_count,
                tournament.players.len()
            )
        }));
    }
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = TournamentEntry {
        tournament,
        created_at: Utc::now(),
        last_activity: Instant::now(),
    };
    save_snapshot(data_dir.get_ref(), &entry);
    if let Err(e) = session.insert(SESSION_TOURNAMENT_KEY, id) {
        log::warn!("Failed to store tournament id in session: {}", e);
    }
    let response = HttpResponse::Ok().json(&entry.tournament);
    g.insert(id, entry);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Resume the tournament remembered in the cookie session.
#[get("/api/session/tournament")]
async fn api_session_tournament(state: AppState, session: Session) -> HttpResponse {
    let id = match session.get::<TournamentId>(SESSION_TOURNAMENT_KEY) {
        Ok(Some(id)) => id,
        _ => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => {
            // Stale cookie from an evicted or deleted tournament.
            session.remove(SESSION_TOURNAMENT_KEY);
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    }
}

/// Generate the next round (or move the cursor forward onto an already
/// generated one).
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(
    state: AppState,
    data_dir: DataDir,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    match advance_round(&mut entry.tournament, &mut rand::thread_rng()) {
        Ok(()) => {
            save_snapshot(data_dir.get_ref(), entry);
            HttpResponse::Ok().json(&entry.tournament)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Move the round cursor back one round (never below round 1). Scores and
/// generated rounds are untouched.
#[post("/api/tournaments/{id}/rounds/previous")]
async fn api_previous_round(
    state: AppState,
    data_dir: DataDir,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    entry.tournament.go_to_previous_round();
    save_snapshot(data_dir.get_ref(), entry);
    HttpResponse::Ok().json(&entry.tournament)
}

/// Record or edit a game result.
#[put("/api/tournaments/{id}/score")]
async fn api_report_score(
    state: AppState,
    data_dir: DataDir,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let score = GameScore {
        team_1: body.team_1,
        team_2: body.team_2,
    };
    match report_score(
        &mut entry.tournament,
        body.round,
        body.game_id,
        score,
        body.edit,
    ) {
        Ok(()) => {
            save_snapshot(data_dir.get_ref(), entry);
            HttpResponse::Ok().json(&entry.tournament)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Standings as JSON, best-first.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(standings(&entry.tournament))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Standings as a CSV download (rank, player, points, matches played).
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    match standings_csv(&entry.tournament) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"standings.csv\"",
            ))
            .body(bytes),
        Err(e) => {
            log::error!("CSV export failed for {}: {}", entry.tournament.id, e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Wipe the tournament back to a blank slate (same id, no players or rounds).
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(
    state: AppState,
    data_dir: DataDir,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    entry.tournament.reset();
    save_snapshot(data_dir.get_ref(), entry);
    HttpResponse::Ok().json(&entry.tournament)
}

/// Drop the tournament entirely, including its snapshot and the session cookie.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    state: AppState,
    data_dir: DataDir,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => {
            remove_snapshot(data_dir.get_ref(), path.id);
            session.remove(SESSION_TOURNAMENT_KEY);
            HttpResponse::Ok().json(serde_json::json!({ "deleted": path.id }))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Render the standings table as CSV bytes.
fn standings_csv(tournament: &Tournament) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "player", "points", "matches_played"])?;
    for (i, row) in standings(tournament).iter().enumerate() {
        wtr.write_record(&[
            (i + 1).to_string(),
            row.name.clone(),
            row.points.to_string(),
            row.matches_played.to_string(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn snapshot_path(data_dir: &std::path::Path, id: TournamentId) -> PathBuf {
    data_dir.join(format!("{}.json", id))
}

/// Write the tournament snapshot to disk. Failures are logged, not fatal:
/// the in-memory copy stays authoritative for this process.
fn save_snapshot(data_dir: &std::path::Path, entry: &TournamentEntry) {
    let stored = StoredTournament {
        tournament: entry.tournament.clone(),
        created_at: entry.created_at,
    };
    let path = snapshot_path(data_dir, stored.tournament.id);
    let bytes = match serde_json::to_vec_pretty(&stored) {
        Ok(b) => b,
        Err(e) => {
            log::error!("Failed to serialize tournament {}: {}", stored.tournament.id, e);
            return;
        }
    };
    if let Err(e) = std::fs::write(&path, bytes) {
        log::error!("Failed to write {}: {}", path.display(), e);
    }
}

fn remove_snapshot(data_dir: &std::path::Path, id: TournamentId) {
    let path = snapshot_path(data_dir, id);
    if let Err(e) = std::fs::remove_file(&path) {
        log::warn!("Failed to remove {}: {}", path.display(), e);
    }
}

/// Load every readable snapshot from the data directory. Unreadable or
/// unparsable files are skipped with a warning so one bad file cannot keep
/// the server from starting.
fn load_snapshots(data_dir: &std::path::Path) -> HashMap<TournamentId, TournamentEntry> {
    let mut map = HashMap::new();
    let entries = match std::fs::read_dir(data_dir) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("Cannot read {}: {}", data_dir.display(), e);
            return map;
        }
    };
    for dir_entry in entries.flatten() {
        let path = dir_entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match serde_json::from_slice::<StoredTournament>(&bytes) {
            Ok(stored) => {
                map.insert(
                    stored.tournament.id,
                    TournamentEntry {
                        tournament: stored.tournament,
                        created_at: stored.created_at,
                        last_activity: Instant::now(),
                    },
                );
            }
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    log::info!(
        "Loaded {} tournament(s) from {}",
        map.len(),
        data_dir.display()
    );
    map
}

/// Cookie key for the session middleware: `SESSION_KEY` env var when set,
/// otherwise a key file next to the snapshots, created on first boot.
/// Cookies issued before a restart stay valid.
fn session_key(data_dir: &std::path::Path) -> Key {
    if let Ok(value) = std::env::var("SESSION_KEY") {
        match Key::try_from(value.as_bytes()) {
            Ok(key) => return key,
            Err(e) => log::warn!("Ignoring SESSION_KEY, using the key file instead: {}", e),
        }
    }
    load_or_create_session_key(data_dir)
}

/// Load the persisted cookie key, or generate one and persist it. An
/// unreadable or undersized key file is replaced with a fresh key.
fn load_or_create_session_key(data_dir: &std::path::Path) -> Key {
    let path = data_dir.join(SESSION_KEY_FILE);
    if let Ok(bytes) = std::fs::read(&path) {
        match Key::try_from(bytes.as_slice()) {
            Ok(key) => return key,
            Err(e) => log::warn!("Replacing {}: {}", path.display(), e),
        }
    }
    let key = Key::generate();
    if let Err(e) = std::fs::write(&path, key.master()) {
        log::warn!(
            "Failed to write {}; sessions will not survive a restart: {}",
            path.display(),
            e
        );
    }
    key
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    std::fs::create_dir_all(&data_dir)?;

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(load_snapshots(&data_dir)));
    let data_dir_data = Data::new(data_dir.clone());
    let secret_key = session_key(&data_dir);

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    let cleanup_dir = data_dir.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let expired: Vec<TournamentId> = g
                .iter()
                .filter(|(_, entry)| entry.last_activity.elapsed() >= INACTIVITY_TIMEOUT)
                .map(|(id, _)| *id)
                .collect();
            for id in &expired {
                g.remove(id);
                remove_snapshot(&cleanup_dir, *id);
            }
            if !expired.is_empty() {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for 12h)",
                    expired.len()
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(data_dir_data.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_court_options)
            .service(api_create_tournament)
            .service(api_session_tournament)
            .service(api_get_tournament)
            .service(api_next_round)
            .service(api_previous_round)
            .service(api_report_score)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_reset_tournament)
            .service(api_delete_tournament)
            .service(Files::new("/static", "static").show_files_listing())
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
