//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, DATA_FILE (snapshot path), SESSION_KEY (64+ bytes).

use actix_files::Files;
use actix_session::{
    config::PersistentSession, storage::CookieSessionStore, Session, SessionMiddleware,
};
use actix_web::{
    cookie::{time::Duration, Key},
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::RwLock;
use volei_caos_web::{
    assign_team, clear_teams, compute_standings, draw_teams, finalize_tournament, record_duration,
    record_score, reset_ranking, reset_tournament, select_all_present, set_presence, Side, Store,
    Tournament, TournamentError, MATCH_SCHEDULE,
};

/// Shared state: the one store for the whole process.
type AppState = Data<RwLock<Store>>;

/// Login window before the cookie session expires.
const SESSION_TTL_HOURS: i64 = 12;

/// Advisory user table: one admin, one shared player login. Replace for your
/// own group; the role gate is front-end convenience, not a trust boundary.
const USERS: &[(&str, &str, &str, &str)] = &[
    ("admin", "1234", "admin", "Administrador"),
    ("jogador", "1234", "player", "Jogador"),
];

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Per-match read model for the scoreboard page.
#[derive(serde::Serialize)]
struct MatchView {
    id: u8,
    team_a: String,
    team_b: String,
    score_a: Option<u32>,
    score_b: Option<u32>,
    duration: String,
    active: bool,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct PresenceBody {
    name: String,
    present: bool,
}

fn default_count() -> usize {
    8
}

#[derive(Deserialize)]
struct SelectAllBody {
    enable: bool,
    #[serde(default = "default_count")]
    count: usize,
}

#[derive(Deserialize)]
struct TeamNameBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    side: Side,
    value: Option<u32>,
}

#[derive(Deserialize)]
struct DurationBody {
    duration: String,
}

#[derive(Deserialize)]
struct SelectedDateBody {
    date: NaiveDate,
}

/// Path segment: tournament date (e.g. /api/tournaments/2025-03-01)
#[derive(Deserialize)]
struct DatePath {
    date: NaiveDate,
}

/// Path segments: tournament date and team slot index.
#[derive(Deserialize)]
struct DateSlotPath {
    date: NaiveDate,
    slot: usize,
}

/// Path segments: tournament date and match index (0..=11).
#[derive(Deserialize)]
struct DateMatchPath {
    date: NaiveDate,
    idx: usize,
}

fn is_admin(session: &Session) -> bool {
    matches!(session.get::<String>("role"), Ok(Some(ref r)) if r == "admin")
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PermissionDenied => HttpResponse::Forbidden().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Write the snapshot after a mutation; a failed write is a 500.
fn persist(store: &Store) -> Option<HttpResponse> {
    match store.save() {
        Ok(()) => None,
        Err(e) => {
            log::error!("Failed to write snapshot: {}", e);
            Some(
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Failed to persist state" })),
            )
        }
    }
}

fn match_views(t: &Tournament) -> Vec<MatchView> {
    MATCH_SCHEDULE
        .iter()
        .enumerate()
        .map(|(idx, m)| MatchView {
            id: m.id,
            team_a: t.team_slots[m.slot_a].clone(),
            team_b: t.team_slots[m.slot_b].clone(),
            score_a: t.scores[idx].score_a,
            score_b: t.scores[idx].score_b,
            duration: t.scores[idx].duration.clone(),
            active: t.match_is_active(idx),
        })
        .collect()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volei-caos-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Log in against the fixed user table; the session cookie carries the role.
#[post("/api/login")]
async fn api_login(session: Session, body: Json<LoginBody>) -> HttpResponse {
    let username = body.username.trim();
    let password = body.password.trim();
    if username.is_empty() || password.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Username and password required" }));
    }
    let found = USERS
        .iter()
        .find(|(u, p, _, _)| *u == username && *p == password);
    let (username, role, name) = match found {
        Some(&(u, _, r, n)) => (u, r, n),
        None => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Invalid username or password" }))
        }
    };
    let stored = session
        .insert("username", username)
        .and(session.insert("role", role))
        .and(session.insert("name", name));
    if stored.is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    log::info!("{} logged in as {}", username, role);
    HttpResponse::Ok().json(serde_json::json!({ "role": role, "name": name }))
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "logged_in": false }))
}

/// Who am I: role/name projection for the navigation badge.
#[get("/api/session")]
async fn api_session(session: Session) -> HttpResponse {
    let role = session.get::<String>("role").unwrap_or(None);
    let name = session.get::<String>("name").unwrap_or(None);
    HttpResponse::Ok().json(serde_json::json!({
        "logged_in": role.is_some(),
        "role": role,
        "name": name,
    }))
}

/// Selected date plus the annual ranking projection.
#[get("/api/state")]
async fn api_state(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "selected_date": g.selected_date,
        "ranking": g.ranking_entries(),
    }))
}

/// Move the active-date pointer (the date input on every page).
#[put("/api/selected-date")]
async fn api_set_selected_date(state: AppState, body: Json<SelectedDateBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.set_selected_date(body.date);
    g.tournament_mut(body.date);
    if let Some(resp) = persist(&g) {
        return resp;
    }
    HttpResponse::Ok().json(serde_json::json!({ "selected_date": g.selected_date }))
}

/// The fixed 12-match schedule (slot indices, not names).
#[get("/api/schedule")]
async fn api_schedule() -> HttpResponse {
    HttpResponse::Ok().json(&MATCH_SCHEDULE[..])
}

/// Get the tournament for a date, creating the default record on first access.
#[get("/api/tournaments/{date}")]
async fn api_get_tournament(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.tournament_mut(path.date))
}

/// Per-match view: pair names, scores, duration, and whether a game exists.
#[get("/api/tournaments/{date}/matches")]
async fn api_get_matches(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let views = match_views(g.tournament_mut(path.date));
    HttpResponse::Ok().json(views)
}

/// The day's standings table.
#[get("/api/tournaments/{date}/standings")]
async fn api_get_standings(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let standings = compute_standings(g.tournament_mut(path.date));
    HttpResponse::Ok().json(standings)
}

/// Mark one player present or absent.
#[post("/api/tournaments/{date}/presence")]
async fn api_set_presence(
    state: AppState,
    path: Path<DatePath>,
    body: Json<PresenceBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let (t, annual) = g.tournament_and_ranking(path.date);
    match set_presence(t, annual, &body.name, body.present) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Bulk presence toggle: first 6 or 8 roster players, or clear.
#[post("/api/tournaments/{date}/presence/select-all")]
async fn api_select_all_present(
    state: AppState,
    path: Path<DatePath>,
    body: Json<SelectAllBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let (t, annual) = g.tournament_and_ranking(path.date);
    select_all_present(t, annual, body.enable, body.count);
    if let Some(resp) = persist(&g) {
        return resp;
    }
    HttpResponse::Ok().json(g.tournament_mut(path.date))
}

/// Draw the day's pairs from the presence list. Overwrites existing pairs;
/// the front-end asks for confirmation before calling.
#[post("/api/tournaments/{date}/draw")]
async fn api_draw_teams(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let (t, annual) = g.tournament_and_ranking(path.date);
    match draw_teams(t, annual) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Name one team slot manually.
#[put("/api/tournaments/{date}/teams/{slot}")]
async fn api_assign_team(
    state: AppState,
    path: Path<DateSlotPath>,
    body: Json<TeamNameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = g.tournament_mut(path.date);
    match assign_team(t, path.slot, &body.name) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Empty all four slots and reopen the day.
#[post("/api/tournaments/{date}/teams/clear")]
async fn api_clear_teams(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    clear_teams(g.tournament_mut(path.date));
    if let Some(resp) = persist(&g) {
        return resp;
    }
    HttpResponse::Ok().json(g.tournament_mut(path.date))
}

/// Record one side's score for a match. Ignored for matches without a game.
#[put("/api/tournaments/{date}/matches/{idx}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<DateMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = g.tournament_mut(path.date);
    match record_score(t, path.idx, body.side, body.value) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Record a match's duration text from the stopwatch.
#[put("/api/tournaments/{date}/matches/{idx}/duration")]
async fn api_record_duration(
    state: AppState,
    path: Path<DateMatchPath>,
    body: Json<DurationBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = g.tournament_mut(path.date);
    match record_duration(t, path.idx, &body.duration) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Close out the day and grant annual points. A second call is a no-op that
/// still returns the tournament, so the button can be pressed twice safely.
#[post("/api/tournaments/{date}/finalize")]
async fn api_finalize(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match finalize_tournament(&mut g, path.date) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            log::info!("Tournament {} finalized", path.date);
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(TournamentError::AlreadyFinished) => HttpResponse::Ok().json(g.tournament_mut(path.date)),
        Err(e) => error_response(e),
    }
}

/// Reset one day, reverting its annual points if it was finished. Admin only.
#[post("/api/tournaments/{date}/reset")]
async fn api_reset_tournament(
    state: AppState,
    session: Session,
    path: Path<DatePath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match reset_tournament(&mut g, path.date, is_admin(&session)) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            log::info!("Tournament {} reset", path.date);
            HttpResponse::Ok().json(g.tournament_mut(path.date))
        }
        Err(e) => error_response(e),
    }
}

/// Annual ranking, sorted by points.
#[get("/api/ranking")]
async fn api_ranking(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.ranking_entries())
}

/// Zero the annual ranking back to the fixed roster. Admin only.
#[post("/api/ranking/reset")]
async fn api_reset_ranking(state: AppState, session: Session) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match reset_ranking(&mut g, is_admin(&session)) {
        Ok(()) => {
            if let Some(resp) = persist(&g) {
                return resp;
            }
            log::info!("Annual ranking reset");
            HttpResponse::Ok().json(g.ranking_entries())
        }
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "vcaos_data.json".to_string()
}

/// Cookie signing key: SESSION_KEY env (64+ bytes) or a fresh random key,
/// which logs everyone out on restart.
fn session_key() -> Key {
    match std::env::var("SESSION_KEY") {
        Ok(s) if s.len() >= 64 => Key::from(s.as_bytes()),
        Ok(_) => {
            log::warn!("SESSION_KEY shorter than 64 bytes, using a random key");
            Key::generate()
        }
        Err(_) => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());
    let bind = (host.as_str(), port);

    let store = Store::load(&*data_file)?;
    log::info!(
        "Loaded {} tournament day(s) and {} ranked player(s) from {}",
        store.db.tournaments.len(),
        store.db.annual_points.len(),
        data_file
    );
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(store));
    let key = session_key();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(
                        PersistentSession::default()
                            .session_ttl(Duration::hours(SESSION_TTL_HOURS)),
                    )
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_login)
            .service(api_logout)
            .service(api_session)
            .service(api_state)
            .service(api_set_selected_date)
            .service(api_schedule)
            .service(api_get_tournament)
            .service(api_get_matches)
            .service(api_get_standings)
            .service(api_set_presence)
            .service(api_select_all_present)
            .service(api_draw_teams)
            .service(api_assign_team)
            .service(api_clear_teams)
            .service(api_record_score)
            .service(api_record_duration)
            .service(api_finalize)
            .service(api_reset_tournament)
            .service(api_ranking)
            .service(api_reset_ranking)
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
