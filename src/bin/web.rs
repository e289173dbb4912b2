//! Single binary web server: a JSON API that drives district games held in memory.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), SEED (default seed for new games).

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use district_games::{
    parse_input, play_out, play_round, DistrictId, EffectivenessDuel, Registry, DEFAULT_SEED,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a game held by the server.
type GameId = Uuid;

/// Per-game entry: registry + last activity time (for auto-cleanup).
struct GameEntry {
    registry: Registry,
    last_activity: Instant,
}

/// In-memory state: many games by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<GameId, GameEntry>>>;

/// Inactivity threshold: games not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Upper bound on rounds played by a single play-out request.
const MAX_PLAY_OUT_ROUNDS: usize = 10_000;

/// Settings read from the environment at startup.
struct ServerConfig {
    default_seed: u64,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateGameBody {
    /// Input text: district count, district ids, people count, people.
    input: String,
    seed: Option<u64>,
    /// Admit every staged district right away.
    #[serde(default)]
    admit_all: bool,
}

#[derive(Deserialize)]
struct PlayOutBody {
    max_rounds: Option<usize>,
}

#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

#[derive(Deserialize)]
struct GameDistrictPath {
    id: GameId,
    district_id: DistrictId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "district-games",
    })
}

/// Create a game from input text (returns it with id; client stores id for subsequent requests).
#[post("/api/games")]
async fn api_create_game(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateGameBody>,
) -> HttpResponse {
    let seed = body.seed.unwrap_or(config.default_seed);
    let mut registry = match parse_input(body.input.as_bytes(), seed) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    if body.admit_all {
        registry.admit_all();
    }
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created game {} (seed {})", id, registry.seed());
    let response = serde_json::json!({ "id": id, "game": &registry });
    g.insert(
        id,
        GameEntry {
            registry,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(response)
}

/// Run `f` against a game's registry (404 if not found). Touching it refreshes last_activity.
fn with_game(state: &AppState, id: GameId, f: impl FnOnce(&mut Registry) -> HttpResponse) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.registry)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" })),
    }
}

/// Get a game's staging list and district tree.
#[get("/api/games/{id}")]
async fn api_get_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |r| HttpResponse::Ok().json(&*r))
}

/// Admit the next staged district into the tree.
#[post("/api/games/{id}/admit")]
async fn api_admit_next(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |r| match r.admit_next() {
        Some(_) => HttpResponse::Ok().json(&*r),
        None => HttpResponse::BadRequest().json(serde_json::json!({ "error": "No district left to admit" })),
    })
}

/// Admit every staged district into the tree.
#[post("/api/games/{id}/admit-all")]
async fn api_admit_all(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |r| {
        r.admit_all();
        HttpResponse::Ok().json(&*r)
    })
}

/// Look up an active district.
#[get("/api/games/{id}/districts/{district_id}")]
async fn api_find_district(state: AppState, path: Path<GameDistrictPath>) -> HttpResponse {
    with_game(&state, path.id, |r| match r.find_district(path.district_id) {
        Some(d) => HttpResponse::Ok().json(d),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No district" })),
    })
}

/// Remove a district from the tree (no-op if absent).
#[delete("/api/games/{id}/districts/{district_id}")]
async fn api_eliminate_district(state: AppState, path: Path<GameDistrictPath>) -> HttpResponse {
    with_game(&state, path.id, |r| {
        r.eliminate(path.district_id);
        HttpResponse::Ok().json(&*r)
    })
}

/// Select the next pair and settle their duel.
#[post("/api/games/{id}/rounds")]
async fn api_play_round(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |r| match play_round(r, &EffectivenessDuel) {
        Ok(report) => HttpResponse::Ok().json(serde_json::json!({ "round": report, "game": &*r })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Play rounds until nobody can be paired; returns the rounds and the surviving districts.
#[post("/api/games/{id}/play-out")]
async fn api_play_out(state: AppState, path: Path<GamePath>, body: Option<Json<PlayOutBody>>) -> HttpResponse {
    let max_rounds = body
        .as_ref()
        .and_then(|b| b.max_rounds)
        .unwrap_or(MAX_PLAY_OUT_ROUNDS)
        .min(MAX_PLAY_OUT_ROUNDS);
    with_game(&state, path.id, |r| {
        let rounds = play_out(r, &EffectivenessDuel, max_rounds);
        HttpResponse::Ok().json(serde_json::json!({
            "rounds": rounds,
            "survivors": r.survivors(),
        }))
    })
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
    let default_seed: u64 = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{} (default seed {})", bind.0, bind.1, default_seed);

    let state = Data::new(RwLock::new(HashMap::<GameId, GameEntry>::new()));
    let config = Data::new(ServerConfig { default_seed });

    // Background task: every 30 minutes, remove games inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive game(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_admit_next)
            .service(api_admit_all)
            .service(api_find_district)
            .service(api_eliminate_district)
            .service(api_play_round)
            .service(api_play_out)
    })
    .bind(bind)?
    .run()
    .await
}
