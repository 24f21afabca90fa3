use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use parlay_picks::odds_calculator::{american_to_decimal, implied_probability};
use parlay_picks::parlay::{generate_parlays, top_parlays};
use parlay_picks::{load_picks_board, League, Leg, PicksBoard, PicksConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

struct AppState {
    config: PicksConfig,
    board: RwLock<Option<PicksBoard>>,
}

type SharedState = Arc<AppState>;

#[derive(Debug)]
enum ApiError {
    NotLoaded,
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_loaded",
                "Data not loaded yet".to_string(),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Serialize)]
struct Summary {
    league: Option<League>,
    event_count: usize,
    pick_count: usize,
    positive_edge_picks: usize,
    parlay_count: usize,
    top_picks: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct ParlayRequest {
    legs: Vec<Leg>,
    min_legs: Option<usize>,
    max_legs: Option<usize>,
    top: Option<usize>,
}

#[derive(Serialize)]
struct OddsResponse {
    odds: i32,
    implied_probability: f64,
    decimal_odds: Option<f64>,
}

async fn current_board(state: &SharedState) -> Result<PicksBoard, ApiError> {
    state.board.read().await.clone().ok_or(ApiError::NotLoaded)
}

async fn home(State(state): State<SharedState>) -> Result<Json<Summary>, ApiError> {
    let board = current_board(&state).await?;

    // Get top 3 picks
    let top_picks: Vec<Leg> = board.picks.iter().take(3).cloned().collect();

    Ok(Json(Summary {
        league: board.league,
        event_count: board.event_count,
        pick_count: board.picks.len(),
        positive_edge_picks: board.positive_edge_picks(),
        parlay_count: board.parlays.len(),
        top_picks,
    }))
}

async fn picks(State(state): State<SharedState>) -> Result<Json<Vec<Leg>>, ApiError> {
    let board = current_board(&state).await?;
    Ok(Json(board.picks))
}

async fn league_picks(
    State(state): State<SharedState>,
    Path(league): Path<String>,
) -> Result<Json<Vec<Leg>>, ApiError> {
    let league: League = league
        .parse()
        .map_err(|e: parlay_picks::PicksError| ApiError::BadRequest(e.to_string()))?;
    let board = current_board(&state).await?;
    Ok(Json(board.picks_for(league)))
}

async fn parlays(
    State(state): State<SharedState>,
) -> Result<Json<Vec<parlay_picks::Parlay>>, ApiError> {
    let board = current_board(&state).await?;
    Ok(Json(board.parlays))
}

async fn build_parlays(
    State(state): State<SharedState>,
    Json(request): Json<ParlayRequest>,
) -> Result<Json<Vec<parlay_picks::Parlay>>, ApiError> {
    let config = &state.config;

    if request.legs.len() > config.max_parlay_input_legs {
        return Err(ApiError::BadRequest(format!(
            "at most {} legs can be combined, got {}",
            config.max_parlay_input_legs,
            request.legs.len()
        )));
    }

    let min_legs = request.min_legs.unwrap_or(config.min_parlay_legs);
    let max_legs = request.max_legs.unwrap_or(config.max_parlay_legs);

    let parlays = generate_parlays(&request.legs, min_legs, max_legs)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(top_parlays(
        parlays,
        request.top.unwrap_or(config.top_parlays),
    )))
}

async fn odds(Path(odds): Path<i32>) -> Json<OddsResponse> {
    Json(OddsResponse {
        odds,
        implied_probability: implied_probability(odds),
        decimal_odds: american_to_decimal(odds).ok(),
    })
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/picks", get(picks))
        .route("/picks/:league", get(league_picks))
        .route("/parlays", get(parlays).post(build_parlays))
        .route("/odds/:odds", get(odds))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = PicksConfig::from_env()?;

    println!("Loading odds snapshot...");

    // Build the board on startup
    let board = match load_picks_board(&config) {
        Ok(board) => {
            println!("Data loaded successfully");
            println!("  - {} Events", board.event_count);
            println!("  - {} Picks", board.picks.len());
            println!("  - {} Positive Edge Picks", board.positive_edge_picks());
            println!("  - {} Parlays", board.parlays.len());
            Some(board)
        }
        Err(e) => {
            error!("Error loading picks: {:#}", e);
            eprintln!("Server will start but pages may show errors");
            None
        }
    };

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState {
        config,
        board: RwLock::new(board),
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on http://{}", bind_addr);
    println!("\nStarting web server at http://{}", bind_addr);
    println!("Press Ctrl+C to stop\n");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
