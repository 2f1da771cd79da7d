use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::types::Mode;
use crate::game::{Game, GuessCounter};
use crate::matching::engine::{ScoringWeights, SimilarityEngine};
use crate::matching::ranking::DEFAULT_TOP_N;
use crate::matching::resolver::ResolverConfig;
use crate::matching::MatchError;
use crate::roster::store::PlayerStore;
use crate::utils::validation::validate_name_input;

/// Largest accepted request body
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Message returned for any name that does not resolve
pub const INVALID_NAME_MESSAGE: &str = "Invalid player name.";

/// Shared application state
pub struct AppState {
    pub store: PlayerStore,
    pub engine: SimilarityEngine,
    pub counter: GuessCounter,
    pub resolver: ResolverConfig,
}

impl AppState {
    pub fn new(store: PlayerStore, engine: SimilarityEngine) -> Self {
        Self {
            store,
            engine,
            counter: GuessCounter::new(),
            resolver: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_resolver_config(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    fn game(&self) -> Game<'_> {
        Game::new(&self.store, &self.engine, &self.counter).with_resolver_config(self.resolver)
    }
}

/// Error body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Map resolution and ranking failures onto HTTP statuses
fn match_error_response(err: &MatchError) -> Response {
    match err {
        MatchError::NotFound { .. } => {
            error_response(StatusCode::BAD_REQUEST, INVALID_NAME_MESSAGE)
        }
        MatchError::EmptyPool { .. } => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
        }
    }
}

/// Parse an optional `mode` parameter, defaulting to all-time
fn parse_mode(raw: Option<&str>) -> Result<Mode, Response> {
    match raw {
        None => Ok(Mode::default()),
        Some(value) => value.parse().map_err(|_| {
            error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid mode '{value}'. Expected 'all-time' or 'classic'."),
            )
        }),
    }
}

#[derive(Deserialize)]
pub struct ModeQuery {
    mode: Option<String>,
}

#[derive(Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    guess: String,
    #[serde(default)]
    target: String,
    mode: Option<String>,
}

#[derive(Serialize)]
struct ConfigurationInfo {
    cutoff: f64,
    top_n: usize,
    scoring_weights: ScoringWeights,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the dataset or weights cannot be loaded, the tokio
/// runtime cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let store = args.source.load_store(false)?;
    let engine = args.source.load_engine()?;
    let state = AppState::new(store, engine).with_resolver_config(args.source.resolver_config());

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Per-IP rate limiting needs the peer address, so it is added by the
/// server rather than here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/players", get(players_handler))
        .route("/api/guess", post(guess_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/config", get(config_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(10),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, state: AppState) -> anyhow::Result<()> {
    let players = state.store.len();

    // 10 requests per second per IP, bursts of 50
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;

    let app = create_router(Arc::new(state)).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    tracing::info!("Serving {} players", players);
    println!("Starting nba-mantle server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/health"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "players_loaded": state.store.len(),
    }))
}

async fn players_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModeQuery>,
) -> Response {
    let mode = match parse_mode(query.mode.as_deref()) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    match state.game().players(mode) {
        Ok(names) => Json(names).into_response(),
        Err(err) => match_error_response(&err),
    }
}

async fn guess_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Request body must be JSON with 'guess' and 'target'.",
        );
    };

    let mode = match parse_mode(request.mode.as_deref()) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    let (Ok(guess), Ok(target)) = (
        validate_name_input(&request.guess),
        validate_name_input(&request.target),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_NAME_MESSAGE);
    };

    match state.game().guess(guess, target, mode) {
        Ok(outcome) => Json(outcome.to_json()).into_response(),
        Err(err) => {
            tracing::debug!("Guess rejected: {}", err);
            match_error_response(&err)
        }
    }
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let snapshot = state.counter.snapshot();
    let total: u64 = snapshot.iter().map(|(_, count)| count).sum();
    let targets: Vec<serde_json::Value> = snapshot
        .into_iter()
        .map(|(name, guesses)| serde_json::json!({"name": name, "guesses": guesses}))
        .collect();

    Json(serde_json::json!({
        "total_guesses": total,
        "targets": targets,
    }))
}

async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigurationInfo> {
    Json(ConfigurationInfo {
        cutoff: state.resolver.cutoff,
        top_n: DEFAULT_TOP_N,
        scoring_weights: state.engine.weights().clone(),
    })
}
