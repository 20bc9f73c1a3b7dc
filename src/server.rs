//! HTTP surface: axum router, shared state and JSON envelopes

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::constants::rate_budget;
use crate::error::AppError;
use crate::pipeline::api::create_http_client_with_timeout;
use crate::pipeline::models::UpcomingMatchesData;
use crate::pipeline::{PipelineOutcome, PipelineState, fetch_upcoming_matches};

/// Shared server state. The pipeline state sits behind one async mutex
/// that is held for a whole pipeline run: the budget's check-then-record
/// step must never interleave between overlapping requests.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
    pub pipeline: Arc<Mutex<PipelineState>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self {
            client,
            config: Arc::new(config),
            pipeline: Arc::new(Mutex::new(PipelineState::default())),
        })
    }
}

/// Success envelope of `/api/upcoming-matches`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesEnvelope {
    pub success: bool,
    pub data: UpcomingMatchesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
}

/// Error envelope returned with HTTP 429
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitEnvelope {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub rate_limit_info: RateLimitInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub limit: String,
    pub suggestion: String,
    pub api_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: HealthCache,
    pub rate_budget: HealthBudget,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCache {
    pub present: bool,
    pub age_seconds: Option<u64>,
    pub fresh: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBudget {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    pub resets_in_seconds: u64,
}

#[derive(Debug, Serialize)]
struct BannerResponse {
    message: &'static str,
    endpoints: BannerEndpoints,
}

#[derive(Debug, Serialize)]
struct BannerEndpoints {
    matches: &'static str,
    health: &'static str,
}

/// Builds the router with CORS and request tracing applied
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/upcoming-matches", get(upcoming_matches))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Matchday API",
        endpoints: BannerEndpoints {
            matches: "/api/upcoming-matches",
            health: "/api/health",
        },
    })
}

async fn upcoming_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchesEnvelope>, (StatusCode, Json<RateLimitEnvelope>)> {
    // Held across the whole run, serializing overlapping requests
    let mut pipeline = state.pipeline.lock().await;

    match fetch_upcoming_matches(&state.client, &state.config, &mut pipeline).await {
        PipelineOutcome::Fresh(data) => Ok(Json(MatchesEnvelope {
            success: true,
            data,
            cached: None,
            cache_age: None,
        })),
        PipelineOutcome::Cached { data, age_seconds } => Ok(Json(MatchesEnvelope {
            success: true,
            data,
            cached: Some(true),
            cache_age: Some(age_seconds),
        })),
        PipelineOutcome::RateLimited {
            retry_after_seconds,
            api_message,
        } => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitEnvelope {
                success: false,
                error: "rate_limited".to_string(),
                message: "Too many requests to the fixtures API".to_string(),
                rate_limit_info: RateLimitInfo {
                    limit: format!(
                        "{} requests per minute",
                        rate_budget::REQUESTS_PER_WINDOW
                    ),
                    suggestion: format!("Try again in about {retry_after_seconds} seconds"),
                    api_message,
                },
            }),
        )),
    }
}

/// Read-only introspection: reports cache and budget state without
/// mutating either
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = state.pipeline.lock().await;
    let cache = pipeline.cache.status();
    let budget = pipeline.rate_budget.snapshot();

    Json(HealthResponse {
        status: "ok",
        cache: HealthCache {
            present: cache.present,
            age_seconds: cache.age_seconds,
            fresh: cache.fresh,
        },
        rate_budget: HealthBudget {
            used: budget.used,
            limit: budget.limit,
            remaining: budget.remaining,
            resets_in_seconds: budget.resets_in_seconds,
        },
    })
}

/// Binds the listener and serves until the process is stopped
pub async fn run_server(config: Config) -> Result<(), AppError> {
    let port = config.listen_port;
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
