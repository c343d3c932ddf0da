mod error;
mod ratelimit;

pub use error::ApiError;
pub use ratelimit::RateLimiter;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{ConnectInfo, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::media::{parse_file_size_limit, parse_media_types, ExtractionResult, MediaFilter, Resolver};

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    resolver: Arc<dyn Resolver>,
    limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, resolver: Arc<dyn Resolver>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        Self {
            config: Arc::new(config),
            resolver,
            limiter,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub quality: Option<u32>,
    pub file_size: Option<String>,
    pub file_ext: Option<String>,
}

fn default_media_type() -> String {
    "video".to_string()
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/extract", get(extract))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
}

pub async fn run(config: Config) -> Result<()> {
    if !crate::media::YtDlpResolver::test_availability().await {
        warn!("yt-dlp is not available; extraction requests will fail");
    }

    let bind_addr = config.bind_addr;
    let resolver = Arc::new(crate::media::YtDlpResolver::new(config.resolver_timeout));
    info!("Using {} resolver", resolver.name());
    let state = AppState::new(config, resolver);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn extract(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<ExtractParams>,
) -> Result<Json<ExtractionResult>, ApiError> {
    handle_extract(&state, addr.ip(), params).await.map(Json)
}

/// The per-request pipeline: rate-limit gate, auth, validation, resolution,
/// filtering. The rate limit is charged before auth, so rejected keys still
/// consume window budget.
async fn handle_extract(
    state: &AppState,
    client_ip: IpAddr,
    params: ExtractParams,
) -> Result<ExtractionResult, ApiError> {
    if !state.limiter.check(client_ip).await {
        warn!("Rate limit exceeded for {}", client_ip);
        return Err(ApiError::RateLimited);
    }

    if params.api_key != state.config.api_key {
        return Err(ApiError::InvalidApiKey);
    }

    let media_types = parse_media_types(&params.media_type).map_err(ApiError::Validation)?;

    let filter = MediaFilter {
        media_types,
        max_resolution: params.quality,
        max_file_size: params
            .file_size
            .as_deref()
            .and_then(parse_file_size_limit),
        extension: params.file_ext.clone(),
    };

    info!("Extracting formats for: {}", params.url);

    let raw = state
        .resolver
        .resolve(&params.url)
        .await
        .map_err(|e| ApiError::Extraction(e.to_string()))?;

    let result = filter.apply(raw);
    info!(
        "Returning {} of the resolved formats for: {}",
        result.files.len(),
        params.url
    );

    Ok(result)
}
