//! # HTTP API
//!
//! Builds the axum router for the explorer. All handlers share application
//! state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path              | Description                              |
//! |--------|-------------------|------------------------------------------|
//! | GET    | `/health`         | Liveness check                           |
//! | GET    | `/api/blockchain` | Current chain snapshot as JSON           |
//! | GET    | `/explorer`       | Chain rendered server-side as HTML       |
//! | GET    | `/*`              | Static assets from the configured folder |
//!
//! Query strings are accepted and ignored everywhere.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use chain_explorer::config::SNAPSHOT_PATH;
use chain_explorer::render::render_html;
use chain_explorer::{ChainSnapshot, SnapshotProvider};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone, everything behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The server's reported version string.
    pub version: String,
    /// Where snapshots come from. Static by default, HTTP when proxying.
    pub provider: Arc<dyn SnapshotProvider>,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with API routes, the static-file
/// fallback, CORS and tracing.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(SNAPSHOT_PATH, get(snapshot_handler))
        .route("/explorer", get(explorer_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Response payload for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

/// Error body returned when a snapshot cannot be produced.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 while the process is alive.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /api/blockchain` — returns the provider's current snapshot.
///
/// Never fails with the static provider. A failing upstream yields 502.
async fn snapshot_handler(State(state): State<AppState>) -> Response {
    match fetch_snapshot(&state).await {
        Ok(snapshot) => {
            state.metrics.snapshot_requests_total.inc();
            Json(snapshot).into_response()
        }
        Err(resp) => resp,
    }
}

/// `GET /explorer` — renders the provider's snapshot into an HTML page.
async fn explorer_handler(State(state): State<AppState>) -> Response {
    let snapshot = match fetch_snapshot(&state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match render_html(&snapshot) {
        Ok(page) => {
            state.metrics.page_renders_total.inc();
            Html(page).into_response()
        }
        Err(e) => {
            tracing::error!("failed to render explorer page: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Asks the provider for a snapshot, recording timing and failures.
async fn fetch_snapshot(state: &AppState) -> Result<ChainSnapshot, Response> {
    let timer = state.metrics.snapshot_fetch_seconds.start_timer();
    let result = state.provider.get_snapshot().await;
    timer.observe_duration();

    match result {
        Ok(snapshot) => {
            state.metrics.snapshot_blocks.set(snapshot.blocks.len() as i64);
            for anomaly in snapshot.link_report() {
                tracing::debug!(%anomaly, "snapshot departs from a linked chain");
            }
            Ok(snapshot)
        }
        Err(e) => {
            state.metrics.snapshot_errors_total.inc();
            tracing::warn!(
                provider = %state.provider.describe(),
                "failed to obtain snapshot: {}",
                e
            );
            Err(error_response(
                StatusCode::BAD_GATEWAY,
                format!("snapshot unavailable: {}", e),
            ))
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
