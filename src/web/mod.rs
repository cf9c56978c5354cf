// Web server: Axum JSON API over the record store.
//
// All /api/* routes serve JSON. When a static directory is configured,
// every other path is served from it with index.html as the SPA fallback.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::RecordStore;
use crate::error::PipelineError;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    store: Arc<dyn RecordStore>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("ThreatLens API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/threats", get(handlers::threats::list_threats))
        .route("/api/analysis/{id}", get(handlers::analysis::get_analysis))
        .route("/api/news", get(handlers::news::list_news))
        .route("/api/dates", get(handlers::news::list_dates))
        .route("/api/classify/{id}", post(handlers::news::classify))
        .route("/api/stats", get(handlers::stats::get_stats))
        .route("/api/insights", get(handlers::stats::get_insights));

    let app = match state.config.static_dir.as_deref() {
        Some(dir) => api.fallback_service(spa_service(dir)),
        None => api.fallback(not_found),
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Files under `dir`, with index.html for any path that isn't a file
/// so client-side routing works.
fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "not found")
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Map a pipeline failure to its HTTP response, logging store errors.
pub fn pipeline_error(err: PipelineError, what: &str) -> Response {
    match err {
        PipelineError::NotFound { .. } => api_error(StatusCode::NOT_FOUND, "not found"),
        PipelineError::Store(e) => {
            tracing::error!(error = %e, "DB error {what}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
