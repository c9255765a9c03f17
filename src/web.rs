use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{Router, http::StatusCode, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};

/// Full application router: health check plus the JSON API under `/api`
pub fn app(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api::router(state))
        .layer(middleware)
}

pub async fn run(state: Arc<AppState>, port: u16, request_timeout: Duration) -> Result<()> {
    let app = app(state, request_timeout);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app).await.context("Web server failed")
}
