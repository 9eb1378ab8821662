//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use recap_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::app_config;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes();
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route("/config", get(api::config))
        .route("/instructions", get(api::instructions))
        .route("/summarize", post(api::summarize))
        .route("/summaries", post(api::record_summary))
        .route("/history", get(api::history_list))
        .route("/history/{number}", get(api::history_get))
        .route("/history/{number}/export/{format}", get(api::history_export))
        .route("/export/{format}", post(api::export))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Invalid CORS_ORIGIN '{}': {} - falling back to permissive", origin, e);
            CorsLayer::permissive()
        }
    }
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let port = config.server.port;

    let app = build_router(app_config::build_app_state(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", port);
    info!("API docs at http://localhost:{}/docs", port);
    axum::serve(listener, app).await?;

    Ok(())
}
