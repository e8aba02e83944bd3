//! HTTP surface of the recognition service.
//!
//! Routes:
//!
//! * `GET /` - service banner and endpoint list
//! * `GET /health` - load state of both models
//! * `POST /predict/digit` - classify a handwritten digit
//! * `POST /predict/letter` - classify a handwritten letter

mod error;
mod routes;

pub use error::ApiError;

use crate::core::config::ServiceConfig;
use crate::core::errors::GlyphResult;
use crate::service::ServiceContext;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router around a shared context.
pub fn build_router(context: Arc<ServiceContext>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health))
        .route("/predict/digit", post(routes::predict_digit))
        .route("/predict/letter", post(routes::predict_letter))
        .with_state(context)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServiceConfig, context: Arc<ServiceContext>) -> GlyphResult<()> {
    let app = build_router(context, config.body_limit_bytes);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /               - service info");
    tracing::info!("  GET  /health         - model status");
    tracing::info!("  POST /predict/digit  - predict digit (0-9)");
    tracing::info!("  POST /predict/letter - predict letter (A-Z)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
