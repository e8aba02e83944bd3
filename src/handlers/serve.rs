use glyph_serve::core::ServiceConfig;
use glyph_serve::core::errors::GlyphResult;
use glyph_serve::server;
use glyph_serve::service::ServiceContext;
use std::sync::Arc;

pub async fn handle_serve(config: ServiceConfig) -> GlyphResult<()> {
    tracing::info!(
        model_dir = %config.model_dir.display(),
        pool_size = config.inference.session_pool_size,
        "Starting MNIST/EMNIST recognition service"
    );

    let load_config = config.clone();
    let context = tokio::task::spawn_blocking(move || ServiceContext::load(&load_config))
        .await
        .map_err(std::io::Error::other)??;

    let health = context.health();
    tracing::info!(mnist = ?health.mnist_model, emnist = ?health.emnist_model, "model status");

    server::serve(&config, Arc::new(context)).await
}
