//! The core module of the recognition service.
//!
//! This module contains the fundamental components shared by the rest of the
//! crate:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - ONNX Runtime integration
//! - The classifier trait
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;

pub use config::{
    ConfigError, ConfigValidator, ConfigValidatorExt, ModelInferenceConfig, ServiceConfig,
};
pub use constants::*;
pub use errors::{GlyphError, GlyphResult, ProcessingStage};
pub use inference::OrtInfer;
pub use traits::Classifier;

/// Two-dimensional `f32` tensor, `[batch, classes]`.
pub type Tensor2D = ndarray::Array2<f32>;

/// Four-dimensional `f32` tensor, `[batch, height, width, channel]`.
pub type Tensor4D = ndarray::Array4<f32>;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// The filter falls back to `info` when `RUST_LOG` is not set.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
