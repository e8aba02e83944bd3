//! # glyph-serve
//!
//! An HTTP inference service for handwritten glyphs. Clients post a drawn
//! image (base64 or data-URI), the service normalizes it into the 28x28
//! format of the MNIST/EMNIST datasets, runs a pre-trained ONNX classifier
//! and answers with the predicted digit or letter plus confidence scores.
//!
//! ## Modules
//!
//! * [`core`] - Configuration, errors, constants, ONNX Runtime integration and the classifier trait
//! * [`domain`] - Task kinds, predictions and response payloads
//! * [`models`] - ONNX-backed classifiers
//! * [`processors`] - Decoding, normalization, ranking and labelling
//! * [`service`] - The shared service context
//! * [`server`] - The axum router and server loop
//! * [`utils`] - Image loading and grayscale conversion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyph_serve::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::default();
//! let context = Arc::new(ServiceContext::load(&config)?);
//! serve(&config, context).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Classifying an image without the HTTP layer:
//!
//! ```rust,no_run
//! use glyph_serve::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::default();
//! let context = ServiceContext::load_only(&config, ModelKind::Digit)?;
//! let img = load_image(std::path::Path::new("seven.png"))?;
//! let result = context.predict_digit_image(&img)?;
//! println!("{} ({:.2})", result.prediction, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod models;
pub mod processors;
pub mod server;
pub mod service;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::config::{ModelInferenceConfig, OrtSessionConfig, ServiceConfig};
    pub use crate::core::traits::Classifier;
    pub use crate::core::{GlyphError, GlyphResult, init_tracing};
    pub use crate::domain::{
        DigitResponse, HealthStatus, LetterResponse, ModelKind, Prediction,
    };
    pub use crate::models::OnnxClassifier;
    pub use crate::processors::{ImageDecoder, LabelMapper, Normalizer, Topk};
    pub use crate::server::{build_router, serve};
    pub use crate::service::ServiceContext;
    pub use crate::utils::load_image;
}
