//! Error types for the recognition service.
//!
//! This module defines the errors that can occur while decoding an uploaded
//! bitmap, normalizing it into a model tensor, loading a classifier, and running
//! inference. Helper constructors attach the context that ends up in logs and,
//! for HTTP callers, in the `error` field of the response body.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stage of the preprocessing pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Transport decoding (data-URI splitting, base64, raster decoding).
    Decode,
    /// Luminance conversion.
    Grayscale,
    /// Resampling to the model input resolution.
    Resize,
    /// Inversion and scaling into `[0, 1]`.
    Normalization,
    /// Tensor construction or reshaping.
    TensorOperation,
    /// Output validation and label mapping.
    PostProcessing,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Decode => write!(f, "decode"),
            ProcessingStage::Grayscale => write!(f, "grayscale conversion"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
        }
    }
}

/// Errors produced by the recognition pipeline.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// The decoded bytes are not an image the raster decoder understands.
    #[error("image decode: {0}")]
    ImageLoad(#[source] image::ImageError),

    /// The payload is not valid base64.
    #[error("base64 decode: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A preprocessing step failed.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Running a classifier failed.
    #[error("inference failed for model '{model_name}': {context}")]
    Inference {
        /// Name of the model that failed.
        model_name: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A model artifact could not be loaded.
    #[error("failed to load model '{}': {reason}", .path.display())]
    ModelLoad {
        /// Path of the artifact.
        path: PathBuf,
        /// What went wrong, including any hint for the operator.
        reason: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The classifier for the requested route was never loaded.
    #[error("{model} model not loaded")]
    ModelUnavailable {
        /// Display name of the missing model, e.g. `MNIST`.
        model: String,
    },

    /// The caller supplied input that cannot be processed.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// A configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor shape operations.
    #[error("tensor operation: {0}")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for pipeline operations.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// A plain message error used as the `source` of wrapped errors.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SimpleError {}

impl GlyphError {
    /// Creates a processing error for the given stage.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a tensor operation error.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::TensorOperation, context, error)
    }

    /// Creates an error for an invalid request input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates an inference error for the named model.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for a model that is not loaded.
    pub fn model_unavailable(model: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
        }
    }

    /// Creates a model loading error.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the model artifact.
    /// * `reason` - Short description of the failure.
    /// * `suggestion` - Optional operator hint.
    /// * `source` - Optional underlying error.
    pub fn model_load_error<E>(
        path: &Path,
        reason: &str,
        suggestion: Option<&str>,
        source: Option<E>,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let reason = match suggestion {
            Some(hint) => format!("{reason} ({hint})"),
            None => reason.to_string(),
        };
        Self::ModelLoad {
            path: path.to_path_buf(),
            reason,
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Returns true when the error was caused by the request content rather
    /// than by the deployment or the runtime.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::ImageLoad(_) | Self::Base64(_) | Self::InvalidInput { .. } => true,
            Self::Processing { kind, .. } => !matches!(kind, ProcessingStage::PostProcessing),
            _ => false,
        }
    }
}

impl From<image::ImageError> for GlyphError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for GlyphError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_message() {
        let err = GlyphError::model_unavailable("EMNIST");
        assert_eq!(err.to_string(), "EMNIST model not loaded");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(GlyphError::invalid_input("missing").is_client_error());
        assert!(
            GlyphError::processing_error(
                ProcessingStage::Resize,
                "zero-sized image",
                SimpleError::new("width is 0"),
            )
            .is_client_error()
        );
        assert!(
            !GlyphError::processing_error(
                ProcessingStage::PostProcessing,
                "output width mismatch",
                SimpleError::new("expected 10"),
            )
            .is_client_error()
        );
        assert!(
            !GlyphError::inference_error("mnist", "forward pass", SimpleError::new("boom"))
                .is_client_error()
        );
    }

    #[test]
    fn test_model_load_error_includes_suggestion() {
        let err = GlyphError::model_load_error::<SimpleError>(
            Path::new("model/mnist.onnx"),
            "file not found",
            Some("check --model-dir"),
            None,
        );
        let msg = err.to_string();
        assert!(msg.contains("model/mnist.onnx"));
        assert!(msg.contains("file not found"));
        assert!(msg.contains("check --model-dir"));
    }
}
