//! Top-level service configuration.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::ModelInferenceConfig;
use crate::core::constants::{
    DEFAULT_BODY_LIMIT_BYTES, DEFAULT_DIGIT_MODEL, DEFAULT_LETTER_MODEL, DEFAULT_MODEL_DIR,
    DEFAULT_PORT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration of the recognition service.
///
/// Loaded from defaults, optionally overlaid with a JSON file, and finally
/// with command-line flags or environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory the model file names are resolved against.
    pub model_dir: PathBuf,
    /// File name of the digit classifier inside `model_dir`.
    pub digit_model: String,
    /// File name of the letter classifier inside `model_dir`.
    pub letter_model: String,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
    /// Inference settings applied to both models.
    pub inference: ModelInferenceConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            digit_model: DEFAULT_DIGIT_MODEL.to_string(),
            letter_model: DEFAULT_LETTER_MODEL.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            inference: ModelInferenceConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Full path of the digit classifier artifact.
    pub fn digit_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.digit_model)
    }

    /// Full path of the letter classifier artifact.
    pub fn letter_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.letter_model)
    }

    /// Socket address string to bind, e.g. `0.0.0.0:5000`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigValidator for ServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_non_empty(&self.host, "host")?;
        self.validate_non_empty(&self.digit_model, "digit_model")?;
        self.validate_non_empty(&self.letter_model, "letter_model")?;
        self.validate_positive_usize(self.body_limit_bytes, "body_limit_bytes")?;
        self.validate_positive_usize(self.inference.session_pool_size, "session_pool_size")?;

        if let Some(ort) = &self.inference.ort_session {
            if let Some(intra) = ort.intra_threads {
                self.validate_thread_count(intra)?;
            }
            if let Some(inter) = ort.inter_threads {
                self.validate_thread_count(inter)?;
            }
        }

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_model_paths() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.digit_model_path(),
            Path::new("model").join("mnist_optimized.onnx")
        );
        assert_eq!(
            config.letter_model_path(),
            Path::new("model").join("emnist_optimized.onnx")
        );
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"port": 8080, "model_dir": "/opt/models"}"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.digit_model, "mnist_optimized.onnx");
        assert_eq!(
            config.digit_model_path(),
            Path::new("/opt/models").join("mnist_optimized.onnx")
        );
    }

    #[test]
    fn test_validation_rejects_zero_pool() {
        let mut config = ServiceConfig::default();
        config.inference.session_pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_model_name() {
        let config = ServiceConfig {
            letter_model: String::new(),
            ..ServiceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("letter_model"));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ServiceConfig::from_json_file("no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }

    #[test]
    fn test_from_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.json");
        std::fs::write(&path, r#"{"host": "127.0.0.1", "body_limit_bytes": 1024}"#).unwrap();

        let config = ServiceConfig::from_json_file(&path).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.body_limit_bytes, 1024);
        assert_eq!(config.port, 5000);
    }
}
