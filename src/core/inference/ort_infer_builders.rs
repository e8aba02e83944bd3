use super::*;
use crate::core::config::{ModelInferenceConfig, OrtGraphOptimizationLevel, OrtSessionConfig};
use ort::logging::LogLevel;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use std::path::Path;

/// Input names tried, in order, before falling back to the first declared input.
const COMMON_INPUT_NAMES: [&str; 6] = ["x", "input", "input_1", "images", "image", "data"];

impl OrtInfer {
    /// Creates a new OrtInfer with default ONNX Runtime settings and a single session.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, GlyphError> {
        Self::from_config(&ModelInferenceConfig::default(), model_path)
    }

    /// Creates a new OrtInfer from `ModelInferenceConfig`, applying the ORT session
    /// options and building a session pool for concurrent predictions.
    ///
    /// The input and output names are discovered from the first session.
    pub fn from_config(
        common: &ModelInferenceConfig,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, GlyphError> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(GlyphError::model_load_error::<GlyphError>(
                path,
                "model file not found",
                Some("check the model directory and file name"),
                None,
            ));
        }

        let pool_size = common.session_pool_size.max(1);
        let mut sessions = Vec::with_capacity(pool_size);

        let first_session = Self::build_session(path, common.ort_session.as_ref())?;

        let available_inputs: Vec<String> = first_session
            .inputs
            .iter()
            .map(|input| input.name.clone())
            .collect();
        let input_name = COMMON_INPUT_NAMES
            .iter()
            .find(|&name| available_inputs.iter().any(|input| input == *name))
            .map(|name| name.to_string())
            .or_else(|| available_inputs.first().cloned())
            .ok_or_else(|| {
                GlyphError::model_load_error::<GlyphError>(
                    path,
                    "model declares no inputs",
                    None,
                    None,
                )
            })?;

        let output_name = first_session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                GlyphError::model_load_error::<GlyphError>(
                    path,
                    "model declares no outputs",
                    None,
                    None,
                )
            })?;

        sessions.push(Mutex::new(first_session));
        for _ in 1..pool_size {
            sessions.push(Mutex::new(Self::build_session(
                path,
                common.ort_session.as_ref(),
            )?));
        }

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        tracing::debug!(
            model = %model_name,
            input = %input_name,
            output = %output_name,
            pool_size,
            "created ONNX Runtime sessions"
        );

        Ok(OrtInfer {
            sessions,
            next_idx: std::sync::atomic::AtomicUsize::new(0),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    fn build_session(path: &Path, cfg: Option<&OrtSessionConfig>) -> Result<Session, GlyphError> {
        let builder = Session::builder()?;
        let builder = match cfg {
            Some(cfg) => Self::apply_ort_config(builder, cfg)?,
            // Keep ORT quiet unless configured otherwise
            None => builder.with_log_level(LogLevel::Error)?,
        };
        builder.commit_from_file(path).map_err(|e| {
            GlyphError::model_load_error(
                path,
                "failed to create ONNX session",
                Some("verify the file is an ONNX export of the classifier"),
                Some(e),
            )
        })
    }

    fn apply_ort_config(
        mut builder: SessionBuilder,
        cfg: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        builder = builder.with_log_level(LogLevel::Error)?;
        if let Some(intra) = cfg.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = cfg.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(level) = cfg.optimization_level {
            let mapped = match level {
                OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
                OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
            };
            builder = builder.with_optimization_level(mapped)?;
        }
        Ok(builder)
    }
}
