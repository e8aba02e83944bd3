//! ONNX-backed glyph classifier.
//!
//! Wraps an [`OrtInfer`] pool and validates every output against the class
//! count discovered when the model was loaded.

use crate::core::config::ModelInferenceConfig;
use crate::core::errors::{GlyphError, GlyphResult, ProcessingStage, SimpleError};
use crate::core::Tensor2D;
use crate::core::inference::OrtInfer;
use crate::core::traits::Classifier;
use crate::processors::NormalizedTensor;
use std::path::Path;

/// A pre-trained classifier loaded from an ONNX artifact.
#[derive(Debug)]
pub struct OnnxClassifier {
    /// ONNX Runtime inference engine
    inference: OrtInfer,
    /// Width of the output probability vector
    num_classes: usize,
}

impl OnnxClassifier {
    /// Loads the model at `path` and determines its output width.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ModelLoad`] if the artifact is missing or cannot
    /// be parsed, or if it reports an empty output space.
    pub fn load(path: impl AsRef<Path>, config: &ModelInferenceConfig) -> GlyphResult<Self> {
        let path = path.as_ref();
        let inference = OrtInfer::from_config(config, path)?;
        let num_classes = inference.output_width()?;
        if num_classes == 0 {
            return Err(GlyphError::model_load_error(
                path,
                "model output has no classes",
                None,
                None::<SimpleError>,
            ));
        }

        tracing::info!(
            model = inference.model_name(),
            path = %path.display(),
            num_classes,
            sessions = inference.pool_size(),
            "loaded classifier"
        );
        Ok(Self {
            inference,
            num_classes,
        })
    }

}

/// Takes the single prediction row out of a `[batch, classes]` output and
/// checks it has one score per class.
fn first_row(output: &Tensor2D, num_classes: usize) -> GlyphResult<Vec<f32>> {
    let row: Vec<f32> = output
        .outer_iter()
        .next()
        .map(|r| r.to_vec())
        .unwrap_or_default();

    if row.len() != num_classes {
        return Err(GlyphError::processing_error(
            ProcessingStage::PostProcessing,
            "unexpected classifier output width",
            SimpleError::new(format!("expected {num_classes} scores, got {}", row.len())),
        ));
    }
    Ok(row)
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &NormalizedTensor) -> GlyphResult<Vec<f32>> {
        self.validate_inference_input(input)?;
        let output = self.inference.infer_2d(input.as_array())?;
        first_row(&output, self.num_classes)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn name(&self) -> &str {
        self.inference.model_name()
    }

    fn engine_info(&self) -> String {
        format!(
            "onnx:{} ({} classes, {} sessions)",
            self.inference.model_name(),
            self.num_classes,
            self.inference.pool_size()
        )
    }
}
