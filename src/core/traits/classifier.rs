//! The classifier seam between preprocessing and label decoding.

use crate::core::constants::INPUT_SHAPE;
use crate::core::errors::{GlyphError, GlyphResult};
use crate::processors::NormalizedTensor;
use std::fmt::Debug;

/// An opaque pre-trained classifier.
///
/// Implementations map a normalized `(1, 28, 28, 1)` tensor to one score per
/// class. They are shared across request handlers and must tolerate
/// concurrent calls.
pub trait Classifier: Send + Sync + Debug {
    /// Runs the classifier and returns the probability of every class.
    ///
    /// The returned vector has exactly [`Classifier::num_classes`] entries.
    fn predict(&self, input: &NormalizedTensor) -> GlyphResult<Vec<f32>>;

    /// Width of the output space, fixed when the classifier is loaded.
    fn num_classes(&self) -> usize;

    /// Name of the loaded model, used in logs and error messages.
    fn name(&self) -> &str;

    /// Short human-readable description (model name, backend).
    fn engine_info(&self) -> String {
        format!("{} ({} classes)", self.name(), self.num_classes())
    }

    /// Validates that the input has the shape the classifier expects.
    fn validate_inference_input(&self, input: &NormalizedTensor) -> GlyphResult<()> {
        if input.shape() != &INPUT_SHAPE[..] {
            return Err(GlyphError::invalid_input(format!(
                "expected tensor shape {:?}, got {:?}",
                INPUT_SHAPE,
                input.shape()
            )));
        }
        Ok(())
    }
}
