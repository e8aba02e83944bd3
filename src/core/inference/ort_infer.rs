//! ONNX Runtime inference engine with a small pool of locked sessions.

use crate::core::{Tensor2D, Tensor4D, errors::GlyphError};
use ort::{session::Session, value::ValueType};
use std::path::Path;
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// A loaded ONNX model.
///
/// `Session::run` needs exclusive access, so every session sits behind its own
/// mutex and calls are spread round-robin over the pool. The pool belongs to a
/// single model: two `OrtInfer` instances never share a lock.
pub struct OrtInfer {
    pub(super) sessions: Vec<Mutex<Session>>,
    pub(super) next_idx: std::sync::atomic::AtomicUsize,
    pub(super) input_name: String,
    pub(super) output_name: String,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Declared shape of the output tensor read after each run.
    ///
    /// Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn primary_output_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.sessions.first()?.lock().ok()?;
        let output = session_guard
            .outputs
            .iter()
            .find(|o| o.name == self.output_name)?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Returns the number of sessions in the pool.
    pub fn pool_size(&self) -> usize {
        self.sessions.len()
    }
}

/// Shorthand for the `[batch, classes]` output used by the classifiers.
pub(crate) fn expect_2d(
    model_name: &str,
    output_shape: &[i64],
    output_data: &[f32],
) -> Result<Tensor2D, GlyphError> {
    let (rows, cols) = match output_shape {
        [n] => (1, *n as usize),
        [b, n] => (*b as usize, *n as usize),
        other => {
            return Err(GlyphError::inference_error(
                model_name,
                &format!("expected a 1D or 2D output tensor, got shape {:?}", other),
                crate::core::errors::SimpleError::new("Invalid output tensor dimensions"),
            ));
        }
    };

    if output_data.len() != rows * cols {
        return Err(GlyphError::inference_error(
            model_name,
            &format!(
                "output data size mismatch: expected {}, got {}",
                rows * cols,
                output_data.len()
            ),
            crate::core::errors::SimpleError::new("Output tensor data size mismatch"),
        ));
    }

    let view = ndarray::ArrayView2::from_shape((rows, cols), output_data)?;
    Ok(view.to_owned())
}

/// Class count declared by an output shape.
///
/// Returns `None` when the last dimension is dynamic. Shapes that `expect_2d`
/// would reject at run time are rejected here, at load time.
pub(crate) fn declared_output_width(
    model_path: &Path,
    shape: &[i64],
) -> Result<Option<usize>, GlyphError> {
    match shape {
        [] => Ok(None),
        [n] | [_, n] => Ok((*n > 0).then_some(*n as usize)),
        other => Err(GlyphError::model_load_error::<GlyphError>(
            model_path,
            &format!("expected a 1D or 2D classifier output, got shape {other:?}"),
            None,
            None,
        )),
    }
}

/// Builds the zero tensor used to probe a model's output width.
pub(crate) fn probe_tensor() -> Tensor4D {
    Tensor4D::zeros(crate::core::constants::INPUT_SHAPE)
}
