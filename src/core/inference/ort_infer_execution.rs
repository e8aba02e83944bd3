use super::*;
use crate::core::errors::SimpleError;
use ort::value::TensorRef;

impl OrtInfer {
    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn run_inference_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> Result<T, GlyphError>,
    ) -> Result<T, GlyphError> {
        let input_shape = x.shape().to_vec();
        let output_name = &self.output_name;

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            GlyphError::inference_error(
                &self.model_name,
                &format!("failed to convert input tensor with shape {:?}", input_shape),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let idx = self
            .next_idx
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            % self.sessions.len();
        let mut session_guard = self.sessions[idx].lock().map_err(|_| {
            GlyphError::inference_error(
                &self.model_name,
                &format!(
                    "failed to acquire session lock for session {}/{}",
                    idx,
                    self.sessions.len()
                ),
                SimpleError::new("session mutex poisoned"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            GlyphError::inference_error(
                &self.model_name,
                &format!(
                    "forward pass failed with input '{}' -> output '{}'",
                    self.input_name, output_name
                ),
                e,
            )
        })?;

        let output = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                GlyphError::inference_error(
                    &self.model_name,
                    &format!("failed to extract output tensor '{}' as f32", output_name),
                    e,
                )
            })?;
        let (output_shape, output_data) = output;

        processor(output_shape, output_data)
    }

    /// Runs the model and returns its `[batch, classes]` output.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, GlyphError> {
        self.run_inference_with_processor(x, |output_shape, output_data| {
            expect_2d(&self.model_name, output_shape, output_data)
        })
    }

    /// Number of classes the model predicts.
    ///
    /// Taken from the static last dimension of the output when the model
    /// declares one; otherwise a zero tensor is run through the model once.
    /// Outputs of rank above 2 are rejected as a load error.
    pub fn output_width(&self) -> Result<usize, GlyphError> {
        let shape = self.primary_output_shape().unwrap_or_default();
        if let Some(width) = declared_output_width(&self.model_path, &shape)? {
            return Ok(width);
        }

        tracing::debug!(model = %self.model_name, "output width is dynamic, probing");
        let output = self.infer_2d(&probe_tensor())?;
        Ok(output.ncols())
    }
}
