//! Image normalization for the glyph classifiers.
//!
//! Converts an arbitrary decoded bitmap into the `(1, 28, 28, 1)` tensor the
//! MNIST/EMNIST classifiers were trained on: luminance, 28x28 Lanczos
//! resampling, inversion (so ink becomes bright on a dark background) and
//! scaling into `[0, 1]`.

use crate::core::Tensor4D;
use crate::core::constants::{INPUT_SHAPE, INPUT_SIZE};
use crate::core::errors::{GlyphError, GlyphResult, ProcessingStage, SimpleError};
use crate::utils::dynamic_to_gray;
use image::DynamicImage;
use image::imageops::{self, FilterType};

/// Summary statistics of a normalized tensor, logged for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensorStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// A `(1, 28, 28, 1)` tensor with every value in `[0.0, 1.0]`.
///
/// Only [`Normalizer::normalize`] constructs this type, so holding one means
/// the shape and range are already established.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor(Tensor4D);

impl NormalizedTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn as_array(&self) -> &Tensor4D {
        &self.0
    }

    /// Computes min, max and mean over all elements.
    pub fn stats(&self) -> TensorStats {
        let (min, max) = self
            .0
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = self.0.mean().unwrap_or(0.0);
        TensorStats { min, max, mean }
    }
}

/// Turns decoded bitmaps into classifier input tensors.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    /// Output edge length in pixels.
    pub target_size: u32,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            target_size: INPUT_SIZE,
            filter: FilterType::Lanczos3,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a bitmap into a `(1, 28, 28, 1)` tensor.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingStage::Resize`] error for zero-sized images and a
    /// tensor error if the pixel buffer cannot be reshaped.
    pub fn normalize(&self, img: &DynamicImage) -> GlyphResult<NormalizedTensor> {
        if img.width() == 0 || img.height() == 0 {
            return Err(GlyphError::processing_error(
                ProcessingStage::Resize,
                "cannot resample an empty image",
                SimpleError::new(format!("image is {}x{}", img.width(), img.height())),
            ));
        }

        let gray = dynamic_to_gray(img);
        let resized = if gray.dimensions() == (self.target_size, self.target_size) {
            gray
        } else {
            imageops::resize(&gray, self.target_size, self.target_size, self.filter)
        };

        let data: Vec<f32> = resized
            .into_raw()
            .into_iter()
            .map(|v| (255 - v) as f32 / 255.0)
            .collect();

        let side = self.target_size as usize;
        let tensor = Tensor4D::from_shape_vec((INPUT_SHAPE[0], side, side, INPUT_SHAPE[3]), data)
            .map_err(|e| GlyphError::tensor_operation("reshape normalized pixels", e))?;

        let normalized = NormalizedTensor(tensor);
        let stats = normalized.stats();
        tracing::debug!(
            source_width = img.width(),
            source_height = img.height(),
            shape = ?normalized.shape(),
            min = stats.min,
            max = stats.max,
            mean = stats.mean,
            "normalized image"
        );
        Ok(normalized)
    }
}
