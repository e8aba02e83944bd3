//! Image processing and output decoding for the glyph classifiers.
//!
//! # Modules
//!
//! * `decode` - Base64 and data-URI decoding into raster images
//! * `normalization` - Luminance, resampling and scaling into model tensors
//! * `topk` - Deterministic ranking of classifier outputs
//! * `labels` - Class index to digit/letter mapping

mod decode;
mod labels;
mod normalization;
mod topk;

pub use decode::ImageDecoder;
pub use labels::{LabelMapper, LetterIndexScheme};
pub use normalization::{NormalizedTensor, Normalizer, TensorStats};
pub use topk::{Topk, TopkResult};
