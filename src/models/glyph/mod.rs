//! Glyph classification models.

pub mod onnx_classifier;

pub use onnx_classifier::OnnxClassifier;
