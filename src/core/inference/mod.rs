//! ONNX Runtime inference.
//!
//! [`OrtInfer`] owns the sessions of one model file and runs the forward pass;
//! the classifier adapters in [`crate::models`] sit on top of it.

pub mod ort_infer;

pub use ort_infer::OrtInfer;
