//! Trait definitions for the recognition pipeline.

pub mod classifier;

pub use classifier::Classifier;
