//! Model implementations behind the [`Classifier`](crate::core::traits::Classifier) trait.

pub mod glyph;

pub use glyph::*;
