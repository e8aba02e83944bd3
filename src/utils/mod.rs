//! Utility functions for the recognition pipeline.

pub mod image;

pub use image::{decode_image_bytes, dynamic_to_gray, load_image, rgb_to_luma};
