//! Utility functions for image loading and conversion.
//!
//! Color images are converted with ITU-R 601-2 luma weights in 16-bit fixed
//! point, matching the preprocessing the classifiers were trained with.
//! [`DynamicImage::to_luma8`] uses Rec. 709 weights and is not used for them.

use crate::core::constants::{MAX_DECODE_ALLOC_BYTES, MAX_IMAGE_SIDE};
use crate::core::errors::GlyphError;
use image::{DynamicImage, GrayImage, ImageBuffer, ImageReader, Limits, Luma};
use std::io::Cursor;

/// Fixed-point ITU-R 601-2 luma weights (R, G, B), scaled by 2^16.
const LUMA_WEIGHTS: [u32; 3] = [19595, 38470, 7471];

/// Converts one RGB pixel to 8-bit luminance.
///
/// `L = (R * 19595 + G * 38470 + B * 7471 + 0x8000) >> 16`
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let l = r as u32 * LUMA_WEIGHTS[0] + g as u32 * LUMA_WEIGHTS[1] + b as u32 * LUMA_WEIGHTS[2];
    ((l + 0x8000) >> 16) as u8
}

/// Converts a DynamicImage to a GrayImage.
///
/// Single-channel images keep their intensities. Alpha channels are dropped,
/// not composited. Color images go through [`rgb_to_luma`].
pub fn dynamic_to_gray(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(gray_alpha) => {
            ImageBuffer::from_fn(gray_alpha.width(), gray_alpha.height(), |x, y| {
                Luma([gray_alpha.get_pixel(x, y)[0]])
            })
        }
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => img.to_luma8(),
        _ => {
            let rgb = img.to_rgb8();
            ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
                let p = rgb.get_pixel(x, y);
                Luma([rgb_to_luma(p[0], p[1], p[2])])
            })
        }
    }
}

/// Decodes an in-memory raster image, guessing its format from the content.
///
/// Images wider or taller than [`MAX_IMAGE_SIDE`] are rejected before their
/// pixels are allocated.
///
/// # Errors
///
/// Returns [`GlyphError::ImageLoad`] for unknown formats, corrupt data and
/// images over the limits.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, GlyphError> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_SIDE);
    limits.max_image_height = Some(MAX_IMAGE_SIDE);
    limits.max_alloc = Some(MAX_DECODE_ALLOC_BYTES);
    reader.limits(limits);
    Ok(reader.decode()?)
}

/// Loads an image from a file path.
///
/// # Errors
///
/// Returns [`GlyphError::Io`] if the file cannot be read and
/// [`GlyphError::ImageLoad`] if its content is not a decodable image.
pub fn load_image(path: &std::path::Path) -> Result<DynamicImage, GlyphError> {
    let bytes = std::fs::read(path)?;
    decode_image_bytes(&bytes)
}
