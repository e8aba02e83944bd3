//! Decoding of transport-encoded images.
//!
//! Clients send the bitmap either as a data-URI (`data:image/png;base64,....`)
//! or as a bare base64 string. Everything up to and including the first comma
//! is treated as the scheme prefix and discarded.

use crate::core::errors::{GlyphError, GlyphResult};
use crate::utils::{decode_image_bytes, load_image};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use std::path::Path;

/// Decodes base64 or data-URI strings into raster images.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Returns the base64 payload of a data-URI or raw base64 string.
    pub fn payload(input: &str) -> &str {
        match input.split_once(',') {
            Some((_scheme, payload)) => payload,
            None => input,
        }
    }

    /// Decodes the base64 payload into raw bytes.
    ///
    /// ASCII whitespace anywhere in the payload is ignored.
    pub fn decode_bytes(&self, input: &str) -> GlyphResult<Vec<u8>> {
        let payload: String = Self::payload(input)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if payload.is_empty() {
            return Err(GlyphError::invalid_input("image payload is empty"));
        }
        Ok(STANDARD.decode(payload.as_bytes())?)
    }

    /// Decodes a transport-encoded string into an image.
    ///
    /// # Errors
    ///
    /// * [`GlyphError::InvalidInput`] for an empty payload
    /// * [`GlyphError::Base64`] for malformed base64
    /// * [`GlyphError::ImageLoad`] when the bytes are not a supported raster
    ///   format or the image exceeds the decode limits
    pub fn decode(&self, input: &str) -> GlyphResult<DynamicImage> {
        let bytes = self.decode_bytes(input)?;
        let img = decode_image_bytes(&bytes)?;
        tracing::debug!(
            encoded_len = input.len(),
            decoded_bytes = bytes.len(),
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "decoded image"
        );
        Ok(img)
    }

    /// Reads and decodes an image file.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> GlyphResult<DynamicImage> {
        load_image(path.as_ref())
    }
}
