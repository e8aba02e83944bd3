use glyph_serve::core::ServiceConfig;
use glyph_serve::core::errors::GlyphResult;
use glyph_serve::domain::ModelKind;
use glyph_serve::service::ServiceContext;
use std::path::Path;

/// Classifies one image file and prints the same payload the HTTP API returns.
pub fn handle_predict(config: &ServiceConfig, kind: ModelKind, image: &Path) -> GlyphResult<()> {
    let context = ServiceContext::load_only(config, kind)?;
    let img = context.decode_file(image)?;

    let json = match kind {
        ModelKind::Digit => serde_json::to_string_pretty(&context.predict_digit_image(&img)?),
        ModelKind::Letter => serde_json::to_string_pretty(&context.predict_letter_image(&img)?),
    }
    .map_err(std::io::Error::other)?;

    println!("{json}");
    Ok(())
}
