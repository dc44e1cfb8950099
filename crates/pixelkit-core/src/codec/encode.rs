use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::PipelineError;
use crate::surface::{RasterSurface, BYTES_PER_PIXEL};

/// Encode a surface as a JPEG with the given quality.
///
/// Quality is clamped to the 1-100 range the format defines. JPEG carries
/// no alpha channel, so the surface's alpha is discarded.
///
/// # Errors
///
/// Returns [`PipelineError::EncodeFailed`] if the encoder rejects the
/// surface or the underlying write fails.
pub fn encode_jpeg(surface: &RasterSurface, quality: u8) -> Result<Vec<u8>, PipelineError> {
    if surface.is_empty() {
        return Err(PipelineError::EncodeFailed("empty surface".to_string()));
    }

    let quality = quality.clamp(1, 100);

    let mut rgb = Vec::with_capacity(surface.width as usize * surface.height as usize * 3);
    for px in surface.pixels.chunks_exact(BYTES_PER_PIXEL) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder
        .write_image(&rgb, surface.width, surface.height, ExtendedColorType::Rgb8)
        .map_err(|e| PipelineError::EncodeFailed(e.to_string()))?;

    Ok(output)
}

/// Encode a surface as a PNG, preserving the alpha channel losslessly.
///
/// # Errors
///
/// Returns [`PipelineError::EncodeFailed`] if the encoder rejects the
/// surface or the underlying write fails.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, PipelineError> {
    if surface.is_empty() {
        return Err(PipelineError::EncodeFailed("empty surface".to_string()));
    }

    let mut output = Vec::new();
    let encoder = PngEncoder::new(&mut output);
    encoder
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PipelineError::EncodeFailed(e.to_string()))?;

    Ok(output)
}
