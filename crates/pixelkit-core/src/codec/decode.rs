use crate::error::PipelineError;
use crate::surface::{RasterSurface, MAX_TARGET_PIXELS};

/// Decode a compressed image (JPEG or PNG) into an RGBA surface.
///
/// The format is detected from the byte stream; callers never declare it.
///
/// # Arguments
///
/// * `data` - The raw bytes of the compressed image file
///
/// # Errors
///
/// Returns [`PipelineError::DecodeFailed`] for unrecognized or corrupt
/// data, and [`PipelineError::AllocationFailed`] when the decoded image
/// would exceed the working pixel ceiling.
pub fn decode_image(data: &[u8]) -> Result<RasterSurface, PipelineError> {
    let dynamic = image::load_from_memory(data)
        .map_err(|e| PipelineError::DecodeFailed(e.to_string()))?;

    let rgba = dynamic.into_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels = width as u64 * height as u64;
    if pixels > MAX_TARGET_PIXELS {
        return Err(PipelineError::AllocationFailed {
            pixels,
            ceiling: MAX_TARGET_PIXELS,
        });
    }

    Ok(RasterSurface::new(width, height, rgba.into_raw()))
}
