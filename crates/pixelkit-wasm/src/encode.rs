//! Image encoding WASM bindings.
//!
//! This module exposes the pixelkit-core encoders to JavaScript, enabling
//! the export workflow to serialize processed surfaces as JPEG or PNG files.

use crate::types::JsSurface;
use pixelkit_core::codec;
use wasm_bindgen::prelude::*;

/// Encode a surface to JPEG bytes.
///
/// JPEG has no alpha channel; the surface's alpha is discarded.
///
/// # Arguments
///
/// * `surface` - The surface to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality; values
///   outside the range are clamped)
///
/// # Returns
///
/// A `Uint8Array` containing the JPEG-encoded bytes.
///
/// # Errors
///
/// Returns an error if the surface is empty or encoding fails internally.
///
/// # Example
///
/// ```typescript
/// const jpegBytes = encode_jpeg(surface, 90);
/// ```
#[wasm_bindgen]
pub fn encode_jpeg(surface: &JsSurface, quality: u8) -> Result<Vec<u8>, JsValue> {
    codec::encode_jpeg(surface.as_surface(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a surface to PNG bytes.
///
/// PNG is lossless and preserves the alpha channel. Upscale results should
/// always be exported through this function so the synthesized detail is not
/// recompressed away.
///
/// # Errors
///
/// Returns an error if the surface is empty or encoding fails internally.
#[wasm_bindgen]
pub fn encode_png(surface: &JsSurface) -> Result<Vec<u8>, JsValue> {
    codec::encode_png(surface.as_surface()).map_err(|e| JsValue::from_str(&e.to_string()))
}
