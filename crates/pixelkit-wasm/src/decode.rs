//! Image decoding WASM bindings.
//!
//! Exposes format-sniffing decode to JavaScript so the editing pipeline can
//! take the raw bytes of an uploaded file directly.

use crate::types::JsSurface;
use pixelkit_core::codec;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG file into an RGBA surface.
///
/// The format is detected from the bytes; the caller does not declare it.
///
/// # Arguments
///
/// * `data` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsSurface` holding the decoded RGBA pixels.
///
/// # Errors
///
/// Returns an error if the data is not a recognizable JPEG or PNG, or if the
/// decoded image would exceed the working pixel ceiling.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const surface = decode_image(bytes);
/// console.log(`Decoded ${surface.width}x${surface.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(data: &[u8]) -> Result<JsSurface, JsValue> {
    codec::decode_image(data)
        .map(JsSurface::from_surface)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for decode bindings.
///
/// Note: `decode_image` returns `Result<T, JsValue>`, which only works on
/// wasm32 targets. Native tests exercise the core decoder directly; see also
/// the tests in `pixelkit_core::codec`.
#[cfg(test)]
mod tests {
    #[test]
    fn test_core_decode_roundtrip() {
        let surface = pixelkit_core::surface::RasterSurface::blank(4, 4);
        let bytes = pixelkit_core::codec::encode_png(&surface).unwrap();
        let decoded = pixelkit_core::codec::decode_image(&bytes).unwrap();
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 4);
    }
}
