//! Pixelkit WASM - WebAssembly bindings for Pixelkit
//!
//! This crate provides WASM bindings to expose the pixelkit-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG, PNG)
//! - `encode` - Image encoding bindings (JPEG and PNG export)
//! - `compose` - Crop, resize, and watermark bindings
//! - `upscale` - Enhancement filter and smart upscale bindings
//! - `geometry` - Crop-box and watermark-anchor drag controllers
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, upscale, encode_png } from '@pixelkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Decode, upscale 2x, export as PNG
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const surface = decode_image(bytes);
//! const big = upscale(surface, 2, 0.5, Date.now() >>> 0);
//! const png = encode_png(big);
//! ```

use wasm_bindgen::prelude::*;

mod compose;
mod decode;
mod encode;
mod geometry;
mod types;
mod upscale;

// Re-export public types
pub use compose::{
    add_watermark_logo, add_watermark_text, crop, process_image, resize_bounds, resize_exact,
};
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use geometry::{resolve_crop_rect, CropDrag, WatermarkDrag};
pub use types::JsSurface;
pub use upscale::{enhance, upscale};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Simple function to verify WASM is working
#[wasm_bindgen]
pub fn greet(name: &str) -> String {
    format!("Hello, {}! Pixelkit WASM is ready.", name)
}
