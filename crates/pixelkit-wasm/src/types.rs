//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixelkit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixelkit_core::surface::RasterSurface;
use wasm_bindgen::prelude::*;

/// A raster surface wrapper for JavaScript.
///
/// This type wraps the core `RasterSurface` type and provides a
/// JavaScript-friendly interface for accessing image dimensions and RGBA
/// pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. For performance-critical
/// code, keep the surface in WASM memory and only extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsSurface {
    inner: RasterSurface,
}

#[wasm_bindgen]
impl JsSurface {
    /// Create a new JsSurface from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSurface {
        JsSurface {
            inner: RasterSurface::new(width, height, pixels),
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data. For large images, this can
    /// take 10-50ms but is necessary for safe memory management.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this if you want to immediately release memory for
    /// a large image.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSurface {
    /// Wrap a core surface. Internal constructor used by the op bindings.
    pub(crate) fn from_surface(surface: RasterSurface) -> Self {
        Self { inner: surface }
    }

    /// Borrow the wrapped core surface.
    pub(crate) fn as_surface(&self) -> &RasterSurface {
        &self.inner
    }

    /// Clone out the wrapped core surface for consuming operations.
    pub(crate) fn to_surface(&self) -> RasterSurface {
        self.inner.clone()
    }
}
