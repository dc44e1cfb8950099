//! Owned RGBA pixel surfaces.
//!
//! `RasterSurface` is the unit of ownership in the pipeline: each stage takes a
//! surface, produces a new one (or mutates its own in place), and hands it
//! forward. Surfaces are never shared between concurrent operations.

use serde::{Deserialize, Serialize};

/// Pixel-count ceiling for in-place pixel-array operations.
///
/// Operations that allocate or walk a full-resolution buffer reject (or, for
/// cosmetic passes, silently skip) surfaces above this size. 25M pixels is a
/// 5000x5000 image, roughly the largest thing worth touching synchronously on
/// constrained hardware.
pub const MAX_TARGET_PIXELS: u64 = 25_000_000;

/// Number of bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An owned 2D buffer of RGBA pixel values.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a new surface from dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Allocate a blank (transparent black) surface.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Create a surface from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Width / height as a float ratio. Returns 1.0 for degenerate surfaces.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Check if this is an empty/invalid surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Get the RGBA values of one pixel. Caller must pass in-bounds coordinates.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Overwrite one pixel. Caller must pass in-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Alpha-blend `src` over the pixel at (x, y) using source-over compositing.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        if src[3] == 0 {
            return;
        }
        let dst = self.pixel(x, y);
        let a = src[3] as f32 / 255.0;
        let inv = 1.0 - a;
        let out = [
            (dst[0] as f32 * inv + src[0] as f32 * a).round().clamp(0.0, 255.0) as u8,
            (dst[1] as f32 * inv + src[1] as f32 * a).round().clamp(0.0, 255.0) as u8,
            (dst[2] as f32 * inv + src[2] as f32 * a).round().clamp(0.0, 255.0) as u8,
            (src[3] as f32 + dst[3] as f32 * inv).round().clamp(0.0, 255.0) as u8,
        ];
        self.set_pixel(x, y, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_creation() {
        let pixels = vec![0u8; 100 * 50 * 4];
        let surf = RasterSurface::new(100, 50, pixels);

        assert_eq!(surf.width, 100);
        assert_eq!(surf.height, 50);
        assert_eq!(surf.pixel_count(), 5000);
        assert_eq!(surf.byte_size(), 20000);
        assert!(!surf.is_empty());
    }

    #[test]
    fn test_surface_empty() {
        let surf = RasterSurface::new(0, 0, vec![]);
        assert!(surf.is_empty());
    }

    #[test]
    fn test_blank_is_transparent() {
        let surf = RasterSurface::blank(4, 4);
        assert!(surf.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut surf = RasterSurface::blank(10, 10);
        surf.set_pixel(3, 7, [10, 20, 30, 255]);
        assert_eq!(surf.pixel(3, 7), [10, 20, 30, 255]);
    }

    #[test]
    fn test_blend_pixel_opaque_replaces() {
        let mut surf = RasterSurface::blank(2, 2);
        surf.set_pixel(0, 0, [100, 100, 100, 255]);
        surf.blend_pixel(0, 0, [200, 0, 0, 255]);
        assert_eq!(surf.pixel(0, 0), [200, 0, 0, 255]);
    }

    #[test]
    fn test_blend_pixel_transparent_noop() {
        let mut surf = RasterSurface::blank(2, 2);
        surf.set_pixel(0, 0, [100, 100, 100, 255]);
        surf.blend_pixel(0, 0, [200, 0, 0, 0]);
        assert_eq!(surf.pixel(0, 0), [100, 100, 100, 255]);
    }

    #[test]
    fn test_blend_pixel_half_alpha() {
        let mut surf = RasterSurface::blank(1, 1);
        surf.set_pixel(0, 0, [0, 0, 0, 255]);
        surf.blend_pixel(0, 0, [255, 255, 255, 128]);
        let px = surf.pixel(0, 0);
        // ~50% gray, within rounding
        assert!((px[0] as i32 - 128).abs() <= 1);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_aspect_ratio() {
        let surf = RasterSurface::blank(200, 100);
        assert!((surf.aspect_ratio() - 2.0).abs() < f64::EPSILON);

        let degenerate = RasterSurface::new(0, 0, vec![]);
        assert!((degenerate.aspect_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rgba_image_roundtrip() {
        let mut surf = RasterSurface::blank(3, 2);
        surf.set_pixel(2, 1, [1, 2, 3, 4]);

        let img = surf.to_rgba_image().unwrap();
        let back = RasterSurface::from_rgba_image(img);
        assert_eq!(back, surf);
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }
}
