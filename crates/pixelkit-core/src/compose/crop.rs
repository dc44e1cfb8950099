//! Sub-rectangle extraction.

use crate::error::PipelineError;
use crate::geometry::PixelRect;
use crate::surface::{RasterSurface, BYTES_PER_PIXEL, MAX_TARGET_PIXELS};

/// Extract a sub-rectangle of a surface into a new surface.
///
/// The rectangle must already be resolved and in bounds; clamping a
/// user-supplied region happens at the geometry-resolution stage
/// (`NormalizedRect::to_pixel_rect`), not here. A rectangle that is out of
/// bounds or has zero area is an [`PipelineError::InvalidRegion`].
///
/// # Errors
///
/// - `InvalidRegion` if the rect has zero area or extends past the source.
/// - `AllocationFailed` if the rect covers more than [`MAX_TARGET_PIXELS`].
pub fn crop(surface: &RasterSurface, rect: PixelRect) -> Result<RasterSurface, PipelineError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(PipelineError::InvalidRegion(format!(
            "crop rect has zero area ({}x{})",
            rect.width, rect.height
        )));
    }

    let right = rect.x.checked_add(rect.width);
    let bottom = rect.y.checked_add(rect.height);
    match (right, bottom) {
        (Some(r), Some(b)) if r <= surface.width && b <= surface.height => {}
        _ => {
            return Err(PipelineError::InvalidRegion(format!(
                "crop rect {}x{}+{}+{} outside {}x{} surface",
                rect.width, rect.height, rect.x, rect.y, surface.width, surface.height
            )));
        }
    }

    let pixels = rect.width as u64 * rect.height as u64;
    if pixels > MAX_TARGET_PIXELS {
        return Err(PipelineError::AllocationFailed {
            pixels,
            ceiling: MAX_TARGET_PIXELS,
        });
    }

    let mut output = vec![0u8; rect.width as usize * rect.height as usize * BYTES_PER_PIXEL];
    let src_stride = surface.width as usize * BYTES_PER_PIXEL;
    let dst_stride = rect.width as usize * BYTES_PER_PIXEL;

    // Row-at-a-time copy
    for row in 0..rect.height as usize {
        let src_start = (rect.y as usize + row) * src_stride + rect.x as usize * BYTES_PER_PIXEL;
        let dst_start = row * dst_stride;
        output[dst_start..dst_start + dst_stride]
            .copy_from_slice(&surface.pixels[src_start..src_start + dst_stride]);
    }

    Ok(RasterSurface::new(rect.width, rect.height, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test surface where each pixel encodes its position.
    fn test_surface(width: u32, height: u32) -> RasterSurface {
        let mut surface = RasterSurface::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                surface.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        surface
    }

    #[test]
    fn test_crop_basic() {
        let src = test_surface(100, 100);
        let out = crop(&src, PixelRect { x: 25, y: 25, width: 50, height: 50 }).unwrap();
        assert_eq!(out.width, 50);
        assert_eq!(out.height, 50);
        // First output pixel comes from (25, 25)
        assert_eq!(out.pixel(0, 0), src.pixel(25, 25));
    }

    #[test]
    fn test_crop_full_surface_identity() {
        let src = test_surface(40, 30);
        let out = crop(&src, PixelRect { x: 0, y: 0, width: 40, height: 30 }).unwrap();
        assert_eq!(out.pixels, src.pixels);
    }

    #[test]
    fn test_crop_rectangular_strip() {
        let src = test_surface(200, 100);
        let out = crop(&src, PixelRect { x: 0, y: 0, width: 50, height: 100 }).unwrap();
        assert_eq!(out.width, 50);
        assert_eq!(out.height, 100);
    }

    #[test]
    fn test_crop_preserves_pixel_values() {
        let src = test_surface(10, 10);
        let out = crop(&src, PixelRect { x: 3, y: 3, width: 4, height: 4 }).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), src.pixel(x + 3, y + 3));
            }
        }
    }

    #[test]
    fn test_crop_zero_area_rejected() {
        let src = test_surface(10, 10);
        let err = crop(&src, PixelRect { x: 0, y: 0, width: 0, height: 5 }).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRegion(_)));
    }

    #[test]
    fn test_crop_out_of_bounds_rejected() {
        let src = test_surface(10, 10);
        let err = crop(&src, PixelRect { x: 8, y: 8, width: 5, height: 5 }).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRegion(_)));
    }

    #[test]
    fn test_crop_overflow_rejected() {
        let src = test_surface(10, 10);
        let err = crop(
            &src,
            PixelRect { x: u32::MAX, y: 0, width: 2, height: 2 },
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRegion(_)));
    }

    #[test]
    fn test_crop_exact_output_dimensions() {
        // 1000x500 source, crop {100, 50, 500, 300} -> exactly 500x300
        let src = test_surface(1000, 500);
        let out = crop(&src, PixelRect { x: 100, y: 50, width: 500, height: 300 }).unwrap();
        assert_eq!(out.width, 500);
        assert_eq!(out.height, 300);
    }

    #[test]
    fn test_crop_alpha_preserved() {
        let mut src = RasterSurface::blank(10, 10);
        src.set_pixel(5, 5, [9, 9, 9, 77]);
        let out = crop(&src, PixelRect { x: 5, y: 5, width: 2, height: 2 }).unwrap();
        assert_eq!(out.pixel(0, 0), [9, 9, 9, 77]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
