//! The compositor: crop, resize, and watermark drawing.
//!
//! # Operation Order
//!
//! When several operations are requested together via [`composite`]:
//! 1. Crop. When a crop region is present, resize options are ignored;
//!    the crop alone determines the output dimensions.
//! 2. Resize (only when no crop was requested).
//! 3. Watermark, always last, so its size and position are computed against
//!    the final output dimensions.

mod crop;
mod resize;
mod watermark;

pub use crop::crop;
pub use resize::{resize, resize_to, resolve_resize_dimensions, ResizeSpec};
pub use watermark::{composite_watermark, WatermarkSpec, WatermarkVariant};

use crate::error::PipelineError;
use crate::geometry::PixelRect;
use crate::surface::{FilterType, RasterSurface};

/// A combined compositing request.
#[derive(Debug, Clone, Default)]
pub struct CompositeOptions {
    /// Sub-rectangle to extract, already resolved to pixel space.
    pub crop: Option<PixelRect>,
    /// Target dimensions. Ignored when `crop` is present.
    pub resize: Option<ResizeSpec>,
    /// Watermark to draw onto the final surface.
    pub watermark: Option<WatermarkSpec>,
}

/// Run a full compositing request against a surface.
///
/// Consumes the input surface and returns the output surface; each stage's
/// intermediate result is dropped as soon as the next stage supersedes it.
pub fn composite(
    surface: RasterSurface,
    options: CompositeOptions,
) -> Result<RasterSurface, PipelineError> {
    let mut current = surface;

    // Crop takes precedence over resize when both are specified.
    if let Some(rect) = options.crop {
        current = crop(&current, rect)?;
    } else if let Some(spec) = options.resize {
        current = resize(&current, &spec, FilterType::Lanczos3)?;
    }

    if let Some(spec) = options.watermark {
        composite_watermark(&mut current, &spec);
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AnchorPoint;

    fn gray_surface(width: u32, height: u32) -> RasterSurface {
        let mut s = RasterSurface::blank(width, height);
        for px in s.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[128, 128, 128, 255]);
        }
        s
    }

    #[test]
    fn test_crop_overrides_resize() {
        let src = gray_surface(1000, 500);
        let options = CompositeOptions {
            crop: Some(PixelRect { x: 100, y: 50, width: 500, height: 300 }),
            resize: Some(ResizeSpec::Exact {
                width: Some(64),
                height: Some(64),
            }),
            watermark: None,
        };
        let out = composite(src, options).unwrap();
        // Resize options are ignored when a crop region is present
        assert_eq!(out.width, 500);
        assert_eq!(out.height, 300);
    }

    #[test]
    fn test_resize_applies_without_crop() {
        let src = gray_surface(200, 100);
        let options = CompositeOptions {
            crop: None,
            resize: Some(ResizeSpec::Exact {
                width: Some(100),
                height: None,
            }),
            watermark: None,
        };
        let out = composite(src, options).unwrap();
        assert_eq!(out.width, 100);
        assert_eq!(out.height, 50);
    }

    #[test]
    fn test_empty_options_identity() {
        let src = gray_surface(50, 50);
        let expected = src.clone();
        let out = composite(src, CompositeOptions::default()).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_end_to_end_crop_then_watermark() {
        // Source 1000x500, crop {100, 50, 500, 300}, then "SAMPLE" at center.
        let src = gray_surface(1000, 500);
        let options = CompositeOptions {
            crop: Some(PixelRect { x: 100, y: 50, width: 500, height: 300 }),
            resize: None,
            watermark: Some(WatermarkSpec {
                variant: WatermarkVariant::Text {
                    content: "SAMPLE".to_string(),
                    color: [255, 0, 0],
                },
                anchor: AnchorPoint { x: 50.0, y: 50.0 },
                opacity: 1.0,
                rotation_degrees: 0.0,
                scale: 1.0,
            }),
        };
        let out = composite(src, options).unwrap();

        // Watermark never changes dimensions
        assert_eq!(out.width, 500);
        assert_eq!(out.height, 300);

        // The watermark's bounding pixels landed inside the surface: some
        // center pixels changed away from the uniform gray.
        let changed = out
            .pixels
            .chunks_exact(4)
            .any(|px| px[0] != 128 || px[1] != 128 || px[2] != 128);
        assert!(changed, "watermark should have drawn visible pixels");
    }

    #[test]
    fn test_watermark_uses_final_dimensions() {
        // Watermark on a cropped surface must not read the pre-crop size:
        // the anchor at 50%,50% of a 100x100 crop lands near (50, 50).
        let mut src = gray_surface(1000, 1000);
        // Mark the source center so we know crop picked the right region
        src.set_pixel(500, 500, [1, 2, 3, 255]);

        let options = CompositeOptions {
            crop: Some(PixelRect { x: 0, y: 0, width: 100, height: 100 }),
            resize: None,
            watermark: Some(WatermarkSpec {
                variant: WatermarkVariant::Text {
                    content: "X".to_string(),
                    color: [0, 0, 255],
                },
                anchor: AnchorPoint { x: 50.0, y: 50.0 },
                opacity: 1.0,
                rotation_degrees: 0.0,
                scale: 1.0,
            }),
        };
        let out = composite(src, options).unwrap();
        assert_eq!(out.width, 100);
        assert_eq!(out.height, 100);

        // Blue ink near the crop's own center
        let center_region_changed = (40..60).any(|y| {
            (40..60).any(|x| {
                let px = out.pixel(x, y);
                px[2] > px[0]
            })
        });
        assert!(center_region_changed);
    }
}
