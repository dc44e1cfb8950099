//! Iterative upscale-and-sharpen pipeline.
//!
//! "Smart" upscaling here is classical resampling plus the deterministic
//! enhancement pass, not machine learning. A 4x upscale runs as two chained
//! 2x steps with an enhancement pass after each: one direct 4x jump loses
//! edge information that the intermediate step preserves, and the second
//! pass runs at reduced strength to avoid compounding sharpening halos.
//!
//! If the high-quality resampler fails for any reason, the pipeline falls
//! back to a single basic resample of the original surface straight to the
//! target size, skipping enhancement. The fallback is the last line of
//! defense and never raises.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::compose::resize_to;
use crate::enhance::enhance;
use crate::error::PipelineError;
use crate::surface::{FilterType, RasterSurface, BYTES_PER_PIXEL};

/// Strength reduction for the second enhancement pass of a 4x upscale.
const SECOND_PASS_FACTOR: f32 = 0.8;

/// Supported upscale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpscaleFactor {
    X2,
    X4,
}

impl UpscaleFactor {
    /// The linear dimension multiplier.
    pub fn multiplier(self) -> u32 {
        match self {
            UpscaleFactor::X2 => 2,
            UpscaleFactor::X4 => 4,
        }
    }
}

/// The result of an upscale, with a flag for callers that want to surface
/// the quality degradation to the user.
#[derive(Debug, Clone)]
pub struct UpscaleOutcome {
    pub surface: RasterSurface,
    /// True when the quality resampler failed and the basic fallback ran.
    pub used_fallback: bool,
}

/// Upscale a surface by 2x or 4x with enhancement.
///
/// Stage order is fixed: resize, enhance, (for 4x) resize, enhance. The
/// output dimensions are always exactly `factor` times the input's.
///
/// # Errors
///
/// Only degenerate inputs fail: an empty surface, or target dimensions that
/// overflow `u32`. Resampler failures are absorbed by the fallback path.
pub fn upscale<R: Rng>(
    surface: &RasterSurface,
    factor: UpscaleFactor,
    enhancement_level: f32,
    rng: &mut R,
) -> Result<UpscaleOutcome, PipelineError> {
    if surface.is_empty() {
        return Err(PipelineError::InvalidRegion("upscale of empty surface".to_string()));
    }

    let m = factor.multiplier();
    let (target_w, target_h) = match (
        surface.width.checked_mul(m),
        surface.height.checked_mul(m),
    ) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(PipelineError::InvalidRegion(format!(
                "{m}x of {}x{} overflows pixel dimensions",
                surface.width, surface.height
            )));
        }
    };

    match upscale_quality(surface, factor, target_w, target_h, enhancement_level, rng) {
        Ok(result) => Ok(UpscaleOutcome {
            surface: result,
            used_fallback: false,
        }),
        // Quality resampler failed; direct basic scale of the original,
        // no enhancement.
        Err(_) => Ok(UpscaleOutcome {
            surface: upscale_fallback(surface, target_w, target_h),
            used_fallback: true,
        }),
    }
}

/// The quality path: Lanczos3 passes with enhancement after each.
fn upscale_quality<R: Rng>(
    surface: &RasterSurface,
    factor: UpscaleFactor,
    target_w: u32,
    target_h: u32,
    enhancement_level: f32,
    rng: &mut R,
) -> Result<RasterSurface, PipelineError> {
    // First pass is always 2x of the original dimensions
    let mut current = resize_to(
        surface,
        surface.width * 2,
        surface.height * 2,
        FilterType::Lanczos3,
    )?;
    enhance(&mut current, enhancement_level, rng);

    if factor == UpscaleFactor::X4 {
        // Second 2x step lands on 4x of the original; reduced sharpening
        // on the final pass
        current = resize_to(&current, target_w, target_h, FilterType::Lanczos3)?;
        enhance(&mut current, enhancement_level * SECOND_PASS_FACTOR, rng);
    }

    Ok(current)
}

/// The fallback path: one basic nearest-neighbor scale, bypassing the
/// quality resampler and its pixel ceiling. Must never raise.
fn upscale_fallback(surface: &RasterSurface, target_w: u32, target_h: u32) -> RasterSurface {
    let mut output = RasterSurface::blank(target_w, target_h);

    for y in 0..target_h {
        let src_y = ((y as u64 * surface.height as u64) / target_h as u64) as u32;
        for x in 0..target_w {
            let src_x = ((x as u64 * surface.width as u64) / target_w as u64) as u32;
            let idx = (y as usize * target_w as usize + x as usize) * BYTES_PER_PIXEL;
            let src_idx =
                (src_y as usize * surface.width as usize + src_x as usize) * BYTES_PER_PIXEL;
            output.pixels[idx..idx + BYTES_PER_PIXEL]
                .copy_from_slice(&surface.pixels[src_idx..src_idx + BYTES_PER_PIXEL]);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn gradient_surface(width: u32, height: u32) -> RasterSurface {
        let mut surface = RasterSurface::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                surface.set_pixel(
                    x,
                    y,
                    [
                        ((x * 255) / width.max(1)) as u8,
                        ((y * 255) / height.max(1)) as u8,
                        128,
                        255,
                    ],
                );
            }
        }
        surface
    }

    #[test]
    fn test_upscale_2x_dimensions() {
        let src = gradient_surface(100, 50);
        let out = upscale(&src, UpscaleFactor::X2, 0.0, &mut rng()).unwrap();
        assert_eq!(out.surface.width, 200);
        assert_eq!(out.surface.height, 100);
        assert!(!out.used_fallback);
    }

    #[test]
    fn test_upscale_4x_dimensions() {
        let src = gradient_surface(30, 20);
        let out = upscale(&src, UpscaleFactor::X4, 0.5, &mut rng()).unwrap();
        assert_eq!(out.surface.width, 120);
        assert_eq!(out.surface.height, 80);
        assert!(!out.used_fallback);
    }

    #[test]
    fn test_upscale_4x_runs_as_two_2x_passes() {
        // The intermediate surface is exactly 2x; verify by running the
        // stages manually with the same seed and comparing with the
        // pipeline output.
        let src = gradient_surface(25, 15);
        let level = 0.2; // below the noise threshold keeps this exact

        let mut manual = resize_to(&src, 50, 30, FilterType::Lanczos3).unwrap();
        assert_eq!((manual.width, manual.height), (50, 30));
        enhance(&mut manual, level, &mut rng());
        let mut manual = resize_to(&manual, 100, 60, FilterType::Lanczos3).unwrap();
        enhance(&mut manual, level * 0.8, &mut rng());

        let out = upscale(&src, UpscaleFactor::X4, level, &mut rng()).unwrap();
        assert_eq!((out.surface.width, out.surface.height), (100, 60));
        assert_eq!(out.surface.pixels, manual.pixels);
    }

    #[test]
    fn test_upscale_zero_level_skips_enhancement() {
        // With level 0 the result is the pure resampler output
        let src = gradient_surface(40, 40);
        let expected = resize_to(&src, 80, 80, FilterType::Lanczos3).unwrap();
        let out = upscale(&src, UpscaleFactor::X2, 0.0, &mut rng()).unwrap();
        assert_eq!(out.surface.pixels, expected.pixels);
    }

    #[test]
    fn test_upscale_empty_surface_rejected() {
        let src = RasterSurface::new(0, 0, vec![]);
        assert!(upscale(&src, UpscaleFactor::X2, 0.5, &mut rng()).is_err());
    }

    #[test]
    fn test_upscale_seeded_reproducible() {
        let src = gradient_surface(30, 30);
        let a = upscale(&src, UpscaleFactor::X4, 0.9, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = upscale(&src, UpscaleFactor::X4, 0.9, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.surface.pixels, b.surface.pixels);
    }

    #[test]
    fn test_fallback_when_quality_path_exceeds_ceiling() {
        // 3000x3000 at 2x is 36M pixels, over the quality resampler's
        // ceiling; the pipeline must still deliver the full-size output via
        // the fallback instead of erroring.
        let src = RasterSurface::blank(3000, 3000);
        let out = upscale(&src, UpscaleFactor::X2, 0.8, &mut rng()).unwrap();
        assert!(out.used_fallback);
        assert_eq!(out.surface.width, 6000);
        assert_eq!(out.surface.height, 6000);
        // Fallback skips enhancement: a blank surface stays blank
        assert!(out.surface.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fallback_scale_preserves_content_layout() {
        let mut src = RasterSurface::blank(4, 4);
        src.set_pixel(0, 0, [255, 0, 0, 255]);
        src.set_pixel(3, 3, [0, 255, 0, 255]);

        let out = upscale_fallback(&src, 8, 8);
        assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(out.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(out.pixel(7, 7), [0, 255, 0, 255]);
        assert_eq!(out.pixel(4, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn test_factor_multipliers() {
        assert_eq!(UpscaleFactor::X2.multiplier(), 2);
        assert_eq!(UpscaleFactor::X4.multiplier(), 4);
    }
}
