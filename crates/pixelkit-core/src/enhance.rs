//! Sharpening and synthetic-grain enhancement.
//!
//! One enhancement pass is a 3x3 unsharp-style convolution followed, at
//! moderate-to-high levels, by a grain pass that injects uniform noise to
//! break up the smooth look naive upscaling leaves behind.
//!
//! The kernel, parameterized by `level` in [0, 1]:
//!
//! ```text
//!  0        -level          0
//! -level   1+4*level      -level
//!  0        -level          0
//! ```
//!
//! Applied per RGB channel; alpha is copied through unmodified. Edge pixels
//! use only in-bounds taps (out-of-bounds taps are omitted from the sum,
//! which slightly under-sharpens the border).
//!
//! Randomness comes from a caller-supplied [`rand::Rng`], so tests can seed a
//! [`rand::rngs::SmallRng`] and assert exact output, while production callers
//! reproduce only the distribution.

use rand::Rng;

use crate::surface::{RasterSurface, BYTES_PER_PIXEL, MAX_TARGET_PIXELS};

/// Enhancement levels above this threshold also get the grain pass.
const NOISE_THRESHOLD: f32 = 0.3;

/// Noise amplitude multiplier: the injected range is +/-(level * 15) / 2.
const NOISE_AMPLITUDE: f32 = 15.0;

/// Sharpen a surface in place, with optional grain.
///
/// No-op for `level <= 0`. Surfaces above [`MAX_TARGET_PIXELS`] are skipped
/// silently rather than failed: enhancement is cosmetic, and a skipped pass
/// still leaves a usable image. Returns whether the pass actually ran.
pub fn enhance<R: Rng>(surface: &mut RasterSurface, level: f32, rng: &mut R) -> bool {
    if level.is_nan() || level <= 0.0 || !level.is_finite() {
        return false;
    }
    if surface.is_empty() {
        return false;
    }
    // Cost-control guard against pathological inputs on constrained hardware
    if surface.pixel_count() > MAX_TARGET_PIXELS {
        return false;
    }

    let level = level.min(1.0);
    let w = surface.width as i64;
    let h = surface.height as i64;

    let side = -level;
    let center = 1.0 + 4.0 * level;

    let src = surface.pixels.clone();
    let dst = &mut surface.pixels;

    let add_noise = level > NOISE_THRESHOLD;

    for y in 0..h {
        for x in 0..w {
            let idx = ((y * w + x) as usize) * BYTES_PER_PIXEL;

            let mut acc = [0.0f32; 3];

            // Cross-shaped kernel: center plus the four direct neighbors.
            // Out-of-bounds taps are simply dropped.
            let mut tap = |tx: i64, ty: i64, weight: f32| {
                if tx < 0 || ty < 0 || tx >= w || ty >= h {
                    return;
                }
                let t = ((ty * w + tx) as usize) * BYTES_PER_PIXEL;
                acc[0] += src[t] as f32 * weight;
                acc[1] += src[t + 1] as f32 * weight;
                acc[2] += src[t + 2] as f32 * weight;
            };

            tap(x, y, center);
            tap(x - 1, y, side);
            tap(x + 1, y, side);
            tap(x, y - 1, side);
            tap(x, y + 1, side);

            // Grain: one sample per pixel, shared across RGB, so the noise
            // reads as texture rather than color speckle
            if add_noise {
                let noise = (rng.gen::<f32>() - 0.5) * (level * NOISE_AMPLITUDE);
                acc[0] += noise;
                acc[1] += noise;
                acc[2] += noise;
            }

            dst[idx] = acc[0].round().clamp(0.0, 255.0) as u8;
            dst[idx + 1] = acc[1].round().clamp(0.0, 255.0) as u8;
            dst[idx + 2] = acc[2].round().clamp(0.0, 255.0) as u8;
            // Alpha copied through unmodified
            dst[idx + 3] = src[idx + 3];
        }
    }

    true
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
    fn test_level_zero_is_noop() {
        let mut surf = gradient_surface(20, 20);
        let before = surf.pixels.clone();
        assert!(!enhance(&mut surf, 0.0, &mut rng()));
        assert_eq!(surf.pixels, before);
    }

    #[test]
    fn test_negative_level_is_noop() {
        let mut surf = gradient_surface(20, 20);
        let before = surf.pixels.clone();
        assert!(!enhance(&mut surf, -1.0, &mut rng()));
        assert_eq!(surf.pixels, before);
    }

    #[test]
    fn test_nan_level_is_noop() {
        let mut surf = gradient_surface(20, 20);
        let before = surf.pixels.clone();
        assert!(!enhance(&mut surf, f32::NAN, &mut rng()));
        assert_eq!(surf.pixels, before);
    }

    #[test]
    fn test_uniform_surface_unchanged_below_noise_threshold() {
        // The kernel weights sum to 1 on interior pixels, and border pixels
        // of a uniform image lose side taps symmetrically only where the
        // center outweighs them... so check the interior exactly.
        let mut surf = RasterSurface::blank(10, 10);
        for px in surf.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[100, 100, 100, 255]);
        }
        assert!(enhance(&mut surf, 0.2, &mut rng()));
        for y in 1..9 {
            for x in 1..9 {
                assert_eq!(surf.pixel(x, y), [100, 100, 100, 255]);
            }
        }
    }

    #[test]
    fn test_border_under_sharpens_uniform_surface() {
        // Border pixels omit out-of-bounds taps: with the kernel summing to
        // less than 1 there, a uniform surface darkens at the border.
        let mut surf = RasterSurface::blank(10, 10);
        for px in surf.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[100, 100, 100, 255]);
        }
        enhance(&mut surf, 0.2, &mut rng());
        let corner = surf.pixel(0, 0);
        assert!(corner[0] > 100, "corner keeps center weight minus two sides");
    }

    #[test]
    fn test_sharpening_increases_edge_contrast() {
        // A vertical step edge should get steeper after sharpening
        let mut surf = RasterSurface::blank(20, 20);
        for y in 0..20 {
            for x in 0..20 {
                let v = if x < 10 { 50 } else { 200 };
                surf.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        enhance(&mut surf, 0.25, &mut rng());

        // Dark side of the edge overshoots darker, bright side brighter
        assert!(surf.pixel(9, 10)[0] < 50);
        assert!(surf.pixel(10, 10)[0] > 200);
    }

    #[test]
    fn test_alpha_copied_through() {
        let mut surf = gradient_surface(10, 10);
        surf.set_pixel(5, 5, [10, 20, 30, 77]);
        enhance(&mut surf, 0.9, &mut rng());
        assert_eq!(surf.pixel(5, 5)[3], 77);
    }

    #[test]
    fn test_no_noise_below_threshold() {
        // At level <= 0.3 the pass is fully deterministic regardless of rng
        let base = gradient_surface(16, 16);

        let mut a = base.clone();
        let mut b = base.clone();
        enhance(&mut a, 0.3, &mut SmallRng::seed_from_u64(1));
        enhance(&mut b, 0.3, &mut SmallRng::seed_from_u64(999));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_noise_above_threshold_varies_with_seed() {
        let base = gradient_surface(16, 16);

        let mut a = base.clone();
        let mut b = base.clone();
        enhance(&mut a, 0.8, &mut SmallRng::seed_from_u64(1));
        enhance(&mut b, 0.8, &mut SmallRng::seed_from_u64(999));
        assert_ne!(a.pixels, b.pixels);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let base = gradient_surface(16, 16);

        let mut a = base.clone();
        let mut b = base.clone();
        enhance(&mut a, 0.8, &mut SmallRng::seed_from_u64(7));
        enhance(&mut b, 0.8, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_noise_amplitude_statistics() {
        // Statistical property, not exact pixels: on a mid-gray surface at
        // level 1.0 the noise is uniform in +/-7.5, so the mean deviation
        // stays near zero and the max deviation near (but not above, after
        // convolution of a uniform field) ~8.
        let mut surf = RasterSurface::blank(100, 100);
        for px in surf.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[128, 128, 128, 255]);
        }
        enhance(&mut surf, 1.0, &mut rng());

        let interior: Vec<i32> = (1..99)
            .flat_map(|y| (1..99).map(move |x| (x, y)))
            .map(|(x, y)| surf.pixel(x, y)[0] as i32 - 128)
            .collect();

        let mean: f64 = interior.iter().map(|&d| d as f64).sum::<f64>() / interior.len() as f64;
        let max = interior.iter().map(|d| d.abs()).max().unwrap();

        assert!(mean.abs() < 0.5, "mean deviation {mean} should be ~0");
        assert!(max <= 8, "max deviation {max} should stay within amplitude");
        assert!(max >= 5, "noise should actually reach near the amplitude");
    }

    #[test]
    fn test_empty_surface_skipped() {
        let mut surf = RasterSurface::new(0, 0, vec![]);
        assert!(!enhance(&mut surf, 0.5, &mut rng()));
    }
}
