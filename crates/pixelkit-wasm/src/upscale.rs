//! WASM bindings for the enhancement filter and the upscale pipeline.
//!
//! Both operations consume randomness for the film-grain noise pass, so the
//! bindings take an explicit seed. Calls with the same surface, parameters,
//! and seed produce identical output, which keeps preview and export renders
//! in sync.

use crate::types::JsSurface;
use pixelkit_core::enhance::enhance as core_enhance;
use pixelkit_core::surface::MAX_TARGET_PIXELS;
use pixelkit_core::upscale::{upscale as core_upscale, UpscaleFactor};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Apply the sharpening-and-grain enhancement filter.
///
/// # Arguments
///
/// * `surface` - Source surface
/// * `level` - Enhancement strength (0.0-1.0; values above 1.0 are clamped,
///   0 or below is a no-op). Levels above 0.3 add film grain noise.
/// * `seed` - Seed for the noise generator
///
/// # Returns
///
/// A new surface with the filter applied. Surfaces over the working pixel
/// ceiling are returned unchanged.
#[wasm_bindgen]
pub fn enhance(surface: &JsSurface, level: f32, seed: u32) -> JsSurface {
    let mut result = surface.to_surface();
    let mut rng = SmallRng::seed_from_u64(seed as u64);
    let ran = core_enhance(&mut result, level, &mut rng);
    if !ran && level > 0.0 && result.pixel_count() > MAX_TARGET_PIXELS {
        web_sys::console::warn_1(&JsValue::from_str(
            "enhance: surface exceeds the working pixel ceiling, pass skipped",
        ));
    }
    JsSurface::from_surface(result)
}

/// Upscale a surface by 2x or 4x with enhancement between passes.
///
/// A 4x upscale runs as two chained 2x steps with an enhancement pass after
/// each (the second at 80% strength). If the quality resampler fails, a
/// basic nearest-neighbor scale of the original is returned instead, with no
/// enhancement, and a warning is logged to the browser console. Export
/// upscale results as PNG to preserve the synthesized detail.
///
/// # Arguments
///
/// * `surface` - Source surface
/// * `factor` - Linear scale factor; must be 2 or 4
/// * `enhancement_level` - Strength of the enhancement passes (0.0-1.0)
/// * `seed` - Seed for the noise generator
///
/// # Errors
///
/// Returns an error if `factor` is not 2 or 4, the surface is empty, or the
/// target dimensions overflow.
#[wasm_bindgen]
pub fn upscale(
    surface: &JsSurface,
    factor: u32,
    enhancement_level: f32,
    seed: u32,
) -> Result<JsSurface, JsValue> {
    let factor = match factor {
        2 => UpscaleFactor::X2,
        4 => UpscaleFactor::X4,
        other => {
            return Err(JsValue::from_str(&format!(
                "unsupported upscale factor {other} (expected 2 or 4)"
            )));
        }
    };

    let mut rng = SmallRng::seed_from_u64(seed as u64);
    let outcome = core_upscale(surface.as_surface(), factor, enhancement_level, &mut rng)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if outcome.used_fallback {
        web_sys::console::warn_1(&JsValue::from_str(
            "upscale: quality resampler unavailable, used basic scaling without enhancement",
        ));
    }

    Ok(JsSurface::from_surface(outcome.surface))
}
