//! Resampling to explicit dimensions or bounding constraints.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::surface::{FilterType, RasterSurface, MAX_TARGET_PIXELS};

/// Target dimensions for a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeSpec {
    /// Explicit target dimensions. A missing dimension is derived from the
    /// source aspect ratio; with both missing, the source dimensions stand.
    Exact {
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Bounding constraints that only ever scale *down*, preserving the
    /// aspect ratio. A source already within bounds is left unchanged.
    Bounds {
        max_width: Option<u32>,
        max_height: Option<u32>,
    },
}

/// Compute the target dimensions a spec produces for a given source size.
pub fn resolve_resize_dimensions(spec: &ResizeSpec, src_width: u32, src_height: u32) -> (u32, u32) {
    if src_width == 0 || src_height == 0 {
        return (src_width, src_height);
    }
    let ratio = src_width as f64 / src_height as f64;

    match *spec {
        ResizeSpec::Exact { width, height } => match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, derive(w as f64 / ratio)),
            (None, Some(h)) => (derive(h as f64 * ratio), h),
            (None, None) => (src_width, src_height),
        },
        ResizeSpec::Bounds {
            max_width,
            max_height,
        } => {
            let mut target_w = src_width as f64;
            let mut target_h = src_height as f64;

            // Shrink against the width bound first, rederiving height, then
            // against the height bound. Never grows.
            if let Some(max_w) = max_width {
                if target_w > max_w as f64 {
                    target_w = max_w as f64;
                    target_h = target_w / ratio;
                }
            }
            if let Some(max_h) = max_height {
                if target_h > max_h as f64 {
                    target_h = max_h as f64;
                    target_w = target_h * ratio;
                }
            }
            (derive(target_w), derive(target_h))
        }
    }
}

#[inline]
fn derive(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

/// Resample a surface per a [`ResizeSpec`].
///
/// Whatever filter is used, the result is deterministic for identical inputs.
///
/// # Errors
///
/// - `InvalidRegion` if the source is empty or a target dimension is zero.
/// - `AllocationFailed` if the target exceeds [`MAX_TARGET_PIXELS`].
/// - `ResamplerUnavailable` if the pixel buffer cannot back an image view.
pub fn resize(
    surface: &RasterSurface,
    spec: &ResizeSpec,
    filter: FilterType,
) -> Result<RasterSurface, PipelineError> {
    if surface.is_empty() {
        return Err(PipelineError::InvalidRegion("resize of empty surface".to_string()));
    }

    let (width, height) = resolve_resize_dimensions(spec, surface.width, surface.height);
    resize_to(surface, width, height, filter)
}

/// Resample a surface to explicit pixel dimensions.
pub fn resize_to(
    surface: &RasterSurface,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterSurface, PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidRegion(format!(
            "resize target has zero dimension ({width}x{height})"
        )));
    }

    // Fast path: if dimensions match, just clone
    if surface.width == width && surface.height == height {
        return Ok(surface.clone());
    }

    let pixels = width as u64 * height as u64;
    if pixels > MAX_TARGET_PIXELS {
        return Err(PipelineError::AllocationFailed {
            pixels,
            ceiling: MAX_TARGET_PIXELS,
        });
    }

    let rgba = surface.to_rgba_image().ok_or_else(|| {
        PipelineError::ResamplerUnavailable("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(RasterSurface::from_rgba_image(resized))
}
