//! Rectangle and anchor math in percentage space.

use serde::{Deserialize, Serialize};

/// Minimum crop box size, in percent of the reference surface.
const MIN_SIZE_PERCENT: f64 = 1.0;

/// A rectangle expressed as percentages (0-100) of a reference surface.
///
/// Invariants maintained by every constructor and operation in this module:
/// `0 <= x`, `x + width <= 100`, `0 <= y`, `y + height <= 100`, and
/// `width`/`height` at least 1 (one percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for NormalizedRect {
    /// The initial crop box: an 80% x 80% region centered in the surface.
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
        }
    }
}

impl NormalizedRect {
    /// Build a rect and clamp it into the [0, 100] bounds with minimum size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let width = width.clamp(MIN_SIZE_PERCENT, 100.0);
        let height = height.clamp(MIN_SIZE_PERCENT, 100.0);
        Self {
            x: x.clamp(0.0, 100.0 - width),
            y: y.clamp(0.0, 100.0 - height),
            width,
            height,
        }
    }

    /// Resolve to pixel coordinates against a reference surface's dimensions.
    ///
    /// Rounding happens here, once, at resolution time. The resulting rect is
    /// clamped so it always fits inside the reference dimensions. A degenerate
    /// reference (zero width or height) is treated as 1x1.
    pub fn to_pixel_rect(&self, ref_width: u32, ref_height: u32) -> PixelRect {
        let ref_width = ref_width.max(1);
        let ref_height = ref_height.max(1);
        let x = ((self.x / 100.0) * ref_width as f64).round() as u32;
        let y = ((self.y / 100.0) * ref_height as f64).round() as u32;
        let width = ((self.width / 100.0) * ref_width as f64).round() as u32;
        let height = ((self.height / 100.0) * ref_height as f64).round() as u32;

        let x = x.min(ref_width.saturating_sub(1));
        let y = y.min(ref_height.saturating_sub(1));
        PixelRect {
            x,
            y,
            width: width.clamp(1, ref_width - x),
            height: height.clamp(1, ref_height - y),
        }
    }

    /// Right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A rectangle in pixel space, already resolved against a concrete surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A watermark anchor: the center point of the watermark, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl Default for AnchorPoint {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

/// Which part of the crop box a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Translate the whole box.
    Move,
    /// Resize from the north-west corner (south-east edges fixed).
    NorthWest,
    /// Resize from the north-east corner.
    NorthEast,
    /// Resize from the south-west corner.
    SouthWest,
    /// Resize from the south-east corner.
    SouthEast,
}

impl DragMode {
    fn touches_north(self) -> bool {
        matches!(self, DragMode::NorthWest | DragMode::NorthEast)
    }

    fn touches_south(self) -> bool {
        matches!(self, DragMode::SouthWest | DragMode::SouthEast)
    }

    fn touches_west(self) -> bool {
        matches!(self, DragMode::NorthWest | DragMode::SouthWest)
    }

    fn touches_east(self) -> bool {
        matches!(self, DragMode::NorthEast | DragMode::SouthEast)
    }
}

/// An aspect-ratio lock for crop-box operations.
///
/// `target` is the desired pixel-space width/height ratio of the crop.
/// `image` is the natural width/height ratio of the reference surface; it is
/// needed because percentage space is non-square for non-square images:
/// `width% / height% = target / image`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectConstraint {
    pub target: f64,
    pub image: f64,
}

impl AspectConstraint {
    pub fn new(target: f64, image: f64) -> Self {
        Self { target, image }
    }

    fn is_valid(&self) -> bool {
        self.target.is_finite() && self.target > 0.0 && self.image.is_finite() && self.image > 0.0
    }

    /// Percentage-space height for a given percentage-space width.
    fn height_for_width(&self, width: f64) -> f64 {
        width * self.image / self.target
    }

    /// Percentage-space width for a given percentage-space height.
    fn width_for_height(&self, height: f64) -> f64 {
        height * self.target / self.image
    }
}

fn clamp(val: f64, min: f64, max: f64) -> f64 {
    val.min(max).max(min)
}

/// Compute the initial crop rectangle for a surface.
///
/// Without a constraint this is the default centered 80% box. With a target
/// aspect ratio it is the largest centered rectangle whose pixel-space aspect
/// equals the target, starting from the 80% box and shrinking whichever axis
/// is constrained.
///
/// Invalid aspect values (zero, negative, non-finite) fall back to the default
/// box; rejecting them is the caller's job.
pub fn resolve_crop_rect(
    aspect_ratio_constraint: Option<f64>,
    image_natural_aspect: f64,
) -> NormalizedRect {
    let Some(target) = aspect_ratio_constraint else {
        return NormalizedRect::default();
    };

    let constraint = AspectConstraint::new(target, image_natural_aspect);
    if !constraint.is_valid() {
        return NormalizedRect::default();
    }

    let mut width = 80.0;
    let mut height = 80.0;

    if target > image_natural_aspect {
        // Wider than the image: constrain by width
        height = constraint.height_for_width(width);
    } else {
        // Taller than the image: constrain by height
        width = constraint.width_for_height(height);
    }

    // Extreme ratios can shrink the derived axis below the minimum box size;
    // hold the minimum before centering so the result stays centered.
    let width = width.max(MIN_SIZE_PERCENT);
    let height = height.max(MIN_SIZE_PERCENT);
    NormalizedRect::new(50.0 - width / 2.0, 50.0 - height / 2.0, width, height)
}

/// Apply a pointer delta (already converted to percent) to a crop box.
///
/// The delta is always relative to the gesture-start snapshot, never to the
/// previous move event, so repeated calls with a growing delta do not
/// accumulate rounding drift.
///
/// For `Move`, both axes translate, clamped so the rect stays fully inside
/// [0, 100]. For corner modes, the two edges touching the corner move and the
/// opposite edges stay fixed, with a 1% minimum size. When an aspect lock is
/// active, the non-dominant axis (height, for corner drags) is recomputed from
/// the dominant one; if that pushes the rect out of bounds, the dominant axis
/// is shrunk and rederived instead, which prevents oscillation at the surface
/// boundary.
pub fn apply_drag_delta(
    start: NormalizedRect,
    delta_x_percent: f64,
    delta_y_percent: f64,
    mode: DragMode,
    aspect: Option<AspectConstraint>,
) -> NormalizedRect {
    let mut next = start;

    if mode == DragMode::Move {
        next.x = clamp(start.x + delta_x_percent, 0.0, 100.0 - start.width);
        next.y = clamp(start.y + delta_y_percent, 0.0, 100.0 - start.height);
        return next;
    }

    if mode.touches_north() {
        next.y = clamp(
            start.y + delta_y_percent,
            0.0,
            start.y + start.height - MIN_SIZE_PERCENT,
        );
        next.height = start.height - (next.y - start.y);
    }
    if mode.touches_south() {
        next.height = clamp(start.height + delta_y_percent, MIN_SIZE_PERCENT, 100.0 - start.y);
    }
    if mode.touches_west() {
        next.x = clamp(
            start.x + delta_x_percent,
            0.0,
            start.x + start.width - MIN_SIZE_PERCENT,
        );
        next.width = start.width - (next.x - start.x);
    }
    if mode.touches_east() {
        next.width = clamp(start.width + delta_x_percent, MIN_SIZE_PERCENT, 100.0 - start.x);
    }

    if let Some(constraint) = aspect.filter(AspectConstraint::is_valid) {
        // Corner drags treat width as the dominant axis: rederive height,
        // then shrink width if the derived height overflows the bounds.
        next.height = constraint.height_for_width(next.width);
        if next.y + next.height > 100.0 {
            next.height = 100.0 - next.y;
            next.width = constraint.width_for_height(next.height);
        }
    }

    next
}

/// Translate a watermark anchor by a pointer delta, clamped to [0, 100] on
/// each axis independently.
pub fn apply_watermark_drag(
    start: AnchorPoint,
    delta_x_percent: f64,
    delta_y_percent: f64,
) -> AnchorPoint {
    AnchorPoint {
        x: clamp(start.x + delta_x_percent, 0.0, 100.0),
        y: clamp(start.y + delta_y_percent, 0.0, 100.0),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
