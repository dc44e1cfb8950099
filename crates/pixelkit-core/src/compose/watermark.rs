//! Watermark compositing.
//!
//! A watermark is rendered into a small scratch surface (the "stamp"), then
//! blitted onto the target centered at the anchor point, rotated about that
//! anchor and faded by the global opacity. The blit uses inverse mapping: for
//! every target pixel inside the stamp's rotated bounding box we rotate back
//! into stamp space and sample with bilinear interpolation, treating
//! out-of-stamp taps as transparent.
//!
//! # Sizing
//!
//! - Text: font px = min(width, height) x base_fraction x scale x 5. The x5
//!   multiplier calibrates the scale slider's perceptual range to typical
//!   watermark sizes.
//! - Logo: width = surface width x 0.2 x scale, height from the logo's
//!   natural aspect ratio.
//!
//! The compositor never fails on out-of-range inputs here: a degenerate
//! scale, anchor, or rotation degrades to skipping the draw, since the
//! watermark is cosmetic.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::geometry::AnchorPoint;
use crate::surface::{FilterType, RasterSurface, MAX_TARGET_PIXELS};

/// Fraction of the smaller surface dimension used as the base text size.
pub const BASE_FONT_FRACTION: f32 = 0.05;

/// Fraction of the surface width used as the base logo width.
const BASE_LOGO_FRACTION: f32 = 0.2;

/// Calibration multiplier between the scale slider and rendered text size.
const TEXT_SCALE_MULTIPLIER: f32 = 5.0;

/// Drop shadow offset in stamp pixels.
const SHADOW_OFFSET: i64 = 2;

const SHADOW_COLOR: [u8; 4] = [0, 0, 0, 128];
const OUTLINE_COLOR: [u8; 4] = [0, 0, 0, 77];

/// Watermark content: either rendered text or a pre-decoded logo surface.
#[derive(Debug, Clone)]
pub enum WatermarkVariant {
    Text {
        content: String,
        /// Text color as RGB. White text additionally gets a dark outline.
        color: [u8; 3],
    },
    Logo {
        source: RasterSurface,
    },
}

/// A full per-request watermark description. Constructed by the caller; not
/// persisted by the core.
#[derive(Debug, Clone)]
pub struct WatermarkSpec {
    pub variant: WatermarkVariant,
    /// Center point of the watermark, in percent of the target surface.
    pub anchor: AnchorPoint,
    /// Global opacity in [0, 1]. Zero draws nothing.
    pub opacity: f32,
    /// Rotation about the anchor, clockwise, in degrees.
    pub rotation_degrees: f64,
    /// Size multiplier. The UI suggests [0.1, 5]; anything positive and
    /// finite is accepted, everything else skips the draw.
    pub scale: f32,
}

impl WatermarkSpec {
    /// A centered, opaque, unrotated text watermark at scale 1.
    pub fn text(content: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            variant: WatermarkVariant::Text {
                content: content.into(),
                color,
            },
            anchor: AnchorPoint::default(),
            opacity: 1.0,
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }

    /// A centered, opaque, unrotated logo watermark at scale 1.
    pub fn logo(source: RasterSurface) -> Self {
        Self {
            variant: WatermarkVariant::Logo { source },
            anchor: AnchorPoint::default(),
            opacity: 1.0,
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }
}

/// Draw a watermark onto a surface in place.
///
/// Dimensions never change. With `opacity <= 0` (or any degenerate spec) the
/// surface is left pixel-identical.
pub fn composite_watermark(surface: &mut RasterSurface, spec: &WatermarkSpec) {
    if surface.is_empty() {
        return;
    }

    let opacity = spec.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || !spec.opacity.is_finite() {
        return;
    }
    if !spec.scale.is_finite() || spec.scale <= 0.0 {
        return;
    }
    let rotation = if spec.rotation_degrees.is_finite() {
        spec.rotation_degrees
    } else {
        0.0
    };

    let Some(stamp) = render_stamp(surface, spec) else {
        return;
    };

    blit_rotated(surface, &stamp, spec.anchor, rotation, opacity);
}

/// Render the watermark content into a scratch surface.
///
/// Returns `None` when the content is empty or the stamp cannot be sized
/// sanely (at which point the watermark is skipped, not failed).
fn render_stamp(target: &RasterSurface, spec: &WatermarkSpec) -> Option<RasterSurface> {
    match &spec.variant {
        WatermarkVariant::Text { content, color } => {
            render_text_stamp(target, content, *color, spec.scale)
        }
        WatermarkVariant::Logo { source } => render_logo_stamp(target, source, spec.scale),
    }
}

fn render_text_stamp(
    target: &RasterSurface,
    content: &str,
    color: [u8; 3],
    scale: f32,
) -> Option<RasterSurface> {
    let chars: Vec<char> = content.chars().filter(|c| *c != '\n').collect();
    if chars.is_empty() {
        return None;
    }

    let min_dim = target.width.min(target.height) as f32;
    let font_px = min_dim * BASE_FONT_FRACTION * scale * TEXT_SCALE_MULTIPLIER;
    if !font_px.is_finite() || font_px < 1.0 {
        return None;
    }

    // Glyphs are 8x8 bitmaps scaled up by an integer factor. The blit clips
    // to the target, so a glyph taller than twice the target only wastes
    // memory; cap the scale accordingly.
    let max_dim = target.width.max(target.height) as i64;
    let mut glyph_scale = ((font_px / 8.0).round() as i64).clamp(1, (max_dim / 4).max(1));

    let is_white = color == [255, 255, 255];
    // Outline width tracks the rendered glyph size (stroke ~ font px / 25)
    let outline_for = |gs: i64| if is_white { (gs * 8 / 25).max(1) } else { 0 };
    let pad_for = |gs: i64| SHADOW_OFFSET + outline_for(gs) + 1;

    // Shrink the glyph scale if the stamp would blow the pixel ceiling.
    loop {
        let pad = pad_for(glyph_scale) as i128;
        let w = chars.len() as i128 * 8 * glyph_scale as i128 + 2 * pad;
        let h = 8 * glyph_scale as i128 + 2 * pad;
        if w * h <= MAX_TARGET_PIXELS as i128 {
            break;
        }
        if glyph_scale == 1 {
            return None;
        }
        glyph_scale /= 2;
    }

    let outline_width = outline_for(glyph_scale);
    let pad = pad_for(glyph_scale);
    let stamp_w = (chars.len() as i64 * 8 * glyph_scale + 2 * pad) as u32;
    let stamp_h = (8 * glyph_scale + 2 * pad) as u32;
    let mut stamp = RasterSurface::blank(stamp_w, stamp_h);

    // Drop shadow for legibility against any background
    draw_text(
        &mut stamp,
        pad + SHADOW_OFFSET,
        pad + SHADOW_OFFSET,
        &chars,
        SHADOW_COLOR,
        glyph_scale,
    );

    // White text gets a semi-transparent black outline so it stays legible
    // on light backgrounds
    if is_white {
        for dy in -outline_width..=outline_width {
            for dx in -outline_width..=outline_width {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if dx * dx + dy * dy > outline_width * outline_width {
                    continue;
                }
                draw_text(&mut stamp, pad + dx, pad + dy, &chars, OUTLINE_COLOR, glyph_scale);
            }
        }
    }

    draw_text(
        &mut stamp,
        pad,
        pad,
        &chars,
        [color[0], color[1], color[2], 255],
        glyph_scale,
    );

    Some(stamp)
}

fn render_logo_stamp(
    target: &RasterSurface,
    source: &RasterSurface,
    scale: f32,
) -> Option<RasterSurface> {
    if source.is_empty() {
        return None;
    }

    let draw_w = target.width as f32 * BASE_LOGO_FRACTION * scale;
    if !draw_w.is_finite() || draw_w < 1.0 {
        return None;
    }
    let aspect = source.aspect_ratio();
    let draw_h = (draw_w as f64 / aspect).max(1.0);

    let width = (draw_w.round() as u32).max(1);
    let height = (draw_h.round() as u32).max(1);

    // Oversized logos are skipped rather than failed; the ceiling check
    // lives inside resize_to.
    super::resize::resize_to(source, width, height, FilterType::Lanczos3).ok()
}

/// Draw bitmap glyphs into a stamp at integer scale. Unknown characters fall
/// back to '?'.
fn draw_text(
    stamp: &mut RasterSurface,
    x: i64,
    y: i64,
    chars: &[char],
    color: [u8; 4],
    glyph_scale: i64,
) {
    let mut cursor_x = x;
    for &ch in chars {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        let Some(glyph) = glyph else {
            cursor_x += 8 * glyph_scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_idx in 0..8i64 {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * glyph_scale;
                let py = y + row_idx as i64 * glyph_scale;
                fill_block(stamp, px, py, glyph_scale, color);
            }
        }
        cursor_x += 8 * glyph_scale;
    }
}

fn fill_block(stamp: &mut RasterSurface, x: i64, y: i64, size: i64, color: [u8; 4]) {
    for sy in 0..size {
        for sx in 0..size {
            let tx = x + sx;
            let ty = y + sy;
            if tx >= 0 && ty >= 0 && tx < stamp.width as i64 && ty < stamp.height as i64 {
                stamp.blend_pixel(tx as u32, ty as u32, color);
            }
        }
    }
}

/// Blit a stamp onto the target, centered at the anchor, rotated clockwise
/// by `rotation_degrees` and faded by `opacity`.
fn blit_rotated(
    target: &mut RasterSurface,
    stamp: &RasterSurface,
    anchor: AnchorPoint,
    rotation_degrees: f64,
    opacity: f32,
) {
    let anchor_x = anchor.x.clamp(0.0, 100.0) / 100.0 * target.width as f64;
    let anchor_y = anchor.y.clamp(0.0, 100.0) / 100.0 * target.height as f64;

    let theta = rotation_degrees.to_radians();
    let cos = theta.cos();
    let sin = theta.sin();

    let sw = stamp.width as f64;
    let sh = stamp.height as f64;

    // Axis-aligned bounds of the rotated stamp, centered on the anchor
    let half_w = (sw * cos.abs() + sh * sin.abs()) / 2.0;
    let half_h = (sw * sin.abs() + sh * cos.abs()) / 2.0;

    let min_x = ((anchor_x - half_w).floor() as i64).max(0);
    let max_x = ((anchor_x + half_w).ceil() as i64).min(target.width as i64 - 1);
    let min_y = ((anchor_y - half_h).floor() as i64).max(0);
    let max_y = ((anchor_y + half_h).ceil() as i64).min(target.height as i64 - 1);

    for dst_y in min_y..=max_y {
        for dst_x in min_x..=max_x {
            let dx = dst_x as f64 - anchor_x;
            let dy = dst_y as f64 - anchor_y;

            // Inverse rotation back into stamp space
            let sx = dx * cos + dy * sin + sw / 2.0;
            let sy = -dx * sin + dy * cos + sh / 2.0;

            let mut src = sample_bilinear(stamp, sx, sy);
            if src[3] == 0 {
                continue;
            }
            src[3] = (src[3] as f32 * opacity).round().clamp(0.0, 255.0) as u8;
            target.blend_pixel(dst_x as u32, dst_y as u32, src);
        }
    }
}

/// Sample a stamp pixel with bilinear interpolation. Taps outside the stamp
/// contribute transparency, which feathers the stamp's edges.
fn sample_bilinear(stamp: &RasterSurface, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let tap = |tx: i64, ty: i64| -> [f64; 4] {
        if tx < 0 || ty < 0 || tx >= stamp.width as i64 || ty >= stamp.height as i64 {
            return [0.0; 4];
        }
        let p = stamp.pixel(tx as u32, ty as u32);
        [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
    };

    let p00 = tap(x0, y0);
    let p10 = tap(x0 + 1, y0);
    let p01 = tap(x0, y0 + 1);
    let p11 = tap(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}
