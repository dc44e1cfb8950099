//! Normalized-coordinate geometry for crop regions and watermark placement.
//!
//! All interactive state lives in percentage space: a rectangle or anchor point
//! is expressed as percentages of a reference surface, in the range 0 to 100.
//! Pixel coordinates are only resolved at the moment of compositing, against
//! whatever surface is current at that point. This is what makes crop and
//! watermark placement resolution-independent and stable under container
//! resizing.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - (100, 100) = bottom-right corner
//! - Percentage space is itself non-square when the surface is non-square, so
//!   aspect-ratio math must account for the surface's natural aspect.
//!
//! Geometry functions never fail; out-of-range inputs are clamped.

pub mod drag;
mod rect;

pub use drag::{ContainerSize, CropDragController, PointerPosition, WatermarkDragController};
pub use rect::{
    apply_drag_delta, apply_watermark_drag, resolve_crop_rect, AnchorPoint, AspectConstraint,
    DragMode, NormalizedRect, PixelRect,
};
