//! Pixelkit Core - Image processing library
//!
//! This crate provides the core image processing functionality for Pixelkit,
//! including the crop/resize/watermark compositor, the enhancement filter,
//! the smart upscale pipeline, and the normalized geometry model backing
//! interactive crop and watermark placement.

pub mod codec;
pub mod compose;
pub mod enhance;
pub mod error;
pub mod geometry;
pub mod surface;
pub mod upscale;

pub use codec::{decode_image, encode_jpeg, encode_png};
pub use compose::{composite, CompositeOptions, ResizeSpec, WatermarkSpec, WatermarkVariant};
pub use enhance::enhance;
pub use error::PipelineError;
pub use geometry::{
    resolve_crop_rect, AnchorPoint, AspectConstraint, CropDragController, DragMode,
    NormalizedRect, PixelRect, WatermarkDragController,
};
pub use surface::{FilterType, RasterSurface, MAX_TARGET_PIXELS};
pub use upscale::{upscale, UpscaleFactor, UpscaleOutcome};
