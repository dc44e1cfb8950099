//! Error types for the processing pipeline.

use thiserror::Error;

/// Errors that can occur in the compositing and upscaling pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A crop rectangle is out of bounds or has zero area.
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Target dimensions exceed the pixel-count safety ceiling.
    #[error("Allocation refused: {pixels} pixels exceeds the {ceiling} pixel ceiling")]
    AllocationFailed { pixels: u64, ceiling: u64 },

    /// The high-quality resampler could not produce a result.
    /// The upscale pipeline handles this internally via its fallback path.
    #[error("High-quality resampler unavailable: {0}")]
    ResamplerUnavailable(String),

    /// Input bytes could not be decoded into a surface (codec boundary).
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// A surface could not be encoded to the requested container (codec boundary).
    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}
