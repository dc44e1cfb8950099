//! Encoding and decoding between compressed byte streams and surfaces.
//!
//! Decoding sniffs the container format from the bytes themselves. Encoding
//! offers two targets: JPEG for general exports with a quality knob, and
//! PNG for upscale output where lossless storage of the synthesized detail
//! matters.

mod decode;
mod encode;

pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
