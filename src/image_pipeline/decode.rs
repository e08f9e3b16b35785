//! YUV frame decoding module
//!
//! Converts whole NV12 and YUY2 frames into packed B,G,R[,A] buffers.

mod decoder;
mod nv12_decoder;
mod yuy2_decoder;
pub mod types;

pub use decoder::{FrameDecoder, decoder_for};
pub use nv12_decoder::{Nv12Decoder, nv12_to_rgb};
pub use types::{OutputLayout, PixelFormat, RgbImageData};
pub use yuy2_decoder::{Yuy2Decoder, yuy2_to_rgb};
