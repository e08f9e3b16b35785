//! Pipeline conversions module
//!
//! This module contains orchestration logic for YUV frame to TIFF conversion.

mod yuv_to_tiff;

#[cfg(test)]
mod tests;

pub use yuv_to_tiff::YuvToTiffPipeline;
