//! TIFF output types

use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

impl FromStr for TiffCompression {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(TiffCompression::None),
            "lzw" => Ok(TiffCompression::Lzw),
            "deflate-fast" => Ok(TiffCompression::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(TiffCompression::DeflateBalanced),
            "deflate-best" => Ok(TiffCompression::DeflateBest),
            other => Err(ConversionError::UnsupportedFormat(format!(
                "compression {other}"
            ))),
        }
    }
}
