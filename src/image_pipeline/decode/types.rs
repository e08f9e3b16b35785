//! Types for YUV decoding

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::color::{Color, Point};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::sampler;

/// Source layouts understood by the decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Planar 4:2:0: full resolution luma plane, then interleaved U/V at half resolution
    Nv12,
    /// Packed 4:2:2: `Y0 U Y1 V` for every two horizontal pixels
    Yuy2,
}

impl PixelFormat {
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Nv12 => "NV12",
            PixelFormat::Yuy2 => "YUY2",
        }
    }

    /// Smallest buffer that can hold a `width` x `height` frame in this format.
    ///
    /// NV12 needs `1.5 * width * height` bytes. For odd heights the last chroma
    /// row is still addressed in full, so the requirement is rounded up to whole
    /// chroma rows. Returns `None` on overflow.
    pub fn minimum_len(self, width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;
        match self {
            PixelFormat::Nv12 => {
                let chroma = width.checked_mul(height.div_ceil(2))?;
                let nominal = pixels.checked_mul(3)?.div_ceil(2);
                Some(nominal.max(pixels.checked_add(chroma)?))
            }
            PixelFormat::Yuy2 => pixels.checked_mul(2),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nv12" => Ok(PixelFormat::Nv12),
            "yuy2" | "yuyv" => Ok(PixelFormat::Yuy2),
            other => Err(ConversionError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Byte order of one decoded pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLayout {
    /// `B, G, R`
    Bgr24,
    /// `B, G, R, 0xFF`
    Bgra32,
}

impl OutputLayout {
    pub fn from_ignore_alpha(ignore_alpha: bool) -> Self {
        if ignore_alpha {
            OutputLayout::Bgr24
        } else {
            OutputLayout::Bgra32
        }
    }

    pub fn from_bytes_per_pixel(bytes_per_pixel: usize) -> Option<Self> {
        match bytes_per_pixel {
            3 => Some(OutputLayout::Bgr24),
            4 => Some(OutputLayout::Bgra32),
            _ => None,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            OutputLayout::Bgr24 => 3,
            OutputLayout::Bgra32 => 4,
        }
    }

    /// Writes one pixel at the start of `dst`, which must hold `bytes_per_pixel` bytes.
    #[inline]
    pub fn write_pixel(self, dst: &mut [u8], (r, g, b): (u8, u8, u8)) {
        dst[0] = b;
        dst[1] = g;
        dst[2] = r;
        if self == OutputLayout::Bgra32 {
            dst[3] = 0xFF;
        }
    }

    #[inline]
    pub fn read_pixel(self, src: &[u8]) -> (u8, u8, u8) {
        (src[2], src[1], src[0])
    }
}

/// A decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Byte order of every pixel in `data`
    pub layout: OutputLayout,
    /// Packed pixels, `width * height * layout.bytes_per_pixel()` bytes
    pub data: Vec<u8>,
}

impl RgbImageData {
    /// Zero filled frame of the given size.
    pub fn blank(width: usize, height: usize, layout: OutputLayout) -> Self {
        Self {
            width,
            height,
            layout,
            data: vec![0u8; width * height * layout.bytes_per_pixel()],
        }
    }

    pub fn row_bytes(&self) -> usize {
        self.width * self.layout.bytes_per_pixel()
    }

    pub fn color_at(&self, point: Point) -> Result<Color> {
        sampler::color_at(&self.data, self.width, self.height, point)
    }

    /// Pixels reordered to `R, G, B[, A]`.
    pub fn to_rgb_order(&self) -> Vec<u8> {
        let bpp = self.layout.bytes_per_pixel();
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(bpp) {
            px.swap(0, 2);
        }
        out
    }
}
