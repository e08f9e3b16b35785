//! Packed BGR(A) to YUV frame encoding
//!
//! Produces NV12 and YUY2 frames with the fixed-point forward transform, mainly
//! to feed the decoders with synthetic camera frames.

use tracing::debug;

use crate::image_pipeline::color_space::rgb_to_yuv;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::{PixelFormat, RgbImageData};

fn validate_image(image: &RgbImageData, format: PixelFormat) -> Result<()> {
    let (width, height) = (image.width, image.height);
    let odd_height = format == PixelFormat::Nv12 && height % 2 != 0;
    if width == 0 || height == 0 || width % 2 != 0 || odd_height {
        return Err(ConversionError::InvalidDimensions(width, height));
    }

    let expected = image.row_bytes() * height;
    if image.data.len() != expected {
        return Err(ConversionError::InvalidBufferLength {
            expected,
            actual: image.data.len(),
        });
    }
    Ok(())
}

fn yuv_at(image: &RgbImageData, x: usize, y: usize) -> (u8, u8, u8) {
    let bpp = image.layout.bytes_per_pixel();
    let offset = (y * image.width + x) * bpp;
    let (r, g, b) = image.layout.read_pixel(&image.data[offset..offset + bpp]);
    rgb_to_yuv(r, g, b)
}

/// Encodes to NV12. Chroma of each 2x2 block comes from its top-left pixel.
pub fn rgb_to_nv12(image: &RgbImageData) -> Result<Vec<u8>> {
    validate_image(image, PixelFormat::Nv12)?;
    let (width, height) = (image.width, image.height);
    debug!(width, height, "Encoding NV12");

    let luma_len = width * height;
    let mut out = vec![0u8; luma_len + luma_len / 2];
    let (luma, chroma) = out.split_at_mut(luma_len);

    for y in 0..height {
        for x in 0..width {
            let (yy, u, v) = yuv_at(image, x, y);
            luma[y * width + x] = yy;
            if y % 2 == 0 && x % 2 == 0 {
                let offset = (y / 2) * width + x;
                chroma[offset] = u;
                chroma[offset + 1] = v;
            }
        }
    }

    Ok(out)
}

/// Encodes to YUY2 as `Y0 U Y1 V`, chroma from the left pixel of each pair.
///
/// The decoder reads `U` from byte 3 and `V` from byte 1 of each group, so
/// coloured frames come back with their chroma exchanged; neutral frames
/// survive the round trip.
pub fn rgb_to_yuy2(image: &RgbImageData) -> Result<Vec<u8>> {
    validate_image(image, PixelFormat::Yuy2)?;
    let (width, height) = (image.width, image.height);
    debug!(width, height, "Encoding YUY2");

    let mut out = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in (0..width).step_by(2) {
            let (y0, u, v) = yuv_at(image, x, y);
            let (y1, _, _) = yuv_at(image, x + 1, y);
            out.extend_from_slice(&[y0, u, y1, v]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::decode::{OutputLayout, nv12_to_rgb, yuy2_to_rgb};

    fn flat(width: usize, height: usize, layout: OutputLayout, rgb: (u8, u8, u8)) -> RgbImageData {
        let mut image = RgbImageData::blank(width, height, layout);
        for px in image.data.chunks_exact_mut(layout.bytes_per_pixel()) {
            layout.write_pixel(px, rgb);
        }
        image
    }

    #[test]
    fn test_nv12_layout() {
        let image = flat(4, 2, OutputLayout::Bgr24, (255, 0, 0));
        let nv12 = rgb_to_nv12(&image).unwrap();

        assert_eq!(nv12.len(), 12);
        assert!(nv12[..8].iter().all(|&y| y == 82));
        assert_eq!(&nv12[8..], &[90, 240, 90, 240]);
    }

    #[test]
    fn test_nv12_round_trip_keeps_colour() {
        let image = flat(4, 4, OutputLayout::Bgra32, (200, 60, 30));
        let nv12 = rgb_to_nv12(&image).unwrap();
        let decoded = nv12_to_rgb(&nv12, 4, 4, false).unwrap();

        for px in decoded.data.chunks_exact(4) {
            let (r, g, b) = OutputLayout::Bgra32.read_pixel(px);
            assert!((r as i32 - 200).abs() <= 2);
            assert!((g as i32 - 60).abs() <= 2);
            assert!((b as i32 - 30).abs() <= 2);
        }
    }

    #[test]
    fn test_yuy2_layout() {
        let image = flat(2, 1, OutputLayout::Bgr24, (0, 0, 255));
        assert_eq!(rgb_to_yuy2(&image).unwrap(), vec![41, 240, 41, 110]);
    }

    #[test]
    fn test_yuy2_round_trip_of_gray() {
        let image = flat(4, 2, OutputLayout::Bgra32, (128, 128, 128));
        let yuy2 = rgb_to_yuy2(&image).unwrap();
        let decoded = yuy2_to_rgb(&yuy2, 4, 2, false).unwrap();

        for px in decoded.data.chunks_exact(4) {
            let (r, g, b) = OutputLayout::Bgra32.read_pixel(px);
            assert!((r as i32 - 128).abs() <= 2);
            assert_eq!((r, r), (g, b));
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        let odd = flat(3, 2, OutputLayout::Bgr24, (0, 0, 0));
        assert!(matches!(
            rgb_to_yuy2(&odd),
            Err(ConversionError::InvalidDimensions(3, 2))
        ));

        let odd_height = flat(2, 3, OutputLayout::Bgr24, (0, 0, 0));
        assert!(rgb_to_yuy2(&odd_height).is_ok());
        assert!(matches!(
            rgb_to_nv12(&odd_height),
            Err(ConversionError::InvalidDimensions(2, 3))
        ));

        let mut short = flat(2, 2, OutputLayout::Bgra32, (0, 0, 0));
        short.data.pop();
        assert!(matches!(
            rgb_to_nv12(&short),
            Err(ConversionError::InvalidBufferLength {
                expected: 16,
                actual: 15
            })
        ));
    }
}
