//! Single pixel colour lookup in packed B,G,R[,A] buffers

use tracing::debug;

use crate::image_pipeline::common::color::{Color, Point};
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Resolves the colour at `point` in a packed `width` x `height` buffer.
///
/// Bytes per pixel are inferred as `buffer.len() / height / width`; anything
/// that leaves fewer than three bytes per pixel is rejected. The pixel is read
/// as `B, G, R` and the returned alpha is always `0xFF`, whatever the source
/// holds. Fractional coordinates are floored.
pub fn color_at(buffer: &[u8], width: usize, height: usize, point: Point) -> Result<Color> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }

    let bytes_per_pixel = buffer.len() / height / width;
    debug!(
        width,
        height,
        len = buffer.len(),
        bytes_per_pixel,
        "Inferred bytes per pixel"
    );
    if bytes_per_pixel < 3 {
        return Err(ConversionError::UnsupportedFormat(format!(
            "{} bytes per pixel",
            bytes_per_pixel
        )));
    }

    let in_range = |v: f64, limit: usize| v.is_finite() && v >= 0.0 && v.floor() < limit as f64;
    if !in_range(point.x, width) || !in_range(point.y, height) {
        return Err(ConversionError::PointOutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        });
    }

    let (x, y) = (point.x.floor() as usize, point.y.floor() as usize);
    let index = y * width * bytes_per_pixel + x * bytes_per_pixel;
    let pixel = &buffer[index..index + 3];
    debug!(index, ?pixel, "Picked pixel");

    Ok(Color {
        a: 0xFF,
        r: pixel[2],
        g: pixel[1],
        b: pixel[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BGRA_2X2: [u8; 16] = [
        10, 20, 30, 0, //
        11, 21, 31, 7, //
        12, 22, 32, 0, //
        13, 23, 33, 0,
    ];

    #[test]
    fn test_second_pixel_with_forced_alpha() {
        let color = color_at(&BGRA_2X2, 2, 2, Point::new(1.0, 0.0)).unwrap();
        assert_eq!(color, Color::argb(0xFF, 31, 21, 11));
    }

    #[test]
    fn test_fractional_point_is_floored() {
        let color = color_at(&BGRA_2X2, 2, 2, Point::new(0.9, 1.7)).unwrap();
        assert_eq!(color, Color::rgb(32, 22, 12));
    }

    #[test]
    fn test_three_bytes_per_pixel() {
        let bgr = [1, 2, 3, 4, 5, 6];
        let color = color_at(&bgr, 2, 1, Point::new(1.0, 0.0)).unwrap();
        assert_eq!(color, Color::rgb(6, 5, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        for point in [
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(-0.5, 0.0),
            Point::new(f64::NAN, 0.0),
        ] {
            assert!(matches!(
                color_at(&BGRA_2X2, 2, 2, point),
                Err(ConversionError::PointOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_buffers() {
        assert!(matches!(
            color_at(&BGRA_2X2, 0, 2, Point::new(0.0, 0.0)),
            Err(ConversionError::InvalidDimensions(0, 2))
        ));
        assert!(matches!(
            color_at(&BGRA_2X2[..8], 2, 2, Point::new(0.0, 0.0)),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }
}
