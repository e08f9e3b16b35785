//! Fixed-point BT.601 conversion between one RGB triple and one YUV triple
//!
//! Coefficients are the usual studio-swing approximations scaled by 256.
//! The forward direction truncates its result to a byte while the inverse
//! direction clamps; callers comparing against other implementations should
//! expect exactly this asymmetry.

/// Converts an RGB888 pixel to YUV.
///
/// ```text
/// Y = ((  66 * R + 129 * G +  25 * B + 128) >> 8) +  16
/// U = (( -38 * R -  74 * G + 112 * B + 128) >> 8) + 128
/// V = (( 112 * R -  94 * G -  18 * B + 128) >> 8) + 128
/// ```
#[inline]
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);

    let y = ((66 * r + 129 * g + 25 * b + 128) >> 8) + 16;
    let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
    let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;

    // Truncating casts, not clamps.
    (y as u8, u as u8, v as u8)
}

/// Converts a YUV pixel back to RGB888, clamping every channel to `[0, 255]`.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;

    let r = clip8((298 * c + 409 * e + 128) >> 8);
    let g = clip8((298 * c - 100 * d - 208 * e + 128) >> 8);
    let b = clip8((298 * c + 516 * d + 128) >> 8);

    (r, g, b)
}

#[inline]
pub fn clip<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[inline]
pub fn clip8(value: i32) -> u8 {
    clip(value, 0, 255) as u8
}
