use tracing::instrument;

use crate::image_pipeline::color_space::yuv_to_rgb;
use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::decoder::{FrameDecoder, decode_rows, validate_input};
use crate::image_pipeline::decode::types::{OutputLayout, PixelFormat, RgbImageData};

/// NV12 to packed BGR(A) decoder.
///
/// Every 2x2 block shares one colour: the luma of the four samples is averaged
/// and converted together with the block's chroma pair. Both pixels of a
/// horizontal pair receive the same value.
pub struct Nv12Decoder;

impl FrameDecoder for Nv12Decoder {
    fn format(&self) -> PixelFormat {
        PixelFormat::Nv12
    }

    #[instrument(skip(self, data, config), fields(input_size = data.len()))]
    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<RgbImageData> {
        validate_input(PixelFormat::Nv12, data, width, height, config)?;

        let layout = config.output_layout();
        Ok(decode_rows(width, height, config, |y, dst_line| {
            decode_row(data, width, height, y, layout, dst_line)
        }))
    }
}

/// Decodes an NV12 frame, failing on undersized input or unusable dimensions.
pub fn nv12_to_rgb(
    data: &[u8],
    width: usize,
    height: usize,
    ignore_alpha: bool,
) -> Result<RgbImageData> {
    let config = ConversionConfig::builder().ignore_alpha(ignore_alpha).build();
    Nv12Decoder.decode(data, width, height, &config)
}

fn decode_row(
    data: &[u8],
    width: usize,
    height: usize,
    y: usize,
    layout: OutputLayout,
    dst_line: &mut [u8],
) {
    let bpp = layout.bytes_per_pixel();
    let luma_len = width * height;

    // The last row pairs with itself instead of reading into the chroma plane.
    let next_y = (y + 1).min(height - 1);
    let luma_row = &data[y * width..][..width];
    let next_luma_row = &data[next_y * width..][..width];
    let uv_row = &data[luma_len + (y / 2) * width..][..width];

    for x in (0..width / 2).map(|pair| pair * 2) {
        let sum = luma_row[x] as u32
            + luma_row[x + 1] as u32
            + next_luma_row[x] as u32
            + next_luma_row[x + 1] as u32;
        let luma = (sum / 4) as u8;
        let u = uv_row[x];
        let v = uv_row[x + 1];

        let rgb = yuv_to_rgb(luma, u, v);
        layout.write_pixel(&mut dst_line[x * bpp..], rgb);
        layout.write_pixel(&mut dst_line[(x + 1) * bpp..], rgb);
    }
}
