use tracing::instrument;

use crate::image_pipeline::color_space::yuv_to_rgb;
use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::decoder::{FrameDecoder, decode_rows, validate_input};
use crate::image_pipeline::decode::types::{OutputLayout, PixelFormat, RgbImageData};

/// YUY2 to packed BGR(A) decoder.
///
/// Each 4 byte group yields one colour for both of its pixels, from the mean of
/// the two luma samples. Chroma is taken as `U = group[3]`, `V = group[1]`.
pub struct Yuy2Decoder;

impl FrameDecoder for Yuy2Decoder {
    fn format(&self) -> PixelFormat {
        PixelFormat::Yuy2
    }

    #[instrument(skip(self, data, config), fields(input_size = data.len()))]
    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<RgbImageData> {
        validate_input(PixelFormat::Yuy2, data, width, height, config)?;

        let layout = config.output_layout();
        Ok(decode_rows(width, height, config, |y, dst_line| {
            decode_row(data, width, y, layout, dst_line)
        }))
    }
}

/// Decodes a YUY2 frame, failing on undersized input or unusable dimensions.
pub fn yuy2_to_rgb(
    data: &[u8],
    width: usize,
    height: usize,
    ignore_alpha: bool,
) -> Result<RgbImageData> {
    let config = ConversionConfig::builder().ignore_alpha(ignore_alpha).build();
    Yuy2Decoder.decode(data, width, height, &config)
}

fn decode_row(data: &[u8], width: usize, y: usize, layout: OutputLayout, dst_line: &mut [u8]) {
    let bpp = layout.bytes_per_pixel();
    let src_line = &data[y * width * 2..][..width * 2];

    for x in (0..width / 2).map(|pair| pair * 2) {
        let group = &src_line[x * 2..][..4];
        let luma = ((group[0] as u16 + group[2] as u16) >> 1) as u8;
        let u = group[3];
        let v = group[1];

        let rgb = yuv_to_rgb(luma, u, v);
        layout.write_pixel(&mut dst_line[x * bpp..], rgb);
        layout.write_pixel(&mut dst_line[(x + 1) * bpp..], rgb);
    }
}
