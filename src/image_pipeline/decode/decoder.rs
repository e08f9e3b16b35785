use rayon::prelude::*;
use tracing::{debug, warn};

use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::nv12_decoder::Nv12Decoder;
use crate::image_pipeline::decode::types::{OutputLayout, PixelFormat, RgbImageData};
use crate::image_pipeline::decode::yuy2_decoder::Yuy2Decoder;

pub trait FrameDecoder {
    fn format(&self) -> PixelFormat;

    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<RgbImageData>;
}

pub fn decoder_for(format: PixelFormat) -> Box<dyn FrameDecoder + Send + Sync> {
    match format {
        PixelFormat::Nv12 => Box::new(Nv12Decoder),
        PixelFormat::Yuy2 => Box::new(Yuy2Decoder),
    }
}

/// Checks the declared dimensions and the buffer length before any pixel is read.
pub(crate) fn validate_input(
    format: PixelFormat,
    data: &[u8],
    width: usize,
    height: usize,
    config: &ConversionConfig,
) -> Result<()> {
    if config.validate_dimensions {
        let odd_height = format == PixelFormat::Nv12 && height % 2 != 0;
        if width == 0 || height == 0 || width % 2 != 0 || odd_height {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
    }

    let expected = format
        .minimum_len(width, height)
        .ok_or(ConversionError::InvalidDimensions(width, height))?;

    if data.len() < expected {
        warn!(
            format = format.name(),
            expected,
            actual = data.len(),
            "Too few bytes for frame"
        );
        return Err(ConversionError::UndersizedInput {
            format: format.name(),
            expected,
            actual: data.len(),
        });
    }

    Ok(())
}

/// Allocates the output frame and fills it one row at a time.
///
/// `decode_row` receives the row index and that row's output bytes. Rows never
/// write outside their own slice, so they may run on the rayon pool.
pub(crate) fn decode_rows<F>(
    width: usize,
    height: usize,
    config: &ConversionConfig,
    decode_row: F,
) -> RgbImageData
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    let layout: OutputLayout = config.output_layout();
    let mut image = RgbImageData::blank(width, height, layout);
    let row_bytes = image.row_bytes();

    if image.data.is_empty() {
        return image;
    }

    debug!(width, height, ?layout, parallel = config.parallel, "Decoding rows");

    if config.parallel {
        image
            .data
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, dst_line)| decode_row(y, dst_line));
    } else {
        image
            .data
            .chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, dst_line)| decode_row(y, dst_line));
    }

    image
}

impl<D: FrameDecoder + ?Sized> FrameDecoder for Box<D> {
    fn format(&self) -> PixelFormat {
        (**self).format()
    }

    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<RgbImageData> {
        (**self).decode(data, width, height, config)
    }
}
