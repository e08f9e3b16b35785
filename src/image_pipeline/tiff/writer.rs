use std::io::Write;

use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::RgbImageData;

pub trait TiffWriter {
    fn write_rgb_tiff(
        &self,
        image: &RgbImageData,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
