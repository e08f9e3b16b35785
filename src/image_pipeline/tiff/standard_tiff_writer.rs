use std::io::{Cursor, Write};

use ::tiff::encoder::colortype::{RGB8, RGBA8};
use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder};
use ::tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::decode::{OutputLayout, RgbImageData};
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes RGB8 or RGBA8 TIFFs, depending on the frame's layout.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_rgb_tiff(
        &self,
        image: &RgbImageData,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!(
            width = image.width,
            height = image.height,
            layout = ?image.layout,
            "Encoding TIFF image"
        );

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            // TIFF stores R,G,B order
            let pixels = image.to_rgb_order();
            let (width, height) = (image.width as u32, image.height as u32);
            match image.layout {
                OutputLayout::Bgr24 => encoder.write_image::<RGB8>(width, height, &pixels),
                OutputLayout::Bgra32 => encoder.write_image::<RGBA8>(width, height, &pixels),
            }
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!(bytes = buffer.len(), "TIFF encoding complete");
        Ok(())
    }
}
