use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::{
        config::ConversionConfig,
        error::{ConversionError, Result},
        timing::PipelineTimings,
    },
    decode::{FrameDecoder, PixelFormat, RgbImageData, decoder_for},
    tiff::{StandardTiffWriter, TiffWriter},
};

pub struct YuvToTiffPipeline<D: FrameDecoder, W: TiffWriter> {
    decoder: D,
    writer: W,
    config: ConversionConfig,
}

impl YuvToTiffPipeline<Box<dyn FrameDecoder + Send + Sync>, StandardTiffWriter> {
    pub fn new(format: PixelFormat, config: ConversionConfig) -> Self {
        Self {
            decoder: decoder_for(format),
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<D: FrameDecoder, W: TiffWriter> YuvToTiffPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: ConversionConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    /// Decodes one `width` x `height` frame and writes it to `output` as TIFF.
    /// The decoded frame is returned for further inspection.
    pub fn convert(
        &self,
        input_data: &[u8],
        width: usize,
        height: usize,
        output: &mut dyn Write,
    ) -> Result<RgbImageData> {
        self.convert_with_timings(input_data, width, height, output)
            .map(|(image, _)| image)
    }

    #[instrument(
        skip(self, input_data, output),
        fields(format = %self.decoder.format(), input_size = input_data.len())
    )]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        width: usize,
        height: usize,
        output: &mut dyn Write,
    ) -> Result<(RgbImageData, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting YUV to TIFF conversion");

        let image = timings.time("decode_frame", || {
            let _span = tracing::info_span!("decode_frame", width, height).entered();
            self.decoder.decode(input_data, width, height, &self.config)
        })?;

        timings.time("encode_tiff", || {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_rgb_tiff(&image, output, &self.config)
        })?;

        info!(
            width = image.width,
            height = image.height,
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok((image, timings))
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        width: usize,
        height: usize,
    ) -> Result<RgbImageData> {
        self.convert_file_with_timings(input_path, output_path, width, height)
            .map(|(image, _)| image)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        width: usize,
        height: usize,
    ) -> Result<(RgbImageData, PipelineTimings)> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        let mut timings = PipelineTimings::new();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = timings.time("read_input_file", || {
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })
        })?;

        let mut output_file = timings.time("create_output_file", || {
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })
        })?;

        let (image, conversion_timings) =
            self.convert_with_timings(&input_data, width, height, &mut output_file)?;
        for step in conversion_timings.steps() {
            timings.add_step(step.name.clone(), step.duration);
        }

        Ok((image, timings))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
