use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::config::ConversionConfig;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::YuvToTiffPipeline;
use crate::image_pipeline::decode::{FrameDecoder, OutputLayout, PixelFormat, RgbImageData};
use crate::image_pipeline::tiff::TiffWriter;

struct MockDecoder {
    should_fail: bool,
}

impl FrameDecoder for MockDecoder {
    fn format(&self) -> PixelFormat {
        PixelFormat::Nv12
    }

    fn decode(
        &self,
        _data: &[u8],
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<RgbImageData> {
        if self.should_fail {
            return Err(ConversionError::UndersizedInput {
                format: "NV12",
                expected: width * height * 3 / 2,
                actual: 0,
            });
        }
        Ok(RgbImageData::blank(width, height, config.output_layout()))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<RgbImageData>>>,
}

impl TiffWriter for MockWriter {
    fn write_rgb_tiff(
        &self,
        image: &RgbImageData,
        _output: &mut dyn Write,
        _config: &ConversionConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn pipeline(
    decoder_fails: bool,
    writer_fails: bool,
    config: ConversionConfig,
) -> (
    YuvToTiffPipeline<MockDecoder, MockWriter>,
    Arc<Mutex<Vec<RgbImageData>>>,
) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let decoder = MockDecoder {
        should_fail: decoder_fails,
    };
    let writer = MockWriter {
        should_fail: writer_fails,
        written_data: written.clone(),
    };
    (YuvToTiffPipeline::with_custom(decoder, writer, config), written)
}

#[test]
fn test_successful_conversion() {
    let (pipeline, written) = pipeline(false, false, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let image = pipeline
        .convert(b"fake nv12 data", 8, 4, &mut output)
        .unwrap();

    assert_eq!((image.width, image.height), (8, 4));
    assert_eq!(written.lock().unwrap().len(), 1);
    assert_eq!(written.lock().unwrap()[0].layout, OutputLayout::Bgra32);
}

#[test]
fn test_decoder_failure() {
    let (pipeline, written) = pipeline(true, false, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake nv12 data", 8, 4, &mut output);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::UndersizedInput { .. }
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _) = pipeline(false, true, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake nv12 data", 8, 4, &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
}

#[test]
fn test_timings_record_each_step() {
    let (pipeline, _) = pipeline(false, false, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let (_, timings) = pipeline
        .convert_with_timings(b"", 2, 2, &mut output)
        .unwrap();

    let names: Vec<&str> = timings.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["decode_frame", "encode_tiff"]);
}

#[test]
fn test_config_is_replaceable() {
    let (mut pipeline, written) = pipeline(false, false, ConversionConfig::default());
    pipeline.set_config(ConversionConfig::builder().ignore_alpha(true).build());
    assert!(pipeline.config().ignore_alpha);

    let mut output = Cursor::new(Vec::new());
    pipeline.convert(b"", 2, 2, &mut output).unwrap();
    assert_eq!(written.lock().unwrap()[0].layout, OutputLayout::Bgr24);
}

#[test]
fn test_real_nv12_frame_to_tiff() {
    let (width, height) = (8, 4);
    let data = vec![128u8; width * height * 3 / 2];
    let pipeline = YuvToTiffPipeline::new(PixelFormat::Nv12, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let image = pipeline.convert(&data, width, height, &mut output).unwrap();

    assert_eq!(image.data.len(), width * height * 4);
    assert!(!output.into_inner().is_empty());
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("frame.yuy2");
    let output = dir.path().join("frame.tiff");
    std::fs::write(&input, [235u8, 128, 235, 128].repeat(4 * 2 / 2)).unwrap();

    let config = ConversionConfig::builder().ignore_alpha(true).build();
    let pipeline = YuvToTiffPipeline::new(PixelFormat::Yuy2, config);
    let (image, timings) = pipeline
        .convert_file_with_timings(&input, &output, 4, 2)
        .unwrap();

    assert!(image.data.iter().all(|&b| b == 255));
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
    assert!(timings.get_step("read_input_file").is_some());
    assert!(timings.get_step("decode_frame").is_some());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = YuvToTiffPipeline::new(PixelFormat::Nv12, ConversionConfig::default());

    let result = pipeline.convert_file(
        dir.path().join("missing.nv12"),
        dir.path().join("out.tiff"),
        4,
        4,
    );
    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}
