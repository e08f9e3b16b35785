//! Image processing pipeline module
//!
//! Integer colour space math, NV12/YUY2 frame decoding and encoding, pixel
//! sampling, brightness adjustment and TIFF output.

pub mod brightness;
pub mod color_space;
pub mod common;
pub mod conversions;
pub mod decode;
pub mod encode;
pub mod sampler;
pub mod tiff;

pub use common::{
    Color,
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionError,
    PipelineTimings,
    Point,
    Result,
};

pub use color_space::{rgb_to_yuv, yuv_to_rgb};

pub use decode::{
    FrameDecoder,
    Nv12Decoder,
    OutputLayout,
    PixelFormat,
    RgbImageData,
    Yuy2Decoder,
    decoder_for,
    nv12_to_rgb,
    yuy2_to_rgb,
};

pub use encode::{rgb_to_nv12, rgb_to_yuy2};
pub use sampler::color_at;
pub use brightness::{brightness, with_brightness};

pub use tiff::{
    StandardTiffWriter,
    TiffCompression,
    TiffWriter,
};

pub use conversions::YuvToTiffPipeline;
