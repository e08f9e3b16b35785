//! Conversion configuration types

use crate::image_pipeline::decode::OutputLayout;
use crate::image_pipeline::tiff::TiffCompression;

/// Configuration shared by the decoders and the YUV to TIFF pipeline
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Emit 3 bytes per pixel (B,G,R) instead of 4 (B,G,R,0xFF)
    pub ignore_alpha: bool,
    /// Reject zero sized, odd width and odd height NV12 frames before decoding.
    /// When disabled an odd trailing column is left unwritten.
    pub validate_dimensions: bool,
    /// Decode rows on the rayon thread pool
    pub parallel: bool,
    /// Compression method used by the TIFF writer
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            ignore_alpha: false,
            validate_dimensions: true,
            parallel: false,
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout::from_ignore_alpha(self.ignore_alpha)
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    ignore_alpha: Option<bool>,
    validate_dimensions: Option<bool>,
    parallel: Option<bool>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl ConversionConfigBuilder {
    pub fn ignore_alpha(mut self, ignore: bool) -> Self {
        self.ignore_alpha = Some(ignore);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            ignore_alpha: self.ignore_alpha.unwrap_or(default.ignore_alpha),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            parallel: self.parallel.unwrap_or(default.parallel),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
