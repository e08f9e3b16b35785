use thiserror::Error;

use crate::image_pipeline::common::color::Color;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Too few bytes for {format}: was expecting {expected}, but got {actual}")]
    UndersizedInput {
        format: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidBufferLength { expected: usize, actual: usize },

    #[error("Point ({x}, {y}) lies outside a {width}x{height} image")]
    PointOutOfBounds {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("Brightness {target} unreachable, channels saturated at {reached:?}")]
    TargetUnreachable { target: f64, reached: Color },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
