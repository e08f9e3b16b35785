//! Common utilities module
//!
//! This module contains shared types and utilities used across the image pipeline.

pub mod color;
pub mod config;
pub mod error;
pub mod timing;

pub use color::{Color, Point};
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use error::{ConversionError, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
