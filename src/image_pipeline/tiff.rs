//! TIFF writing module
//!
//! This module writes decoded frames to TIFF with various compression options.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::TiffCompression;
pub use writer::TiffWriter;
