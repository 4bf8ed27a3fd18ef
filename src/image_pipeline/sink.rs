//! Image output module
//!
//! Persists the raw mosaic as a flat file and encodes mosaic or color
//! images as JPEG, PNG or TIFF.

mod file_sink;
pub mod types;
mod writer;


pub use file_sink::FileImageSink;
pub use types::{OutputFormat, PixelGrid, TiffCompression, DEFAULT_QUALITY};
pub use writer::ImageSink;
