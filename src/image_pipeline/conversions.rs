//! Pipeline conversions module
//!
//! Orchestrates a live capture from the robot and the offline conversion of
//! previously stored mosaics.

mod capture_session;
mod config;
mod outputs;
mod raw_to_image;


pub use capture_session::{CaptureOutput, CaptureSession, CaptureState};
pub use config::{
    CaptureConfig, CaptureConfigBuilder, DEFAULT_BAUD_RATE, DEFAULT_HEIGHT, DEFAULT_PORT,
    DEFAULT_READ_TIMEOUT, DEFAULT_WIDTH,
};
pub use outputs::{OutputPaths, COLOR_STEM, MOSAIC_STEM, RAW_FILE_NAME};
pub use raw_to_image::{convert_framed_file, convert_raw_file, RawToImagePipeline};
