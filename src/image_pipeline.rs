//! Image capture pipeline module
//!
//! This module provides a structured approach to pulling a Bayer frame off the
//! e-puck2 camera, with separate modules for the serial link, the wire
//! protocol, demosaicing, image output and capture orchestration.

pub mod common;
pub mod link;
pub mod protocol;
pub mod debayer;
pub mod sink;
pub mod raw;
pub mod conversions;

#[cfg(test)]
mod testing;

pub use common::{
    CaptureError,
    Result,
};

pub use link::{
    SerialLink,
    SerialPortLink,
};

pub use protocol::{
    Command,
    RawFrame,
    ResponseAccumulator,
    ResponseHeader,
};

pub use debayer::{
    BayerPattern,
    DebayerBackend,
    RgbImageData,
};

pub use sink::{
    FileImageSink,
    ImageSink,
    OutputFormat,
    TiffCompression,
};

pub use raw::{
    MosaicImage,
    RawImageReader,
};

pub use conversions::{
    CaptureConfig,
    CaptureConfigBuilder,
    CaptureSession,
    CaptureState,
    RawToImagePipeline,
};
