//! Readers for mosaics stored by this tool.
//!
//! `image.bayer` files hold the bare payload and carry no dimensions, so the
//! caller supplies them. Full response dumps start with the wire header and
//! describe themselves.

use tracing::debug;

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::protocol::parse_frame;
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::MosaicImage;

/// Headerless mosaic of known dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FlatMosaicReader {
    width: usize,
    height: usize,
}

impl FlatMosaicReader {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl RawImageReader for FlatMosaicReader {
    fn read_raw(&self, data: &[u8]) -> Result<MosaicImage> {
        debug!("Reading flat mosaic, {} bytes", data.len());

        let expected = self.width * self.height;
        if expected == 0 {
            return Err(CaptureError::InvalidDimensions(self.width, self.height));
        }
        if data.len() != expected {
            return Err(CaptureError::InputReadError(format!(
                "expected {} bytes for a {}x{} mosaic, found {}",
                expected,
                self.width,
                self.height,
                data.len()
            )));
        }

        Ok(MosaicImage {
            width: self.width,
            height: self.height,
            data: data.to_vec(),
        })
    }
}

/// Mosaic stored together with its `[mode][width][height]` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramedMosaicReader;

impl RawImageReader for FramedMosaicReader {
    fn read_raw(&self, data: &[u8]) -> Result<MosaicImage> {
        let frame = parse_frame(data)?;
        debug!(
            mode = frame.header().mode,
            width = frame.width(),
            height = frame.height(),
            "Read framed mosaic"
        );
        Ok(frame.into())
    }
}
