//! Mosaic image types

use crate::image_pipeline::protocol::RawFrame;
use crate::image_pipeline::sink::PixelGrid;

/// Single-channel Bayer mosaic, one 8-bit sample per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples in row-major order
    pub data: Vec<u8>,
}

impl MosaicImage {
    pub fn as_grid(&self) -> PixelGrid<'_> {
        PixelGrid::Gray {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl From<RawFrame> for MosaicImage {
    fn from(frame: RawFrame) -> Self {
        let (width, height) = (frame.width(), frame.height());
        Self {
            width,
            height,
            data: frame.into_payload(),
        }
    }
}
