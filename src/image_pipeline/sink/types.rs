//! Output encoding types

use crate::image_pipeline::debayer::RgbImageData;

/// JPEG quality used when none is configured.
pub const DEFAULT_QUALITY: u8 = 70;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Encoding used for the mosaic preview and the color image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, honours the quality setting
    #[default]
    Jpeg,
    Png,
    Tiff(TiffCompression),
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Tiff(_) => "tiff",
        }
    }
}

/// Pixels handed to an [`ImageSink`](crate::image_pipeline::sink::ImageSink).
#[derive(Debug, Clone, Copy)]
pub enum PixelGrid<'a> {
    /// The mosaic itself, one sample per pixel
    Gray {
        width: usize,
        height: usize,
        data: &'a [u8],
    },
    /// A demosaiced image, interleaved RGB
    Rgb(&'a RgbImageData),
}

impl<'a> PixelGrid<'a> {
    pub fn width(&self) -> usize {
        match *self {
            PixelGrid::Gray { width, .. } => width,
            PixelGrid::Rgb(image) => image.width,
        }
    }

    pub fn height(&self) -> usize {
        match *self {
            PixelGrid::Gray { height, .. } => height,
            PixelGrid::Rgb(image) => image.height,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            PixelGrid::Gray { .. } => 1,
            PixelGrid::Rgb(_) => 3,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        match *self {
            PixelGrid::Gray { data, .. } => data,
            PixelGrid::Rgb(image) => &image.data,
        }
    }
}
