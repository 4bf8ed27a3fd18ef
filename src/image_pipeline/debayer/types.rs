//! Types for debayering operations

use std::fmt;

/// RGB image data after debayering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

impl RgbImageData {
    /// The `[r, g, b]` triple at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Which implementation turns the mosaic into RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DebayerBackend {
    /// In-crate bilinear interpolation with mirrored borders
    #[default]
    Bilinear,
    /// Linear demosaic from the `bayer` crate
    BayerCrate,
}

impl fmt::Display for DebayerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bilinear => f.write_str("bilinear"),
            Self::BayerCrate => f.write_str("bayer-crate"),
        }
    }
}
