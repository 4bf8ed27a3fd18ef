//! Debayering module for converting Bayer mosaics to RGB
//!
//! [`demosaic`] is the reference bilinear interpolation and has no
//! dependencies beyond this crate. [`CpuDebayer`] runs the same job through
//! the `bayer` crate and is kept as a selectable alternative.

pub mod bilinear;
pub mod cpu_debayer;
pub mod pattern;
pub mod types;

#[cfg(test)]
mod tests;

pub use bilinear::demosaic;
pub use cpu_debayer::CpuDebayer;
pub use pattern::{BayerPattern, Channel};
pub use types::{DebayerBackend, RgbImageData};

use crate::image_pipeline::common::error::Result;

/// Demosaics with the selected backend.
pub fn run(
    backend: DebayerBackend,
    mosaic: &[u8],
    width: usize,
    height: usize,
    pattern: BayerPattern,
) -> Result<RgbImageData> {
    match backend {
        DebayerBackend::Bilinear => demosaic(mosaic, width, height, pattern),
        DebayerBackend::BayerCrate => CpuDebayer::new().process(mosaic, width, height, pattern),
    }
}
