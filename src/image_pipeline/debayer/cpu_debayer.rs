use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::{debug, info};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::debayer::pattern::BayerPattern;
use crate::image_pipeline::debayer::types::RgbImageData;

/// Linear demosaic from the `bayer` crate.
pub struct CpuDebayer;

impl CpuDebayer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(
        &self,
        mosaic: &[u8],
        width: usize,
        height: usize,
        pattern: BayerPattern,
    ) -> Result<RgbImageData> {
        if width < 2 || height < 2 || width.checked_mul(height) != Some(mosaic.len()) {
            return Err(CaptureError::InvalidDimensions(width, height));
        }
        info!("Starting CPU debayering for image {}x{}", width, height);

        let mut output_buf = vec![0u8; width * height * 3];
        let mut cursor = Cursor::new(mosaic);

        {
            let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth8, &mut output_buf);

            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth8,
                cfa(pattern),
                Demosaic::Linear,
                &mut output_raster,
            )
            .map_err(|e| CaptureError::DemosaicError(format!("{:?}", e)))?;
        }

        debug!(pattern = %pattern, "bayer crate demosaic complete");

        Ok(RgbImageData {
            width,
            height,
            data: output_buf,
        })
    }
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new()
    }
}

fn cfa(pattern: BayerPattern) -> CFA {
    match pattern {
        BayerPattern::Rggb => CFA::RGGB,
        BayerPattern::Bggr => CFA::BGGR,
        BayerPattern::Grbg => CFA::GRBG,
        BayerPattern::Gbrg => CFA::GBRG,
    }
}
