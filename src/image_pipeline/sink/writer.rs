use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::sink::types::{OutputFormat, PixelGrid};

pub trait ImageSink {
    /// Writes `bytes` unmodified.
    fn write_raw(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Encodes `grid` in `format`; `quality` only affects lossy formats.
    fn write_image(
        &self,
        path: &Path,
        grid: PixelGrid<'_>,
        format: OutputFormat,
        quality: u8,
    ) -> Result<()>;
}
