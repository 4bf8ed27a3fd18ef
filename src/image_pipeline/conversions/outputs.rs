use std::path::{Path, PathBuf};

use tracing::info_span;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::config::CaptureConfig;
use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::raw::MosaicImage;
use crate::image_pipeline::sink::{ImageSink, PixelGrid};

/// File name of the unmodified mosaic payload
pub const RAW_FILE_NAME: &str = "image.bayer";
/// File stem of the single-channel mosaic preview
pub const MOSAIC_STEM: &str = "bayer";
/// File stem of the demosaiced image
pub const COLOR_STEM: &str = "color";

/// Files produced by one capture or conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Only set when the raw payload was written by this run
    pub raw: Option<PathBuf>,
    pub mosaic: PathBuf,
    pub color: PathBuf,
}

/// Writes the mosaic preview and the color image next to each other.
pub(crate) fn write_images<S: ImageSink + ?Sized>(
    sink: &S,
    mosaic: &MosaicImage,
    image: &RgbImageData,
    config: &CaptureConfig,
    output_dir: &Path,
) -> Result<OutputPaths> {
    let extension = config.format.extension();
    let mosaic_path = output_dir.join(format!("{MOSAIC_STEM}.{extension}"));
    let color_path = output_dir.join(format!("{COLOR_STEM}.{extension}"));

    {
        let _span = info_span!("encode_mosaic").entered();
        sink.write_image(&mosaic_path, mosaic.as_grid(), config.format, config.quality)?;
    }
    {
        let _span = info_span!("encode_color").entered();
        sink.write_image(&color_path, PixelGrid::Rgb(image), config.format, config.quality)?;
    }

    Ok(OutputPaths {
        raw: None,
        mosaic: mosaic_path,
        color: color_path,
    })
}
