use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::sink::types::{OutputFormat, PixelGrid, TiffCompression};
use crate::image_pipeline::sink::writer::ImageSink;

/// Writes images to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSink;

impl FileImageSink {
    /// Encodes `grid` into any writer.
    pub fn encode(
        &self,
        grid: PixelGrid<'_>,
        format: OutputFormat,
        quality: u8,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (width, height) = (grid.width(), grid.height());
        if width == 0
            || height == 0
            || width * height * grid.channels() != grid.data().len()
            || u32::try_from(width.max(height)).is_err()
        {
            return Err(CaptureError::InvalidDimensions(width, height));
        }

        debug!(width, height, channels = grid.channels(), ?format, "Encoding image");

        match format {
            OutputFormat::Jpeg => encode_jpeg(grid, quality, output),
            OutputFormat::Png => encode_png(grid, output),
            OutputFormat::Tiff(compression) => encode_tiff(grid, compression, output),
        }
    }
}

impl ImageSink for FileImageSink {
    #[instrument(skip(self, path, bytes), fields(path = %path.display(), len = bytes.len()))]
    fn write_raw(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        std::fs::write(path, bytes)
            .map_err(|e| CaptureError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        debug!("Raw mosaic written");
        Ok(())
    }

    #[instrument(skip(self, path, grid), fields(path = %path.display()))]
    fn write_image(
        &self,
        path: &Path,
        grid: PixelGrid<'_>,
        format: OutputFormat,
        quality: u8,
    ) -> Result<()> {
        let mut encoded = Vec::new();
        self.encode(grid, format, quality, &mut encoded)?;

        std::fs::write(path, &encoded)
            .map_err(|e| CaptureError::OutputWriteError(format!("{}: {}", path.display(), e)))?;

        debug!(bytes = encoded.len(), "Image written");
        Ok(())
    }
}

fn color_type(grid: &PixelGrid<'_>) -> ExtendedColorType {
    match grid {
        PixelGrid::Gray { .. } => ExtendedColorType::L8,
        PixelGrid::Rgb(_) => ExtendedColorType::Rgb8,
    }
}

fn encode_jpeg(grid: PixelGrid<'_>, quality: u8, output: &mut dyn Write) -> Result<()> {
    let quality = quality.clamp(1, 100);
    JpegEncoder::new_with_quality(output, quality)
        .write_image(
            grid.data(),
            grid.width() as u32,
            grid.height() as u32,
            color_type(&grid),
        )
        .map_err(|e| CaptureError::EncodeError(e.to_string()))
}

fn encode_png(grid: PixelGrid<'_>, output: &mut dyn Write) -> Result<()> {
    PngEncoder::new(output)
        .write_image(
            grid.data(),
            grid.width() as u32,
            grid.height() as u32,
            color_type(&grid),
        )
        .map_err(|e| CaptureError::EncodeError(e.to_string()))
}

fn encode_tiff(
    grid: PixelGrid<'_>,
    compression: TiffCompression,
    output: &mut dyn Write,
) -> Result<()> {
    // TiffEncoder needs Seek, so encode into memory first
    let mut buffer = Vec::new();

    let compression = match compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Fast,
        ),
        TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Balanced,
        ),
        TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Best,
        ),
    };

    {
        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| CaptureError::EncodeError(e.to_string()))?
            .with_compression(compression);

        let (width, height) = (grid.width() as u32, grid.height() as u32);
        let written = match grid {
            PixelGrid::Gray { data, .. } => {
                encoder.write_image::<tiff::encoder::colortype::Gray8>(width, height, data)
            }
            PixelGrid::Rgb(image) => {
                encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &image.data)
            }
        };
        written.map_err(|e| CaptureError::EncodeError(e.to_string()))?;
    }

    output.write_all(&buffer)?;
    Ok(())
}
