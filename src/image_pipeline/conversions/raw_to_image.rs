use std::path::Path;

use tracing::{info, info_span, instrument};

use crate::image_pipeline::{
    common::error::{CaptureError, Result},
    conversions::config::CaptureConfig,
    conversions::outputs::{write_images, OutputPaths},
    debayer,
    raw::{FlatMosaicReader, FramedMosaicReader, RawImageReader},
    sink::{FileImageSink, ImageSink},
};

/// Demosaics a stored mosaic and writes the preview and color images.
pub struct RawToImagePipeline<R: RawImageReader, S: ImageSink> {
    reader: R,
    sink: S,
    config: CaptureConfig,
}

impl RawToImagePipeline<FlatMosaicReader, FileImageSink> {
    /// Reads headerless `image.bayer` files of the configured dimensions.
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            reader: FlatMosaicReader::new(config.width as usize, config.height as usize),
            sink: FileImageSink,
            config,
        }
    }
}

impl RawToImagePipeline<FramedMosaicReader, FileImageSink> {
    /// Reads full response dumps; dimensions come from the stored header.
    pub fn framed(config: CaptureConfig) -> Self {
        Self {
            reader: FramedMosaicReader,
            sink: FileImageSink,
            config,
        }
    }
}

impl<R: RawImageReader, S: ImageSink> RawToImagePipeline<R, S> {
    pub fn with_custom(reader: R, sink: S, config: CaptureConfig) -> Self {
        Self {
            reader,
            sink,
            config,
        }
    }

    #[instrument(skip(self, input_data, output_dir), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output_dir: &Path) -> Result<OutputPaths> {
        info!("Starting mosaic conversion");

        let mosaic = {
            let _span = info_span!("read_mosaic").entered();
            self.reader.read_raw(input_data)?
        };

        let image = {
            let _span = info_span!(
                "demosaic",
                width = mosaic.width,
                height = mosaic.height
            )
            .entered();
            debayer::run(
                self.config.backend,
                &mosaic.data,
                mosaic.width,
                mosaic.height,
                self.config.pattern,
            )?
        };

        let paths = write_images(&self.sink, &mosaic, &image, &self.config, output_dir)?;

        info!(
            width = mosaic.width,
            height = mosaic.height,
            "Conversion complete"
        );
        Ok(paths)
    }

    #[instrument(skip(self, input_path, output_dir))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<OutputPaths> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Converting file"
        );

        let input_data = {
            let _span = info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                CaptureError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.convert(&input_data, output_dir)
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CaptureConfig) {
        self.config = config;
    }
}

/// Converts a stored `image.bayer` file of the configured dimensions.
pub fn convert_raw_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    config: CaptureConfig,
    output_dir: Q,
) -> Result<OutputPaths> {
    RawToImagePipeline::new(config).convert_file(input_path, output_dir)
}

/// Converts a stored `[mode][width][height][mosaic]` response dump.
pub fn convert_framed_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    config: CaptureConfig,
    output_dir: Q,
) -> Result<OutputPaths> {
    RawToImagePipeline::framed(config).convert_file(input_path, output_dir)
}
