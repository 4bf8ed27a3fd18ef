use std::fmt;
use std::path::Path;

use tracing::{debug, info, info_span, instrument, warn};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::conversions::config::CaptureConfig;
use crate::image_pipeline::conversions::outputs::{write_images, OutputPaths, RAW_FILE_NAME};
use crate::image_pipeline::debayer::{self, RgbImageData};
use crate::image_pipeline::link::{SerialLink, SerialPortLink};
use crate::image_pipeline::protocol::{
    parse_frame, Command, RawFrame, ResponseAccumulator, ResponseHeader, HEADER_LEN,
};
use crate::image_pipeline::raw::MosaicImage;
use crate::image_pipeline::sink::{FileImageSink, ImageSink};

/// Where a capture sequence currently stands.
///
/// A successful capture walks `Idle` through `Persisted` and returns to
/// `Idle`. `Timeout`, `MalformedFrame` and `Faulted` end the attempt and
/// remain visible until the next capture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CommandSent,
    Accumulating,
    HeaderParsed,
    Demosaiced,
    Persisted,
    Timeout,
    MalformedFrame,
    Faulted,
}

impl CaptureState {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CaptureState::Timeout | CaptureState::MalformedFrame | CaptureState::Faulted
        )
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Everything one successful capture produced.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    pub frame: RawFrame,
    pub image: RgbImageData,
    pub paths: OutputPaths,
}

/// Drives the capture exchange over a link it holds exclusively.
pub struct CaptureSession<L: SerialLink, S: ImageSink> {
    link: L,
    sink: S,
    config: CaptureConfig,
    state: CaptureState,
}

impl CaptureSession<SerialPortLink, FileImageSink> {
    /// Opens the configured serial port.
    pub fn open(config: CaptureConfig) -> Result<Self> {
        let link = SerialPortLink::open(&config.port, config.baud_rate, config.read_timeout)?;
        Ok(Self::with_custom(link, FileImageSink, config))
    }
}

impl<L: SerialLink, S: ImageSink> CaptureSession<L, S> {
    pub fn with_custom(link: L, sink: S, config: CaptureConfig) -> Self {
        Self {
            link,
            sink,
            config,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Requests one image and returns the validated frame.
    ///
    /// The session is back in `Idle` once the frame is returned.
    #[instrument(skip(self), fields(port = %self.config.port))]
    pub fn acquire(&mut self) -> Result<RawFrame> {
        let frame = self.receive()?;
        self.state = CaptureState::Idle;
        Ok(frame)
    }

    /// Acquires, demosaics and writes the raw, mosaic and color files into
    /// `output_dir`.
    #[instrument(skip(self, output_dir), fields(output_dir = %output_dir.as_ref().display()))]
    pub fn capture<P: AsRef<Path>>(&mut self, output_dir: P) -> Result<CaptureOutput> {
        let frame = self.receive()?;
        let result = self.process(frame, output_dir.as_ref());
        result.map_err(|e| self.fail(e))
    }

    fn receive(&mut self) -> Result<RawFrame> {
        self.state = CaptureState::Idle;
        let result = self.exchange();
        result.map_err(|e| self.fail(e))
    }

    fn exchange(&mut self) -> Result<RawFrame> {
        {
            let _span = info_span!("send_command").entered();
            self.link.reset_buffers()?;
            self.link.write(&Command::capture_image().encode())?;
            self.link.flush()?;
            self.state = CaptureState::CommandSent;
        }

        let mut accumulator = ResponseAccumulator::new(self.config.max_attempts);
        self.state = CaptureState::Accumulating;

        let header_bytes = {
            let _span = info_span!("read_header").entered();
            accumulator.accumulate(&mut self.link, HEADER_LEN)?
        };
        let mut head = [0u8; HEADER_LEN];
        head.copy_from_slice(&header_bytes);
        let header = ResponseHeader::from_bytes(head);
        self.check_header(&header)?;
        self.state = CaptureState::HeaderParsed;
        debug!(
            mode = header.mode,
            width = header.width,
            height = header.height,
            "Header received"
        );

        let payload = {
            let _span = info_span!("read_payload", len = header.payload_len()).entered();
            accumulator
                .accumulate(&mut self.link, header.payload_len())
                .map_err(|e| match e {
                    CaptureError::AcquisitionTimeout {
                        expected,
                        received,
                        attempts,
                    } => CaptureError::AcquisitionTimeout {
                        expected: expected + HEADER_LEN,
                        received: received + HEADER_LEN,
                        attempts,
                    },
                    other => other,
                })?
        };

        let mut buffer = header_bytes;
        buffer.extend_from_slice(&payload);
        let frame = parse_frame(&buffer)?;

        info!(
            width = frame.width(),
            height = frame.height(),
            reads = accumulator.attempts(),
            "Image received"
        );
        Ok(frame)
    }

    fn check_header(&self, header: &ResponseHeader) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }
        if (header.width, header.height) != (self.config.width, self.config.height) {
            warn!(
                width = header.width,
                height = header.height,
                expected_width = self.config.width,
                expected_height = self.config.height,
                "Header dimensions differ from configuration"
            );
            return Err(CaptureError::HeaderMismatch {
                width: header.width,
                height: header.height,
                expected_width: self.config.width,
                expected_height: self.config.height,
            });
        }
        Ok(())
    }

    fn process(&mut self, frame: RawFrame, output_dir: &Path) -> Result<CaptureOutput> {
        let image = {
            let _span = info_span!("demosaic", backend = %self.config.backend).entered();
            debayer::run(
                self.config.backend,
                frame.payload(),
                frame.width(),
                frame.height(),
                self.config.pattern,
            )?
        };
        self.state = CaptureState::Demosaiced;

        let raw_path = output_dir.join(RAW_FILE_NAME);
        {
            let _span = info_span!("write_raw").entered();
            self.sink.write_raw(&raw_path, frame.payload())?;
        }

        let mosaic = MosaicImage::from(frame.clone());
        let mut paths = write_images(&self.sink, &mosaic, &image, &self.config, output_dir)?;
        paths.raw = Some(raw_path);
        self.state = CaptureState::Persisted;

        info!(
            color = %paths.color.display(),
            mosaic = %paths.mosaic.display(),
            "Capture persisted"
        );
        self.state = CaptureState::Idle;

        Ok(CaptureOutput {
            frame,
            image,
            paths,
        })
    }

    fn fail(&mut self, error: CaptureError) -> CaptureError {
        self.state = match error {
            CaptureError::AcquisitionTimeout { .. } => CaptureState::Timeout,
            CaptureError::MalformedFrame { .. } | CaptureError::HeaderMismatch { .. } => {
                CaptureState::MalformedFrame
            }
            _ => CaptureState::Faulted,
        };
        warn!(state = %self.state, %error, "Capture failed");
        error
    }
}
