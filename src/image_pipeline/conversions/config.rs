//! Capture configuration types

use std::time::Duration;

use crate::image_pipeline::debayer::{BayerPattern, DebayerBackend};
use crate::image_pipeline::protocol::DEFAULT_MAX_ATTEMPTS;
use crate::image_pipeline::sink::{OutputFormat, DEFAULT_QUALITY};

/// Default serial device of the e-puck2 USB bridge on Linux
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD_RATE: u32 = 2_000_000;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_WIDTH: u8 = 160;
pub const DEFAULT_HEIGHT: u8 = 120;

/// Configuration for a capture or an offline conversion
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Serial device to open
    pub port: String,
    pub baud_rate: u32,
    /// Longest a single read may block
    pub read_timeout: Duration,
    /// Reads allowed for one capture, header and payload together
    pub max_attempts: u32,
    /// Expected frame width in pixels
    pub width: u8,
    /// Expected frame height in pixels
    pub height: u8,
    /// Reject responses whose header disagrees with `width` x `height`
    pub validate_dimensions: bool,
    /// Filter layout of the sensor
    pub pattern: BayerPattern,
    pub backend: DebayerBackend,
    /// Encoding for the mosaic preview and color image
    pub format: OutputFormat,
    /// Lossy compression quality, 1-100
    pub quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            validate_dimensions: true,
            pattern: BayerPattern::default(),
            backend: DebayerBackend::default(),
            format: OutputFormat::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl CaptureConfig {
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }

    /// Payload bytes of a frame with the configured dimensions.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Worst-case time spent waiting for one response.
    pub fn wait_bound(&self) -> Duration {
        self.read_timeout * self.max_attempts
    }
}

/// Builder for CaptureConfig
#[derive(Default)]
pub struct CaptureConfigBuilder {
    port: Option<String>,
    baud_rate: Option<u32>,
    read_timeout: Option<Duration>,
    max_attempts: Option<u32>,
    width: Option<u8>,
    height: Option<u8>,
    validate_dimensions: Option<bool>,
    pattern: Option<BayerPattern>,
    backend: Option<DebayerBackend>,
    format: Option<OutputFormat>,
    quality: Option<u8>,
}

impl CaptureConfigBuilder {
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = Some(baud_rate);
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn dimensions(mut self, width: u8, height: u8) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn pattern(mut self, pattern: BayerPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn backend(mut self, backend: DebayerBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn build(self) -> CaptureConfig {
        let default = CaptureConfig::default();
        CaptureConfig {
            port: self.port.unwrap_or(default.port),
            baud_rate: self.baud_rate.unwrap_or(default.baud_rate),
            read_timeout: self.read_timeout.unwrap_or(default.read_timeout),
            max_attempts: self.max_attempts.unwrap_or(default.max_attempts),
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            pattern: self.pattern.unwrap_or(default.pattern),
            backend: self.backend.unwrap_or(default.backend),
            format: self.format.unwrap_or(default.format),
            quality: self.quality.unwrap_or(default.quality),
        }
    }
}
