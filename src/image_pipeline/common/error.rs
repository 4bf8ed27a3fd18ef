use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Serial device {port} unavailable: {reason}")]
    DeviceUnavailable { port: String, reason: String },

    /// `expected` and `received` count every byte of the response the failing
    /// read belonged to, header included when a session reads the payload.
    #[error("Acquisition timed out after {attempts} reads: received {received} of {expected} bytes")]
    AcquisitionTimeout {
        expected: usize,
        received: usize,
        attempts: u32,
    },

    #[error("Link reported {reported} bytes for a {requested}-byte read")]
    AccumulationOverflow { requested: usize, reported: usize },

    #[error("Malformed frame: header declares {width}x{height} ({expected} bytes), payload has {actual} bytes")]
    MalformedFrame {
        width: u8,
        height: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Header declares {width}x{height}, expected {expected_width}x{expected_height}")]
    HeaderMismatch {
        width: u8,
        height: u8,
        expected_width: u8,
        expected_height: u8,
    },

    #[error("Unsupported Bayer pattern: {0}")]
    UnsupportedPattern(String),

    #[error("Demosaic failed: {0}")]
    DemosaicError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CaptureError {
    /// Whether re-running the whole capture sequence from idle can succeed.
    ///
    /// Line noise and slow devices produce timeouts and corrupted frames;
    /// a missing device or a bad pattern will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CaptureError::AcquisitionTimeout { .. }
                | CaptureError::AccumulationOverflow { .. }
                | CaptureError::MalformedFrame { .. }
                | CaptureError::HeaderMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;
