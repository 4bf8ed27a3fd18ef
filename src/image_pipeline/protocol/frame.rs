use crate::image_pipeline::common::error::{CaptureError, Result};

/// Size of the `[mode][width][height]` prefix of every image response.
pub const HEADER_LEN: usize = 3;

/// Leading bytes of an image response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Opaque capture mode reported by the firmware.
    pub mode: u8,
    pub width: u8,
    pub height: u8,
}

impl ResponseHeader {
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        let [mode, width, height] = bytes;
        Self {
            mode,
            width,
            height,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        [self.mode, self.width, self.height]
    }

    /// Mosaic bytes that follow this header on the wire.
    pub fn payload_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A parsed image response: header plus one 8-bit sample per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    header: ResponseHeader,
    payload: Vec<u8>,
}

impl RawFrame {
    /// Pairs a header with its payload, rejecting a length mismatch.
    pub fn new(header: ResponseHeader, payload: Vec<u8>) -> Result<Self> {
        let expected = header.payload_len();
        if payload.len() != expected {
            return Err(CaptureError::MalformedFrame {
                width: header.width,
                height: header.height,
                expected,
                actual: payload.len(),
            });
        }
        Ok(Self { header, payload })
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Splits an accumulated response into header and mosaic.
pub fn parse_frame(buffer: &[u8]) -> Result<RawFrame> {
    let Some((head, payload)) = buffer.split_first_chunk::<HEADER_LEN>() else {
        return Err(CaptureError::MalformedFrame {
            width: 0,
            height: 0,
            expected: HEADER_LEN,
            actual: buffer.len(),
        });
    };

    RawFrame::new(ResponseHeader::from_bytes(*head), payload.to_vec())
}
